use image::imageops::{self, FilterType};

use crate::foundation::core::CanvasSize;
use crate::foundation::error::ScorecardResult;
use crate::render::surface::Surface;

const FILTER: FilterType = FilterType::Triangle;

/// Resample to exactly `target`, ignoring aspect ratio.
pub fn resize_stretch(src: &Surface, target: CanvasSize) -> ScorecardResult<Surface> {
    let buf = src.to_premul_buffer()?;
    let out = imageops::resize(&buf, target.width, target.height, FILTER);
    Surface::from_premul_buffer(out)
}

/// Return `src` untouched when it already has `target` dimensions, otherwise stretch it.
pub fn resize_if_necessary(src: &Surface, target: CanvasSize) -> ScorecardResult<Surface> {
    if src.size() == target {
        return Ok(src.clone());
    }
    resize_stretch(src, target)
}

/// Scale to cover `target` while keeping aspect ratio, dropping the centered overflow.
///
/// The crop window is taken in source coordinates first, so the only buffer allocated besides
/// the source is the `target`-sized output.
pub fn resize_to_fill(src: &Surface, target: CanvasSize) -> ScorecardResult<Surface> {
    if src.size() == target {
        return Ok(src.clone());
    }

    let (crop_w, crop_h) = fill_window(src.size(), target);
    let x = (src.width() - crop_w) / 2;
    let y = (src.height() - crop_h) / 2;

    let buf = src.to_premul_buffer()?;
    let window = imageops::crop_imm(&buf, x, y, crop_w, crop_h).to_image();
    let out = imageops::resize(&window, target.width, target.height, FILTER);
    Surface::from_premul_buffer(out)
}

/// Largest source window with the target's aspect ratio.
fn fill_window(src: CanvasSize, target: CanvasSize) -> (u32, u32) {
    let (sw, sh) = (u64::from(src.width), u64::from(src.height));
    let (tw, th) = (u64::from(target.width), u64::from(target.height));
    if sw * th > sh * tw {
        // Source is wider: keep full height.
        let w = (sh * tw + th / 2) / th;
        (w.clamp(1, sw) as u32, src.height)
    } else {
        let h = (sw * th + tw / 2) / tw;
        (src.width, h.clamp(1, sh) as u32)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/resize.rs"]
mod tests;
