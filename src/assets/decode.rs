use std::io::Cursor;

use anyhow::Context;

use crate::foundation::error::{ScorecardError, ScorecardResult};
use crate::render::surface::Surface;

/// Decode encoded image bytes (PNG, JPEG, ...) into a premultiplied surface.
pub fn decode_image(bytes: &[u8]) -> ScorecardResult<Surface> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ScorecardError::asset(format!("decode image from memory: {e}")))?;
    Surface::from_rgba_image(&dyn_img.to_rgba8())
}

/// Encode a surface as straight-alpha PNG bytes.
pub fn encode_png(surface: &Surface) -> ScorecardResult<Vec<u8>> {
    let img = surface.to_rgba_image()?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .context("encode png")?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
