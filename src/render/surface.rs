use std::sync::Arc;

use crate::foundation::core::{CanvasSize, Rgba8Premul};
use crate::foundation::error::{ScorecardError, ScorecardResult};
use crate::foundation::math::mul_div255_u8;

/// Premultiplied RGBA8 raster image.
///
/// Pixel storage is shared between clones and copied on the first write, so a surface
/// handed out from precomputed generator state can never be altered through a clone.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    size: CanvasSize,
    pixels: Arc<Vec<u8>>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .field("pixels_ptr", &Arc::as_ptr(&self.pixels))
            .finish()
    }
}

impl Surface {
    /// Fully transparent surface.
    pub fn transparent(size: CanvasSize) -> ScorecardResult<Self> {
        Self::filled(size, Rgba8Premul::transparent())
    }

    /// Surface where every pixel is `color`.
    pub fn filled(size: CanvasSize, color: Rgba8Premul) -> ScorecardResult<Self> {
        check_size(size)?;
        let px = color.to_array();
        Ok(Self {
            size,
            pixels: Arc::new(px.repeat(size.area())),
        })
    }

    /// Wrap premultiplied row-major RGBA8 bytes.
    pub fn from_premul_bytes(size: CanvasSize, bytes: Vec<u8>) -> ScorecardResult<Self> {
        check_size(size)?;
        if bytes.len() != size.rgba_len() {
            return Err(ScorecardError::asset(format!(
                "expected {} bytes for a {}x{} surface, got {}",
                size.rgba_len(),
                size.width,
                size.height,
                bytes.len()
            )));
        }
        Ok(Self {
            size,
            pixels: Arc::new(bytes),
        })
    }

    /// Premultiply a straight-alpha image.
    pub fn from_rgba_image(img: &image::RgbaImage) -> ScorecardResult<Self> {
        let (width, height) = img.dimensions();
        let mut bytes = img.as_raw().clone();
        premultiply_rgba8_in_place(&mut bytes);
        Self::from_premul_bytes(CanvasSize { width, height }, bytes)
    }

    /// Convert back to a straight-alpha image.
    pub fn to_rgba_image(&self) -> ScorecardResult<image::RgbaImage> {
        let mut bytes = self.pixels.as_ref().clone();
        unpremultiply_rgba8_in_place(&mut bytes);
        image::RgbaImage::from_raw(self.size.width, self.size.height, bytes)
            .ok_or_else(|| ScorecardError::asset("surface buffer does not match its size"))
    }

    /// View the premultiplied bytes as an `image` buffer (for resampling).
    pub(crate) fn to_premul_buffer(&self) -> ScorecardResult<image::RgbaImage> {
        image::RgbaImage::from_raw(
            self.size.width,
            self.size.height,
            self.pixels.as_ref().clone(),
        )
        .ok_or_else(|| ScorecardError::asset("surface buffer does not match its size"))
    }

    /// Wrap an `image` buffer that already holds premultiplied bytes.
    pub(crate) fn from_premul_buffer(buf: image::RgbaImage) -> ScorecardResult<Self> {
        let (width, height) = buf.dimensions();
        Self::from_premul_bytes(CanvasSize { width, height }, buf.into_raw())
    }

    /// Pixel dimensions.
    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Premultiplied row-major RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable pixel bytes; detaches from any clone sharing the buffer.
    pub fn data_mut(&mut self) -> &mut [u8] {
        Arc::make_mut(&mut self.pixels).as_mut_slice()
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = ((y as usize) * (self.size.width as usize) + (x as usize)) * 4;
        let px = &self.pixels[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// True when both surfaces share one pixel allocation.
    pub fn shares_pixels_with(&self, other: &Surface) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

fn check_size(size: CanvasSize) -> ScorecardResult<()> {
    if size.width == 0 || size.height == 0 {
        return Err(ScorecardError::asset(format!(
            "surface size must be non-zero, got {}x{}",
            size.width, size.height
        )));
    }
    Ok(())
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = mul_div255_u8(u16::from(*c), a);
        }
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        for c in 0..3 {
            px[c] = ((u32::from(px[c]) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
