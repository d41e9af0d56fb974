use crate::effects::blur::GaussianBlur;
use crate::effects::composite::{apply_mask, over_at, tint};
use crate::effects::resize::resize_to_fill;
use crate::foundation::core::{CanvasSize, Rgba8};
use crate::foundation::error::ScorecardResult;
use crate::layout::embed::EmbedLayout;
use crate::render::surface::Surface;

/// Canvas size the cover filter constants were tuned at.
pub const REFERENCE_CANVAS: CanvasSize = CanvasSize {
    width: 500,
    height: 300,
};

/// Halves the gradient's alpha before it is laid over the cover art.
pub const COVER_GRADIENT_TINT: Rgba8 = Rgba8::new(255, 255, 255, 128);
/// Darkens the cover toward gray so foreground text stays legible.
pub const COVER_IMAGE_TINT: Rgba8 = Rgba8::opaque(140, 140, 140);
/// Blur at [`REFERENCE_CANVAS`].
pub const COVER_BLUR: GaussianBlur = GaussianBlur {
    radius_px: 12,
    sigma: 1.4,
};

/// Tints and blur applied to the cover art.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFilter {
    /// Channel multiplier applied to the gradient copy laid over the cover.
    pub gradient_tint: Rgba8,
    /// Channel multiplier applied to the combined cover.
    pub image_tint: Rgba8,
    /// Blur applied after tinting.
    pub blur: GaussianBlur,
}

impl Default for CoverFilter {
    fn default() -> Self {
        Self {
            gradient_tint: COVER_GRADIENT_TINT,
            image_tint: COVER_IMAGE_TINT,
            blur: COVER_BLUR,
        }
    }
}

impl CoverFilter {
    /// Scale the blur from [`REFERENCE_CANVAS`] to `size`, using the tighter of the two axes.
    pub fn scaled_to(self, size: CanvasSize) -> Self {
        let sx = f64::from(size.width) / f64::from(REFERENCE_CANVAS.width);
        let sy = f64::from(size.height) / f64::from(REFERENCE_CANVAS.height);
        let scale = sx.min(sy);

        let radius_px = if self.blur.radius_px == 0 {
            0
        } else {
            ((f64::from(self.blur.radius_px) * scale).round() as u32).max(1)
        };
        let sigma = ((f64::from(self.blur.sigma) * scale) as f32).max(0.1);
        Self {
            blur: GaussianBlur { radius_px, sigma },
            ..self
        }
    }
}

/// Cover art filling the canvas, overlaid with a faded gradient, tinted, blurred and
/// masked by `mask`. Steps run in that order.
pub fn build_cover_layer(
    layout: &EmbedLayout,
    filter: &CoverFilter,
    mask: &Surface,
    cover: &Surface,
    gradient: &Surface,
) -> ScorecardResult<Surface> {
    let mut layer = resize_to_fill(cover, layout.size)?;
    let faded = tint(gradient, filter.gradient_tint);
    over_at(&mut layer, &faded, 0, 0);
    let layer = tint(&layer, filter.image_tint);
    let layer = filter.blur.apply(&layer)?;
    apply_mask(&layer, mask)
}

#[cfg(test)]
#[path = "../../tests/unit/layers/cover.rs"]
mod tests;
