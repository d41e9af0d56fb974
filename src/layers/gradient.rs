use crate::effects::composite::apply_mask;
use crate::effects::gradient::LinearGradient;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::ScorecardResult;
use crate::layout::embed::EmbedLayout;
use crate::render::surface::Surface;

/// Full-canvas gradient from `left` (bottom-left corner) to `right` (top-right corner),
/// alpha-masked by `mask`.
pub fn build_gradient_layer(
    layout: &EmbedLayout,
    mask: &Surface,
    left: Rgba8,
    right: Rgba8,
) -> ScorecardResult<Surface> {
    let w = f64::from(layout.size.width);
    let h = f64::from(layout.size.height);
    let gradient = LinearGradient {
        start: Point::new(0.0, h),
        end: Point::new(w, 0.0),
        start_color: left,
        end_color: right,
    }
    .fill(layout.size)?;

    apply_mask(&gradient, mask)
}

#[cfg(test)]
#[path = "../../tests/unit/layers/gradient.rs"]
mod tests;
