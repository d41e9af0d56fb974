//! Shrink-to-fit single-line text.
//!
//! The search starts at the box height and walks down in fixed steps, so the chosen size
//! depends only on the text, the renderer's metrics and the box.

use crate::effects::composite::over_region;
use crate::foundation::core::{PixelRect, Point, Rgba8};
use crate::foundation::error::{ScorecardError, ScorecardResult};
use crate::render::surface::Surface;
use crate::text::engine::{FontWeight, TextExtent, TextRenderer, TextStyle};

/// Smallest size tried when no explicit floor is given.
pub const MIN_FONT_SIZE_PX: f32 = 1.0;
/// Decrement between two measured sizes.
pub const FONT_SIZE_STEP_PX: f32 = 1.0;

/// One line of text to place inside a box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitRequest<'a> {
    /// Text to draw.
    pub text: &'a str,
    /// Fill color.
    pub color: Rgba8,
    /// Font weight.
    pub weight: FontWeight,
    /// Box the text is centered in and clipped to.
    pub bounds: PixelRect,
    /// Size below which the text is clipped instead of shrunk.
    pub min_size_px: Option<f32>,
}

/// Outcome of the size search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FittedText {
    /// Selected font size.
    pub size_px: f32,
    /// Measured extent at that size.
    pub extent: TextExtent,
    /// True when the text still overflows the box at the floor.
    pub clipped: bool,
}

impl FitRequest<'_> {
    fn style(&self, size_px: f32) -> TextStyle {
        TextStyle {
            size_px,
            color: self.color,
            weight: self.weight,
        }
    }

    fn fits(&self, extent: TextExtent) -> bool {
        extent.width <= self.bounds.width as f32 && extent.height <= self.bounds.height as f32
    }
}

/// Find the largest size, stepping down from the box height, at which the text fits.
pub fn choose_font_size(
    renderer: &mut dyn TextRenderer,
    req: &FitRequest<'_>,
) -> ScorecardResult<FittedText> {
    let floor = match req.min_size_px {
        Some(min) if !min.is_finite() || min <= 0.0 => {
            return Err(ScorecardError::text(format!(
                "minimum font size must be finite and > 0, got {min}"
            )));
        }
        Some(min) => min.max(MIN_FONT_SIZE_PX),
        None => MIN_FONT_SIZE_PX,
    };

    let mut size_px = (req.bounds.height as f32).max(floor);
    loop {
        let extent = renderer.measure(req.text, &req.style(size_px))?;
        if req.fits(extent) {
            return Ok(FittedText {
                size_px,
                extent,
                clipped: false,
            });
        }
        if size_px <= floor {
            return Ok(FittedText {
                size_px,
                extent,
                clipped: true,
            });
        }
        size_px = (size_px - FONT_SIZE_STEP_PX).max(floor);
    }
}

/// Draw `req.text` centered in `req.bounds` on `canvas` at the fitted size.
///
/// Returns `None` when there is nothing to draw (empty text or empty box).
pub fn fit_text(
    renderer: &mut dyn TextRenderer,
    canvas: &mut Surface,
    req: &FitRequest<'_>,
) -> ScorecardResult<Option<FittedText>> {
    let Some(box_size) = req.bounds.size() else {
        return Ok(None);
    };
    if req.text.is_empty() {
        return Ok(None);
    }

    let fitted = choose_font_size(renderer, req)?;
    tracing::trace!(
        text = req.text,
        size_px = fitted.size_px,
        clipped = fitted.clipped,
        "fitted text"
    );

    // Draw into a box-sized layer so overflow at the floor is clipped to the box.
    let mut layer = Surface::transparent(box_size)?;
    let origin = Point::new(
        f64::from((box_size.width as f32 - fitted.extent.width) / 2.0),
        f64::from((box_size.height as f32 - fitted.extent.height) / 2.0),
    );
    renderer.draw(&mut layer, req.text, &req.style(fitted.size_px), origin)?;
    over_region(canvas, &layer, req.bounds);

    Ok(Some(fitted))
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
