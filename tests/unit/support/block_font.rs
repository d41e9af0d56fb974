//! Block-glyph text backend shared by the unit tests.
//!
//! Every character is a `0.5 * size` wide block and a line is `1.25 * size` tall, so fitted
//! sizes and drawn pixels can be computed by hand.

use crate::foundation::core::Point;
use crate::foundation::error::ScorecardResult;
use crate::render::surface::Surface;
use crate::text::engine::{FontFamily, TextExtent, TextRenderer, TextStyle};

#[derive(Debug)]
pub(crate) struct BlockFont;

impl FontFamily for BlockFont {
    fn family_name(&self) -> &str {
        "Block"
    }

    fn renderer(&self) -> ScorecardResult<Box<dyn TextRenderer>> {
        Ok(Box::new(BlockRenderer::default()))
    }
}

/// Records every size it was asked to measure.
#[derive(Default)]
pub(crate) struct BlockRenderer {
    pub(crate) measured: Vec<f32>,
}

pub(crate) fn block_extent(text: &str, size_px: f32) -> TextExtent {
    TextExtent {
        width: 0.5 * size_px * text.chars().count() as f32,
        height: 1.25 * size_px,
    }
}

impl TextRenderer for BlockRenderer {
    fn measure(&mut self, text: &str, style: &TextStyle) -> ScorecardResult<TextExtent> {
        self.measured.push(style.size_px);
        Ok(block_extent(text, style.size_px))
    }

    fn draw(
        &mut self,
        target: &mut Surface,
        text: &str,
        style: &TextStyle,
        origin: Point,
    ) -> ScorecardResult<()> {
        let e = block_extent(text, style.size_px);
        let px = style.color.premultiply().to_array();
        let w = i64::from(target.width());
        let h = i64::from(target.height());
        let x0 = (origin.x.round() as i64).max(0);
        let y0 = (origin.y.round() as i64).max(0);
        let x1 = ((origin.x + f64::from(e.width)).round() as i64).min(w);
        let y1 = ((origin.y + f64::from(e.height)).round() as i64).min(h);
        let data = target.data_mut();
        for y in y0..y1 {
            for x in x0..x1 {
                let i = ((y * w + x) * 4) as usize;
                data[i..i + 4].copy_from_slice(&px);
            }
        }
        Ok(())
    }
}
