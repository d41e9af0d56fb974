//! Text capability used by the fitter: measure and draw one line of text.
//!
//! The generator only talks to [`FontFamily`] and [`TextRenderer`]. [`EmbeddedFont`] is the
//! production backend: parley shapes the line and vello_cpu rasterizes the glyph runs.

use std::{borrow::Cow, sync::Arc};

use crate::effects::composite::over_at;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{ScorecardError, ScorecardResult};
use crate::render::surface::Surface;

/// Weight requested for a line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    /// Normal weight.
    Regular,
    /// Bold weight.
    #[default]
    Bold,
}

/// Everything needed to shape one line besides the string itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size_px: f32,
    /// Fill color.
    pub color: Rgba8,
    /// Font weight.
    pub weight: FontWeight,
}

/// Logical size of a shaped line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    /// Advance width in pixels.
    pub width: f32,
    /// Line height in pixels.
    pub height: f32,
}

/// Measures and draws single lines of text in one font family.
pub trait TextRenderer {
    /// Logical extent of `text` at `style`.
    fn measure(&mut self, text: &str, style: &TextStyle) -> ScorecardResult<TextExtent>;

    /// Draw `text` with the top-left of its logical box at `origin`, compositing source-over
    /// onto `target`. Glyphs outside `target` are clipped.
    fn draw(
        &mut self,
        target: &mut Surface,
        text: &str,
        style: &TextStyle,
        origin: Point,
    ) -> ScorecardResult<()>;
}

/// A font family a generator can share across threads.
pub trait FontFamily: Send + Sync + std::fmt::Debug {
    /// Family name as reported by the font data.
    fn family_name(&self) -> &str;

    /// Fresh renderer for one generate call.
    fn renderer(&self) -> ScorecardResult<Box<dyn TextRenderer>>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Font loaded from raw TrueType/OpenType bytes.
#[derive(Clone)]
pub struct EmbeddedFont {
    bytes: Arc<Vec<u8>>,
    family_name: String,
}

impl std::fmt::Debug for EmbeddedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedFont")
            .field("font_bytes_len", &self.bytes.len())
            .field("family_name", &self.family_name)
            .finish()
    }
}

impl EmbeddedFont {
    /// Register `bytes` and resolve the family they declare.
    pub fn from_bytes(bytes: Vec<u8>) -> ScorecardResult<Self> {
        if bytes.is_empty() {
            return Err(ScorecardError::config("font data is empty"));
        }
        let mut font_ctx = parley::FontContext::default();
        let family_name = register_family(&mut font_ctx, &bytes)?;
        Ok(Self {
            bytes: Arc::new(bytes),
            family_name,
        })
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl FontFamily for EmbeddedFont {
    fn family_name(&self) -> &str {
        &self.family_name
    }

    fn renderer(&self) -> ScorecardResult<Box<dyn TextRenderer>> {
        Ok(Box::new(ParleyTextRenderer::new(&self.bytes)?))
    }
}

fn register_family(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> ScorecardResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| ScorecardError::config("no font families registered from font bytes"))?;
    let name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| ScorecardError::config("registered font family has no name"))?;
    Ok(name.to_string())
}

/// Parley shaping plus vello_cpu glyph rasterization for one font.
pub struct ParleyTextRenderer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl ParleyTextRenderer {
    /// Build a renderer with fresh parley contexts for the given font bytes.
    pub fn new(font_bytes: &[u8]) -> ScorecardResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family_name = register_family(&mut font_ctx, font_bytes)?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.to_vec()),
            0,
        );
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    fn layout(
        &mut self,
        text: &str,
        style: &TextStyle,
    ) -> ScorecardResult<parley::Layout<TextBrushRgba8>> {
        if !style.size_px.is_finite() || style.size_px <= 0.0 {
            return Err(ScorecardError::text("text size_px must be finite and > 0"));
        }

        let weight = match style.weight {
            FontWeight::Regular => parley::style::FontWeight::NORMAL,
            FontWeight::Bold => parley::style::FontWeight::BOLD,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::from(
            style.color,
        )));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl TextRenderer for ParleyTextRenderer {
    fn measure(&mut self, text: &str, style: &TextStyle) -> ScorecardResult<TextExtent> {
        let layout = self.layout(text, style)?;
        Ok(TextExtent {
            width: layout.width(),
            height: layout.height(),
        })
    }

    fn draw(
        &mut self,
        target: &mut Surface,
        text: &str,
        style: &TextStyle,
        origin: Point,
    ) -> ScorecardResult<()> {
        let layout = self.layout(text, style)?;

        let width: u16 = target
            .width()
            .try_into()
            .map_err(|_| ScorecardError::text("text target width exceeds u16"))?;
        let height: u16 = target
            .height()
            .try_into()
            .map_err(|_| ScorecardError::text("text target height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        let glyph_layer =
            Surface::from_premul_bytes(target.size(), pixmap.data_as_u8_slice().to_vec())?;
        over_at(target, &glyph_layer, 0, 0);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
