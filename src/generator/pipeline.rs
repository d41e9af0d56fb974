//! The score card generator: precomputed template state plus the per-call compositing pass.

use std::sync::Arc;

use crate::effects::composite::{apply_mask, over_region};
use crate::effects::resize::resize_if_necessary;
use crate::foundation::core::{CanvasSize, PixelRect, Rgba8};
use crate::foundation::error::{ScorecardError, ScorecardResult};
use crate::generator::score::ScoreRecord;
use crate::layers::avatar::{build_avatar_layer, build_avatar_overlay_layer};
use crate::layers::cover::{CoverFilter, build_cover_layer};
use crate::layers::gradient::build_gradient_layer;
use crate::layout::embed::EmbedLayout;
use crate::render::surface::Surface;
use crate::text::engine::{FontFamily, FontWeight};
use crate::text::fit::{FitRequest, fit_text};

const TEXT_COLOR: Rgba8 = Rgba8::WHITE;
const DEBUG_OUTLINE: Rgba8 = Rgba8::opaque(255, 0, 0);

/// Static template images consumed once by [`EmbedGenerator::new`].
#[derive(Clone, Debug)]
pub struct CardAssets {
    /// Shape of the avatar; resized to the avatar rectangle.
    pub avatar_mask: Surface,
    /// Base of every card; resized to the canvas.
    pub background: Surface,
    /// Shape of the gradient layer; resized to the canvas.
    pub gradient_mask: Surface,
    /// Shape of the cover layer; resized to the canvas.
    pub cover_mask: Surface,
    /// Overall card shape applied last; resized to the canvas.
    pub final_mask: Surface,
}

/// Renders score cards for one canvas size.
///
/// All state is computed at construction and never written afterwards, so one generator can
/// serve concurrent [`generate`](Self::generate) calls from several threads.
#[derive(Debug)]
pub struct EmbedGenerator {
    layout: EmbedLayout,
    avatar_mask: Surface,
    background: Surface,
    gradient_mask: Surface,
    cover_mask: Surface,
    final_mask: Surface,
    cover_filter: CoverFilter,
    font: Arc<dyn FontFamily>,
    debug_layout: bool,
}

impl EmbedGenerator {
    /// Compute the layout for `size` and fit every template asset to it.
    #[tracing::instrument(skip(assets, font))]
    pub fn new(
        size: CanvasSize,
        assets: CardAssets,
        font: Arc<dyn FontFamily>,
    ) -> ScorecardResult<Self> {
        let layout = EmbedLayout::new(size)?;
        for (name, rect) in layout.regions() {
            if rect.is_empty() {
                return Err(ScorecardError::config(format!(
                    "{name} rectangle is empty on a {}x{} canvas",
                    size.width, size.height
                )));
            }
        }
        if font.family_name().is_empty() {
            return Err(ScorecardError::config("font family has no name"));
        }

        let avatar_size = layout
            .avatar
            .size()
            .ok_or_else(|| ScorecardError::config("avatar rectangle is empty"))?;

        let generator = Self {
            avatar_mask: resize_if_necessary(&assets.avatar_mask, avatar_size)?,
            background: resize_if_necessary(&assets.background, size)?,
            gradient_mask: resize_if_necessary(&assets.gradient_mask, size)?,
            cover_mask: resize_if_necessary(&assets.cover_mask, size)?,
            final_mask: resize_if_necessary(&assets.final_mask, size)?,
            cover_filter: CoverFilter::default().scaled_to(size),
            font,
            debug_layout: false,
            layout,
        };
        tracing::debug!(
            family = generator.font.family_name(),
            blur_radius_px = generator.cover_filter.blur.radius_px,
            "generator ready"
        );
        Ok(generator)
    }

    /// Replace the cover filter. The filter is used as given, without canvas scaling.
    pub fn with_cover_filter(mut self, filter: CoverFilter) -> Self {
        self.cover_filter = filter;
        self
    }

    /// Outline every layout rectangle on generated cards.
    pub fn with_debug_layout(mut self, enabled: bool) -> Self {
        self.debug_layout = enabled;
        self
    }

    /// Layout shared by every card from this generator.
    pub fn layout(&self) -> &EmbedLayout {
        &self.layout
    }

    /// Canvas size of generated cards.
    pub fn size(&self) -> CanvasSize {
        self.layout.size
    }

    /// Cover filter in effect.
    pub fn cover_filter(&self) -> &CoverFilter {
        &self.cover_filter
    }

    /// Background after fitting to the canvas.
    pub fn background(&self) -> &Surface {
        &self.background
    }

    /// Render one card.
    #[tracing::instrument(skip_all, fields(player = %score.player_name, song = %score.song_name))]
    pub fn generate(&self, score: &ScoreRecord) -> ScorecardResult<Surface> {
        score.validate()?;
        let layout = &self.layout;

        let gradient = build_gradient_layer(
            layout,
            &self.gradient_mask,
            score.left_color,
            score.right_color,
        )?;
        tracing::debug!("gradient layer built");
        let cover = build_cover_layer(
            layout,
            &self.cover_filter,
            &self.cover_mask,
            &score.cover,
            &gradient,
        )?;
        tracing::debug!(blur_radius_px = self.cover_filter.blur.radius_px, "cover layer built");
        let avatar = build_avatar_layer(layout, &self.avatar_mask, &score.avatar)?;
        tracing::debug!("avatar layer built");

        // Cloning shares the background; the first write below detaches the copy.
        let mut canvas = self.background.clone();
        over_region(&mut canvas, &gradient, layout.full);
        over_region(&mut canvas, &cover, layout.full);
        over_region(&mut canvas, &avatar, layout.avatar);
        if let Some(overlay) = &score.avatar_overlay {
            let overlay = build_avatar_overlay_layer(layout, overlay, score.overlay_transform())?;
            tracing::debug!(hue_shift = score.overlay_hue_shift, "avatar overlay layer built");
            over_region(&mut canvas, &overlay, layout.avatar_overlay);
        }

        let accuracy = score.accuracy_text();
        let rank = score.rank_text();
        let difficulty = score.difficulty_text();
        let fields = [
            text_field(
                &score.player_name,
                TEXT_COLOR,
                layout.player_name,
                Some(layout.min_player_name_font_px),
            ),
            text_field(
                &score.song_name,
                TEXT_COLOR,
                layout.song_name,
                Some(layout.min_song_name_font_px),
            ),
            text_field(&accuracy, TEXT_COLOR, layout.accuracy_text, None),
            text_field(&rank, TEXT_COLOR, layout.rank_text, None),
            text_field(&score.modifiers, TEXT_COLOR, layout.modifiers_text, None),
            text_field(
                &difficulty,
                score.difficulty_color,
                layout.difficulty_text,
                None,
            ),
        ];

        let mut renderer = self.font.renderer()?;
        for field in &fields {
            fit_text(renderer.as_mut(), &mut canvas, field)?;
        }

        if self.debug_layout {
            draw_debug_info(&mut canvas, layout);
        }

        apply_mask(&canvas, &self.final_mask)
    }
}

fn text_field(
    text: &str,
    color: Rgba8,
    bounds: PixelRect,
    min_size_px: Option<f32>,
) -> FitRequest<'_> {
    FitRequest {
        text,
        color,
        weight: FontWeight::Bold,
        bounds,
        min_size_px,
    }
}

fn draw_debug_info(canvas: &mut Surface, layout: &EmbedLayout) {
    for (name, rect) in layout.regions() {
        if name == "avatar_overlay" {
            continue;
        }
        stroke_rect(canvas, rect, DEBUG_OUTLINE);
    }
}

fn stroke_rect(canvas: &mut Surface, rect: PixelRect, color: Rgba8) {
    if rect.is_empty() {
        return;
    }
    let px = color.premultiply().to_array();
    let width = canvas.width() as i64;
    let height = canvas.height() as i64;
    let data = canvas.data_mut();
    let mut put = |x: i64, y: i64| {
        if (0..width).contains(&x) && (0..height).contains(&y) {
            let i = ((y * width + x) * 4) as usize;
            data[i..i + 4].copy_from_slice(&px);
        }
    };

    let (x0, y0) = (i64::from(rect.x), i64::from(rect.y));
    let (x1, y1) = (rect.right() - 1, rect.bottom() - 1);
    for x in x0..=x1 {
        put(x, y0);
        put(x, y1);
    }
    for y in y0..=y1 {
        put(x0, y);
        put(x1, y);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generator/pipeline.rs"]
mod tests;
