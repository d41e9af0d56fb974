//! Proportional geometry of the score card template.
//!
//! Every rectangle is closed-form arithmetic over the canvas size: a center point expressed
//! as a fraction of the canvas plus a size expressed as a fraction of the canvas. Rectangles
//! are snapped to whole pixels and clipped to the canvas.

use crate::foundation::core::{CanvasSize, PixelRect, Point, Rect, Size};
use crate::foundation::error::{ScorecardError, ScorecardResult};

const AVATAR_CENTER_X: f64 = 0.5 - 0.22;
const AVATAR_SIZE_OF_HEIGHT: f64 = 0.5;
const AVATAR_OVERLAY_SCALE: f64 = 1.5;
const STATS_CENTER_X: f64 = 0.5 + 0.22;

const MIN_PLAYER_NAME_FONT_OF_HEIGHT: f32 = 0.07;
const MIN_SONG_NAME_FONT_OF_HEIGHT: f32 = 0.1;

/// Narrowest `width / height` for which the avatar overlay still fits left of the avatar
/// center. Narrower canvases would push the overlay off the left edge.
pub const MIN_ASPECT_RATIO: f64 =
    (AVATAR_SIZE_OF_HEIGHT * AVATAR_OVERLAY_SCALE * 0.5) / AVATAR_CENTER_X;

/// Named rectangles and font floors derived from one canvas size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct EmbedLayout {
    /// Canvas size the layout was computed for.
    pub size: CanvasSize,
    /// Whole canvas.
    pub full: PixelRect,
    /// Square avatar region.
    pub avatar: PixelRect,
    /// Decorative ring around the avatar, same center and 1.5x the avatar size.
    pub avatar_overlay: PixelRect,
    /// Song title, bottom band.
    pub song_name: PixelRect,
    /// Player name, above the avatar.
    pub player_name: PixelRect,
    /// Accuracy percentage, right column top.
    pub accuracy_text: PixelRect,
    /// Rank and performance points, right column middle.
    pub rank_text: PixelRect,
    /// Modifiers, right column bottom.
    pub modifiers_text: PixelRect,
    /// Difficulty label, top-right corner.
    pub difficulty_text: PixelRect,
    /// Smallest font size the player name may shrink to.
    pub min_player_name_font_px: f32,
    /// Smallest font size the song name may shrink to.
    pub min_song_name_font_px: f32,
}

impl EmbedLayout {
    /// Compute the layout for `size`.
    ///
    /// Fails for zero dimensions and for canvases narrower than [`MIN_ASPECT_RATIO`].
    pub fn new(size: CanvasSize) -> ScorecardResult<Self> {
        if size.width == 0 || size.height == 0 {
            return Err(ScorecardError::config(format!(
                "layout needs a non-zero canvas, got {}x{}",
                size.width, size.height
            )));
        }
        if size.aspect_ratio() < MIN_ASPECT_RATIO {
            return Err(ScorecardError::config(format!(
                "canvas {}x{} is narrower than the template allows (min aspect {:.3})",
                size.width, size.height, MIN_ASPECT_RATIO
            )));
        }

        let w = f64::from(size.width);
        let h = f64::from(size.height);
        let rect = |cx: f64, cy: f64, sw: f64, sh: f64| {
            PixelRect::snap_within(
                Rect::from_center_size(Point::new(cx, cy), Size::new(sw, sh)),
                size,
            )
        };

        let avatar_side = h * AVATAR_SIZE_OF_HEIGHT;
        let overlay_side = avatar_side * AVATAR_OVERLAY_SCALE;
        let avatar_cx = w * AVATAR_CENTER_X;
        let stats_cx = w * STATS_CENTER_X;

        Ok(Self {
            size,
            full: PixelRect::full(size),
            avatar: rect(avatar_cx, h * 0.5, avatar_side, avatar_side),
            avatar_overlay: rect(avatar_cx, h * 0.5, overlay_side, overlay_side),
            song_name: rect(w * 0.5, h * (0.5 + 0.35), w * 0.94, h * 0.14),
            player_name: rect(avatar_cx, h * (0.5 - 0.35), w * 0.5, h * 0.12),
            accuracy_text: rect(stats_cx, h * (0.5 - 0.18), w * 0.5, h * 0.14),
            rank_text: rect(stats_cx, h * 0.5, w * 0.5, h * 0.12),
            modifiers_text: rect(stats_cx, h * (0.5 + 0.14), w * 0.5, h * 0.08),
            difficulty_text: rect(w * 0.88, h * 0.07, w * 0.22, h * 0.09),
            min_player_name_font_px: size.height as f32 * MIN_PLAYER_NAME_FONT_OF_HEIGHT,
            min_song_name_font_px: size.height as f32 * MIN_SONG_NAME_FONT_OF_HEIGHT,
        })
    }

    /// Every named rectangle except `full`, in drawing order.
    pub fn regions(&self) -> [(&'static str, PixelRect); 8] {
        [
            ("avatar", self.avatar),
            ("avatar_overlay", self.avatar_overlay),
            ("player_name", self.player_name),
            ("song_name", self.song_name),
            ("accuracy_text", self.accuracy_text),
            ("rank_text", self.rank_text),
            ("modifiers_text", self.modifiers_text),
            ("difficulty_text", self.difficulty_text),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/embed.rs"]
mod tests;
