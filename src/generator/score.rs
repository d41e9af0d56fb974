use crate::effects::color::HsbTransform;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{ScorecardError, ScorecardResult};
use crate::render::surface::Surface;

/// One leaderboard entry to render. Lives for a single generate call.
#[derive(Clone, Debug)]
pub struct ScoreRecord {
    /// Player display name.
    pub player_name: String,
    /// Song title.
    pub song_name: String,
    /// Modifier list, drawn as given (may be empty).
    pub modifiers: String,
    /// Difficulty label, e.g. `Expert+`.
    pub difficulty: String,
    /// Accuracy in `0..=1`.
    pub accuracy: f64,
    /// Leaderboard position.
    pub rank: i64,
    /// Performance points; `0` hides them.
    pub pp: f64,
    /// Star rating; `0` hides it.
    pub stars: f64,
    /// Song cover art.
    pub cover: Surface,
    /// Player avatar.
    pub avatar: Surface,
    /// Optional decorative ring drawn around the avatar.
    pub avatar_overlay: Option<Surface>,
    /// Hue rotation applied to the overlay, in degrees.
    pub overlay_hue_shift: i32,
    /// Saturation multiplier applied to the overlay.
    pub overlay_saturation: f32,
    /// Gradient color at the bottom-left corner.
    pub left_color: Rgba8,
    /// Gradient color at the top-right corner.
    pub right_color: Rgba8,
    /// Fill color of the difficulty text.
    pub difficulty_color: Rgba8,
}

impl ScoreRecord {
    /// Reject values that would otherwise render a misleading card.
    pub fn validate(&self) -> ScorecardResult<()> {
        if !self.accuracy.is_finite() || !(0.0..=1.0).contains(&self.accuracy) {
            return Err(ScorecardError::score(format!(
                "accuracy must be within 0..=1, got {}",
                self.accuracy
            )));
        }
        if self.rank < 0 {
            return Err(ScorecardError::score(format!(
                "rank must be >= 0, got {}",
                self.rank
            )));
        }
        if !self.pp.is_finite() || self.pp < 0.0 {
            return Err(ScorecardError::score(format!(
                "pp must be finite and >= 0, got {}",
                self.pp
            )));
        }
        if !self.stars.is_finite() || self.stars < 0.0 {
            return Err(ScorecardError::score(format!(
                "stars must be finite and >= 0, got {}",
                self.stars
            )));
        }
        if !self.overlay_saturation.is_finite() || self.overlay_saturation < 0.0 {
            return Err(ScorecardError::score(format!(
                "overlay saturation must be finite and >= 0, got {}",
                self.overlay_saturation
            )));
        }
        Ok(())
    }

    /// Recoloring applied to the avatar overlay.
    pub fn overlay_transform(&self) -> HsbTransform {
        HsbTransform::hue_saturation(self.overlay_hue_shift, self.overlay_saturation)
    }

    /// Accuracy line, e.g. `95.73%`.
    pub fn accuracy_text(&self) -> String {
        format_accuracy(self.accuracy)
    }

    /// Rank line, e.g. `#13 • 607.58pp`.
    pub fn rank_text(&self) -> String {
        format_rank(self.rank, self.pp)
    }

    /// Difficulty line, e.g. `Expert+ 123.35★`.
    pub fn difficulty_text(&self) -> String {
        format_difficulty(&self.difficulty, self.stars)
    }
}

/// Percentage with two decimals, `.` separator, no grouping.
pub fn format_accuracy(accuracy: f64) -> String {
    // `+ 0.0` turns a negative zero into a positive one.
    format!("{:.2}%", accuracy * 100.0 + 0.0)
}

/// `#N`, followed by ` • <pp>pp` when points are nonzero.
pub fn format_rank(rank: i64, pp: f64) -> String {
    if pp != 0.0 {
        format!("#{rank} • {pp:.2}pp")
    } else {
        format!("#{rank}")
    }
}

/// Difficulty label, followed by ` <stars>★` when the rating is nonzero.
pub fn format_difficulty(difficulty: &str, stars: f64) -> String {
    if stars != 0.0 {
        format!("{difficulty} {stars:.2}★")
    } else {
        difficulty.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generator/score.rs"]
mod tests;
