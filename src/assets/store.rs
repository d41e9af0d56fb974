//! JSON-facing configuration: the card template and per-score requests.
//!
//! All file IO happens here, before generation. Relative paths resolve against a caller-supplied
//! root, normally the directory holding the JSON file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::assets::color::ColorDef;
use crate::assets::decode::decode_image;
use crate::effects::blur::GaussianBlur;
use crate::foundation::core::CanvasSize;
use crate::foundation::error::{ScorecardError, ScorecardResult};
use crate::generator::pipeline::{CardAssets, EmbedGenerator};
use crate::generator::score::ScoreRecord;
use crate::layers::cover::{COVER_BLUR, CoverFilter};
use crate::render::surface::Surface;
use crate::text::engine::EmbeddedFont;

/// Card template: canvas size plus the static assets every card shares.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardConfig {
    /// Output canvas.
    pub canvas: CanvasSize,
    /// Template asset paths.
    pub assets: AssetPaths,
    /// Cover blur override.
    #[serde(default)]
    pub cover_filter: Option<CoverFilterConfig>,
    /// Outline layout rectangles on every card.
    #[serde(default)]
    pub debug_layout: bool,
}

/// Paths of the template assets, relative to the config root unless absolute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetPaths {
    /// Avatar shape mask.
    pub avatar_mask: PathBuf,
    /// Card background.
    pub background: PathBuf,
    /// Gradient shape mask.
    pub gradient_mask: PathBuf,
    /// Cover shape mask.
    pub cover_mask: PathBuf,
    /// Overall card mask.
    pub final_mask: PathBuf,
    /// TrueType/OpenType font used for every text field.
    pub font: PathBuf,
}

/// Blur settings for the cover layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoverFilterConfig {
    /// Kernel half-width in pixels.
    #[serde(default = "default_blur_radius")]
    pub blur_radius_px: u32,
    /// Kernel standard deviation in pixels.
    #[serde(default = "default_blur_sigma")]
    pub blur_sigma: f32,
    /// Treat the values as tuned for a 500x300 card and scale them to the canvas.
    #[serde(default = "default_true")]
    pub scale_with_canvas: bool,
}

impl Default for CoverFilterConfig {
    fn default() -> Self {
        Self {
            blur_radius_px: default_blur_radius(),
            blur_sigma: default_blur_sigma(),
            scale_with_canvas: true,
        }
    }
}

impl CoverFilterConfig {
    /// Resolve into the filter used for `size`.
    pub fn to_filter(self, size: CanvasSize) -> CoverFilter {
        let filter = CoverFilter {
            blur: GaussianBlur {
                radius_px: self.blur_radius_px,
                sigma: self.blur_sigma,
            },
            ..CoverFilter::default()
        };
        if self.scale_with_canvas {
            filter.scaled_to(size)
        } else {
            filter
        }
    }
}

fn default_blur_radius() -> u32 {
    COVER_BLUR.radius_px
}

fn default_blur_sigma() -> f32 {
    COVER_BLUR.sigma
}

fn default_true() -> bool {
    true
}

fn default_saturation() -> f32 {
    1.0
}

impl CardConfig {
    /// Parse a JSON config file. Returns the config and the directory its paths resolve against.
    pub fn from_json_path(path: &Path) -> ScorecardResult<(Self, PathBuf)> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read card config '{}'", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| ScorecardError::config(format!("parse '{}': {e}", path.display())))?;
        Ok((config, parent_dir(path)))
    }
}

/// Load every template asset under `root` and build a generator for `config`.
#[tracing::instrument(skip(config), fields(width = config.canvas.width, height = config.canvas.height))]
pub fn prepare_generator(config: &CardConfig, root: &Path) -> ScorecardResult<EmbedGenerator> {
    let size = CanvasSize::new(config.canvas.width, config.canvas.height)?;
    let paths = &config.assets;
    let assets = CardAssets {
        avatar_mask: load_image(root, &paths.avatar_mask)?,
        background: load_image(root, &paths.background)?,
        gradient_mask: load_image(root, &paths.gradient_mask)?,
        cover_mask: load_image(root, &paths.cover_mask)?,
        final_mask: load_image(root, &paths.final_mask)?,
    };
    let font = EmbeddedFont::from_bytes(read_bytes(root, &paths.font)?)?;

    let mut generator = EmbedGenerator::new(size, assets, Arc::new(font))?;
    if let Some(cover) = config.cover_filter {
        generator = generator.with_cover_filter(cover.to_filter(size));
    }
    Ok(generator.with_debug_layout(config.debug_layout))
}

/// One score as written in JSON. Images are paths, colors are [`ColorDef`]s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreRequest {
    /// Player display name.
    pub player_name: String,
    /// Song title.
    pub song_name: String,
    /// Modifier list.
    #[serde(default)]
    pub modifiers: String,
    /// Difficulty label.
    pub difficulty: String,
    /// Accuracy in `0..=1`.
    pub accuracy: f64,
    /// Leaderboard position.
    pub rank: i64,
    /// Performance points.
    #[serde(default)]
    pub pp: f64,
    /// Star rating.
    #[serde(default)]
    pub stars: f64,
    /// Cover art path.
    pub cover: PathBuf,
    /// Avatar path.
    pub avatar: PathBuf,
    /// Avatar overlay path.
    #[serde(default)]
    pub avatar_overlay: Option<PathBuf>,
    /// Overlay hue rotation in degrees.
    #[serde(default)]
    pub overlay_hue_shift: i32,
    /// Overlay saturation multiplier.
    #[serde(default = "default_saturation")]
    pub overlay_saturation: f32,
    /// Gradient color at the bottom-left.
    pub left_color: ColorDef,
    /// Gradient color at the top-right.
    pub right_color: ColorDef,
    /// Difficulty text color.
    pub difficulty_color: ColorDef,
}

impl ScoreRequest {
    /// Parse a JSON request file. Returns the request and the directory its paths resolve against.
    pub fn from_json_path(path: &Path) -> ScorecardResult<(Self, PathBuf)> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read score request '{}'", path.display()))?;
        let request: Self = serde_json::from_str(&text)
            .map_err(|e| ScorecardError::score(format!("parse '{}': {e}", path.display())))?;
        Ok((request, parent_dir(path)))
    }

    /// Decode the referenced images and produce a [`ScoreRecord`].
    pub fn load(&self, root: &Path) -> ScorecardResult<ScoreRecord> {
        let avatar_overlay = self
            .avatar_overlay
            .as_deref()
            .map(|p| load_image(root, p))
            .transpose()?;
        let record = ScoreRecord {
            player_name: self.player_name.clone(),
            song_name: self.song_name.clone(),
            modifiers: self.modifiers.clone(),
            difficulty: self.difficulty.clone(),
            accuracy: self.accuracy,
            rank: self.rank,
            pp: self.pp,
            stars: self.stars,
            cover: load_image(root, &self.cover)?,
            avatar: load_image(root, &self.avatar)?,
            avatar_overlay,
            overlay_hue_shift: self.overlay_hue_shift,
            overlay_saturation: self.overlay_saturation,
            left_color: self.left_color.to_rgba8(),
            right_color: self.right_color.to_rgba8(),
            difficulty_color: self.difficulty_color.to_rgba8(),
        };
        record.validate()?;
        Ok(record)
    }
}

/// `path` if absolute, else `root/path`.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn read_bytes(root: &Path, path: &Path) -> ScorecardResult<Vec<u8>> {
    let path = resolve_path(root, path);
    let bytes = std::fs::read(&path)
        .with_context(|| format!("read asset bytes from '{}'", path.display()))?;
    Ok(bytes)
}

fn load_image(root: &Path, path: &Path) -> ScorecardResult<Surface> {
    let bytes = read_bytes(root, path)?;
    decode_image(&bytes).map_err(|e| match e {
        ScorecardError::Asset(msg) => {
            ScorecardError::asset(format!("'{}': {msg}", resolve_path(root, path).display()))
        }
        other => other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
