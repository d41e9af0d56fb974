//! Scorecard renders fixed-layout leaderboard score cards.
//!
//! A card is built from a handful of static template images (background and masks), a font,
//! and one [`ScoreRecord`] per call. Everything that depends only on the canvas size is computed
//! once by [`EmbedGenerator::new`]; [`EmbedGenerator::generate`] then composites a card without
//! touching shared state, so one generator can serve many threads.
//!
//! # Pipeline overview
//!
//! 1. **Layout**: `CanvasSize -> EmbedLayout` (closed-form rectangles for every region)
//! 2. **Layers**: gradient, cover, avatar and optional avatar overlay, each a full surface
//! 3. **Composite**: layers over a copy of the background, then auto-fitted text
//! 4. **Mask**: the final mask shapes the finished card
//!
//! Pixels are premultiplied RGBA8 end-to-end. Decoding and encoding convert at the boundary.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod effects;
mod foundation;
mod generator;
mod layers;
mod layout;
mod render;
mod text;

#[cfg(test)]
#[path = "../tests/unit/support/block_font.rs"]
pub(crate) mod block_font;

pub use assets::color::ColorDef;
pub use assets::decode::{decode_image, encode_png};
pub use assets::store::{
    AssetPaths, CardConfig, CoverFilterConfig, ScoreRequest, prepare_generator, resolve_path,
};
pub use effects::blur::GaussianBlur;
pub use effects::color::HsbTransform;
pub use effects::composite::{PremulRgba8, apply_mask, over, over_at, over_region, tint};
pub use effects::gradient::LinearGradient;
pub use effects::resize::{resize_if_necessary, resize_stretch, resize_to_fill};
pub use foundation::core::{CanvasSize, PixelRect, Point, Rect, Rgba8, Rgba8Premul, Size};
pub use foundation::error::{ScorecardError, ScorecardResult};
pub use generator::pipeline::{CardAssets, EmbedGenerator};
pub use generator::score::{ScoreRecord, format_accuracy, format_difficulty, format_rank};
pub use layers::avatar::{build_avatar_layer, build_avatar_overlay_layer};
pub use layers::cover::{
    COVER_BLUR, COVER_GRADIENT_TINT, COVER_IMAGE_TINT, CoverFilter, REFERENCE_CANVAS,
    build_cover_layer,
};
pub use layers::gradient::build_gradient_layer;
pub use layout::embed::{EmbedLayout, MIN_ASPECT_RATIO};
pub use render::surface::Surface;
pub use text::engine::{
    EmbeddedFont, FontFamily, FontWeight, ParleyTextRenderer, TextBrushRgba8, TextExtent,
    TextRenderer, TextStyle,
};
pub use text::fit::{
    FONT_SIZE_STEP_PX, FitRequest, FittedText, MIN_FONT_SIZE_PX, choose_font_size, fit_text,
};
