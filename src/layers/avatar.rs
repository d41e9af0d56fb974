use crate::effects::color::HsbTransform;
use crate::effects::composite::apply_mask;
use crate::effects::resize::{resize_if_necessary, resize_stretch};
use crate::foundation::error::{ScorecardError, ScorecardResult};
use crate::layout::embed::EmbedLayout;
use crate::render::surface::Surface;

/// Avatar stretched to the avatar rectangle and alpha-masked by `mask`.
pub fn build_avatar_layer(
    layout: &EmbedLayout,
    mask: &Surface,
    avatar: &Surface,
) -> ScorecardResult<Surface> {
    let size = layout
        .avatar
        .size()
        .ok_or_else(|| ScorecardError::config("avatar rectangle is empty"))?;
    let resized = resize_stretch(avatar, size)?;
    apply_mask(&resized, mask)
}

/// Decorative overlay recolored by `hsb` and sized to the overlay rectangle. No mask is
/// applied; overlay art carries its own transparency.
pub fn build_avatar_overlay_layer(
    layout: &EmbedLayout,
    overlay: &Surface,
    hsb: HsbTransform,
) -> ScorecardResult<Surface> {
    let size = layout
        .avatar_overlay
        .size()
        .ok_or_else(|| ScorecardError::config("avatar overlay rectangle is empty"))?;
    let recolored = hsb.apply(overlay)?;
    resize_if_necessary(&recolored, size)
}

#[cfg(test)]
#[path = "../../tests/unit/layers/avatar.rs"]
mod tests;
