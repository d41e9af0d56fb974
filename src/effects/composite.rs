use crate::effects::resize::resize_stretch;
use crate::foundation::core::{PixelRect, Rgba8};
use crate::foundation::error::ScorecardResult;
use crate::foundation::math::mul_div255_u8;
use crate::render::surface::Surface;

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over of premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255 - u16::from(src[3]);
    std::array::from_fn(|i| src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv)))
}

/// Composite `layer` over `dst` with its top-left corner at `(x, y)`.
///
/// Parts of the layer falling outside `dst` are clipped.
pub fn over_at(dst: &mut Surface, layer: &Surface, x: i32, y: i32) {
    let dw = i64::from(dst.width());
    let dh = i64::from(dst.height());
    let lw = i64::from(layer.width());
    let lh = i64::from(layer.height());

    let x0 = i64::from(x).max(0);
    let y0 = i64::from(y).max(0);
    let x1 = (i64::from(x) + lw).min(dw);
    let y1 = (i64::from(y) + lh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let src = layer.data();
    let out = dst.data_mut();
    for dy in y0..y1 {
        let sy = dy - i64::from(y);
        for dx in x0..x1 {
            let sx = dx - i64::from(x);
            let si = ((sy * lw + sx) * 4) as usize;
            let di = ((dy * dw + dx) * 4) as usize;
            let blended = over(
                [out[di], out[di + 1], out[di + 2], out[di + 3]],
                [src[si], src[si + 1], src[si + 2], src[si + 3]],
            );
            out[di..di + 4].copy_from_slice(&blended);
        }
    }
}

/// Composite `layer` over `dst` at the origin of `region`.
pub fn over_region(dst: &mut Surface, layer: &Surface, region: PixelRect) {
    over_at(dst, layer, region.x, region.y);
}

/// Scale every pixel of `src` by the alpha of `mask`.
///
/// In premultiplied space this multiplies the visible coverage while leaving the straight
/// color untouched. A mask of a different size is stretched to `src` first.
pub fn apply_mask(src: &Surface, mask: &Surface) -> ScorecardResult<Surface> {
    let resized;
    let mask = if mask.size() == src.size() {
        mask
    } else {
        resized = resize_stretch(mask, src.size())?;
        &resized
    };

    let mut out = src.clone();
    for (d, m) in out.data_mut().chunks_exact_mut(4).zip(mask.data().chunks_exact(4)) {
        let w = u16::from(m[3]);
        d[0] = mul_div255_u8(u16::from(d[0]), w);
        d[1] = mul_div255_u8(u16::from(d[1]), w);
        d[2] = mul_div255_u8(u16::from(d[2]), w);
        d[3] = mul_div255_u8(u16::from(d[3]), w);
    }
    Ok(out)
}

/// Multiply each straight channel by the matching channel of `tint` (`255` keeps a
/// channel, `0` removes it).
pub fn tint(src: &Surface, tint: Rgba8) -> Surface {
    let [tr, tg, tb, ta] = [tint.r, tint.g, tint.b, tint.a].map(u16::from);
    let mut out = src.clone();
    for px in out.data_mut().chunks_exact_mut(4) {
        // Premultiplied color scales with both its own factor and the alpha factor.
        px[0] = mul_div255_u8(u16::from(mul_div255_u8(u16::from(px[0]), tr)), ta);
        px[1] = mul_div255_u8(u16::from(mul_div255_u8(u16::from(px[1]), tg)), ta);
        px[2] = mul_div255_u8(u16::from(mul_div255_u8(u16::from(px[2]), tb)), ta);
        px[3] = mul_div255_u8(u16::from(px[3]), ta);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
