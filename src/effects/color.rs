use crate::foundation::error::{ScorecardError, ScorecardResult};
use crate::foundation::math::unit_to_u8;
use crate::render::surface::Surface;

/// Hue/saturation/brightness adjustment applied in straight-alpha HSB space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HsbTransform {
    /// Hue rotation in degrees; wraps at 360.
    pub hue_shift_deg: i32,
    /// Saturation multiplier; `1.0` keeps saturation.
    pub saturation: f32,
    /// Brightness offset in `-1..=1`; `0.0` keeps brightness.
    pub brightness: f32,
}

impl HsbTransform {
    /// Rotate hue and scale saturation, leaving brightness unchanged.
    pub fn hue_saturation(hue_shift_deg: i32, saturation: f32) -> Self {
        Self {
            hue_shift_deg,
            saturation,
            brightness: 0.0,
        }
    }

    /// True when applying the transform would not change any pixel.
    pub fn is_identity(&self) -> bool {
        self.hue_shift_deg.rem_euclid(360) == 0 && self.saturation == 1.0 && self.brightness == 0.0
    }

    /// Apply to every pixel of `src`, returning a new surface. Alpha is preserved.
    pub fn apply(&self, src: &Surface) -> ScorecardResult<Surface> {
        if !self.saturation.is_finite() || self.saturation < 0.0 {
            return Err(ScorecardError::asset(
                "hsb saturation must be finite and >= 0",
            ));
        }
        if !self.brightness.is_finite() {
            return Err(ScorecardError::asset("hsb brightness must be finite"));
        }
        if self.is_identity() {
            return Ok(src.clone());
        }

        let shift = self.hue_shift_deg.rem_euclid(360) as f32;
        let mut out = src.clone();
        for px in out.data_mut().chunks_exact_mut(4) {
            let a = px[3];
            if a == 0 {
                continue;
            }
            let af = f32::from(a) / 255.0;
            let straight = [0, 1, 2].map(|c| (f32::from(px[c]) / 255.0 / af).min(1.0));

            let (h, s, v) = rgb_to_hsv(straight);
            let h = (h + shift).rem_euclid(360.0);
            let s = (s * self.saturation).clamp(0.0, 1.0);
            let v = (v + self.brightness).clamp(0.0, 1.0);
            let rgb = hsv_to_rgb(h, s, v);

            for c in 0..3 {
                px[c] = unit_to_u8(rgb[c] * af);
            }
        }
        Ok(out)
    }
}

fn rgb_to_hsv([r, g, b]: [f32; 3]) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta <= f32::EPSILON {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let s = if max <= 0.0 { 0.0 } else { delta / max };
    (h, s, max)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let c = v * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    [r + m, g + m, b + m]
}

#[cfg(test)]
#[path = "../../tests/unit/effects/color.rs"]
mod tests;
