use crate::foundation::core::CanvasSize;
use crate::foundation::error::{ScorecardError, ScorecardResult};
use crate::render::surface::Surface;

/// Separable Gaussian blur parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GaussianBlur {
    /// Kernel half-width in pixels; `0` disables the blur.
    pub radius_px: u32,
    /// Standard deviation of the kernel in pixels.
    pub sigma: f32,
}

impl GaussianBlur {
    /// Blur `src` into a new surface. Edges clamp to the nearest pixel.
    pub fn apply(self, src: &Surface) -> ScorecardResult<Surface> {
        if self.radius_px == 0 {
            return Ok(src.clone());
        }

        let kernel = gaussian_kernel_q16(self.radius_px, self.sigma)?;
        let size = src.size();
        let mut tmp = vec![0u8; src.data().len()];
        let mut out = vec![0u8; src.data().len()];

        convolve_axis(src.data(), &mut tmp, size, Axis::Horizontal, &kernel);
        convolve_axis(&tmp, &mut out, size, Axis::Vertical, &kernel);
        Surface::from_premul_bytes(size, out)
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Normalized Gaussian taps in Q16. Taps sum to exactly `1 << 16`.
fn gaussian_kernel_q16(radius: u32, sigma: f32) -> ScorecardResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ScorecardError::asset("blur sigma must be finite and > 0"));
    }

    let r = i64::from(radius);
    let two_sigma_sq = 2.0 * f64::from(sigma).powi(2);
    let raw: Vec<f64> = (-r..=r)
        .map(|i| (-((i * i) as f64) / two_sigma_sq).exp())
        .collect();
    let sum: f64 = raw.iter().sum();
    if sum <= 0.0 || !sum.is_finite() {
        return Err(ScorecardError::asset("gaussian kernel sum is zero"));
    }

    let mut taps: Vec<u32> = raw
        .iter()
        .map(|w| ((w / sum) * Q16_ONE as f64).round().clamp(0.0, Q16_ONE as f64) as u32)
        .collect();
    // Rounding drift goes to the center tap so flat regions stay flat.
    let total: i64 = taps.iter().map(|&t| i64::from(t)).sum();
    let mid = taps.len() / 2;
    taps[mid] = (i64::from(taps[mid]) + Q16_ONE - total).clamp(0, Q16_ONE) as u32;
    Ok(taps)
}

const Q16_ONE: i64 = 1 << 16;

/// One 1-D pass along `axis`. Samples past either end clamp to the edge pixel.
fn convolve_axis(src: &[u8], dst: &mut [u8], size: CanvasSize, axis: Axis, kernel: &[u32]) {
    let (w, h) = (size.width as usize, size.height as usize);
    let (len, lines, along, across) = match axis {
        Axis::Horizontal => (w, h, 1, w),
        Axis::Vertical => (h, w, w, 1),
    };
    let radius = kernel.len() / 2;

    for line in 0..lines {
        let base = line * across;
        for i in 0..len {
            let mut acc = [0u64; 4];
            for (k, &weight) in kernel.iter().enumerate() {
                let j = (i + k).saturating_sub(radius).min(len - 1);
                let idx = (base + j * along) * 4;
                for (a, &v) in acc.iter_mut().zip(&src[idx..idx + 4]) {
                    *a += u64::from(weight) * u64::from(v);
                }
            }
            let out = (base + i * along) * 4;
            for (d, a) in dst[out..out + 4].iter_mut().zip(acc) {
                *d = ((a + (1 << 15)) >> 16).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
