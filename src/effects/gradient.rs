use crate::foundation::core::{CanvasSize, Point, Rgba8};
use crate::foundation::error::ScorecardResult;
use crate::render::surface::Surface;

/// Two-stop linear gradient between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearGradient {
    /// Point where `start_color` is fully applied.
    pub start: Point,
    /// Point where `end_color` is fully applied.
    pub end: Point,
    /// Color at and before `start`.
    pub start_color: Rgba8,
    /// Color at and after `end`.
    pub end_color: Rgba8,
}

impl LinearGradient {
    /// Fill a surface of `size` with the gradient.
    ///
    /// Each pixel center is projected onto the start→end axis. Stops are interpolated as
    /// premultiplied values, the same space compositing blends in.
    pub fn fill(&self, size: CanvasSize) -> ScorecardResult<Surface> {
        let mut out = Surface::transparent(size)?;

        let a = self.start_color.premultiply().to_array();
        let b = self.end_color.premultiply().to_array();
        let axis = self.end - self.start;
        let len2 = axis.hypot2();

        let width = size.width as usize;
        let data = out.data_mut();
        for y in 0..size.height {
            for x in 0..size.width {
                let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                let t = if len2 <= 0.0 {
                    0.0
                } else {
                    ((p - self.start).dot(axis) / len2).clamp(0.0, 1.0)
                };
                let idx = ((y as usize) * width + (x as usize)) * 4;
                for c in 0..4 {
                    let af = f64::from(a[c]);
                    let bf = f64::from(b[c]);
                    data[idx + c] = (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8;
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/gradient.rs"]
mod tests;
