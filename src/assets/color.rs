use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;

/// Color as written in config files: `"#RRGGBB"`, `"#RRGGBBAA"`, `{"r","g","b","a"}` with
/// unit floats, or `[r, g, b]` / `[r, g, b, a]` unit floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorDef {
    /// Red in `0..=1`.
    pub r: f64,
    /// Green in `0..=1`.
    pub g: f64,
    /// Blue in `0..=1`.
    pub b: f64,
    /// Alpha in `0..=1`.
    pub a: f64,
}

impl ColorDef {
    /// Build from unit floats.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Quantize to straight RGBA8.
    pub fn to_rgba8(self) -> Rgba8 {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        Rgba8::new(to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a))
    }
}

impl From<ColorDef> for Rgba8 {
    fn from(c: ColorDef) -> Self {
        c.to_rgba8()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Object {
        r: f64,
        g: f64,
        b: f64,
        #[serde(default = "opaque_alpha")]
        a: f64,
    },
    Components(Vec<f64>),
}

fn opaque_alpha() -> f64 {
    1.0
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        match ColorRepr::deserialize(deserializer)? {
            ColorRepr::Hex(s) => parse_hex(&s).map_err(D::Error::custom),
            ColorRepr::Object { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            ColorRepr::Components(v) => match *v.as_slice() {
                [r, g, b] => Ok(Self::rgba(r, g, b, 1.0)),
                [r, g, b, a] => Ok(Self::rgba(r, g, b, a)),
                _ => Err(D::Error::custom(format!(
                    "color array needs 3 or 4 components, got {}",
                    v.len()
                ))),
            },
        }
    }
}

/// `#RRGGBB` or `#RRGGBBAA`, leading `#` optional, any case.
fn parse_hex(input: &str) -> Result<ColorDef, String> {
    let digits = input.trim().trim_start_matches('#');
    if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("expected #RRGGBB or #RRGGBBAA, got \"{input}\""));
    }

    let mut channels = [255u8; 4];
    for (slot, pair) in channels.iter_mut().zip(digits.as_bytes().chunks_exact(2)) {
        let hi = hex_value(pair[0]);
        let lo = hex_value(pair[1]);
        *slot = (hi << 4) | lo;
    }
    let [r, g, b, a] = channels.map(|c| f64::from(c) / 255.0);
    Ok(ColorDef::rgba(r, g, b, a))
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
