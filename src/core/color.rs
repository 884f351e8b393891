//! Display colors for segments and the harmonic palette used to assign them.

use serde::{Deserialize, Serialize};

/// Golden angle in degrees; consecutive hues land far apart on the wheel.
const GOLDEN_ANGLE_DEG: f64 = 137.508;
const PALETTE_SATURATION: f64 = 0.5;
const PALETTE_VALUE: f64 = 0.95;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fallback used when an imported row carries no usable color.
    pub const fn neutral() -> Self {
        Self::rgb(0xcc, 0xcc, 0xcc)
    }

    /// Lowercase `#rrggbb`; alpha is dropped.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional).
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let expanded = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => hex.to_string(),
            _ => return None,
        };
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&expanded[range], 16).ok();
        Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// CSS `rgba(...)` string for inline styles.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            f64::from(self.a) / 255.0
        )
    }

    /// Brighten by `percent` (120 = 20% brighter). Once the value channel
    /// saturates, the overflow is taken out of the saturation instead.
    pub fn lighter(&self, percent: u32) -> Self {
        let (h, s, v) = rgb_to_hsv(self.r, self.g, self.b);
        let mut s = s * 255.0;
        let mut v = v * 255.0 * f64::from(percent) / 100.0;
        if v > 255.0 {
            s = (s - (v - 255.0)).max(0.0);
            v = 255.0;
        }
        let (r, g, b) = hsv_to_rgb(h, s / 255.0, v / 255.0);
        Self { r, g, b, a: self.a }
    }
}

/// Deterministic color for the segment created at position `index`.
pub fn harmonic_color(index: usize) -> Color {
    let hue = (index as f64 * GOLDEN_ANGLE_DEG) % 360.0;
    let (r, g, b) = hsv_to_rgb(hue / 360.0, PALETTE_SATURATION, PALETTE_VALUE);
    Color::rgb(r, g, b)
}

/// `h`, `s`, `v` in 0.0..=1.0. Channels are truncated, not rounded.
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let to_byte = |x: f64| (x.clamp(0.0, 1.0) * 255.0) as u8;
    if s == 0.0 {
        return (to_byte(v), to_byte(v), to_byte(v));
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    (to_byte(r), to_byte(g), to_byte(b))
}

fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let (r, g, b) = (f64::from(r) / 255.0, f64::from(g) / 255.0, f64::from(b) / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if max == 0.0 || delta == 0.0 {
        return (0.0, 0.0, max);
    }
    let hue = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    (hue / 6.0, delta / max, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_palette_entries() {
        assert_eq!(harmonic_color(0), Color::rgb(242, 121, 121));
        assert_eq!(harmonic_color(1), Color::rgb(121, 242, 156));
    }

    #[test]
    fn test_palette_is_deterministic() {
        for idx in 0..32 {
            assert_eq!(harmonic_color(idx), harmonic_color(idx));
        }
        assert_ne!(harmonic_color(2), harmonic_color(3));
    }

    #[test]
    fn test_hex_formatting_and_parsing() {
        let color = Color::rgb(0x3a, 0x4a, 0x7a);
        assert_eq!(color.to_hex(), "#3a4a7a");
        assert_eq!(Color::from_hex("#3a4a7a"), Some(color));
        assert_eq!(Color::from_hex("ccc"), Some(Color::neutral()));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_lighter_brightens_without_wrapping() {
        let base = harmonic_color(0);
        let light = base.lighter(120);
        assert_eq!(light.r, 255);
        assert!(light.g > base.g);
        assert!(light.b > base.b);

        let white = Color::rgb(255, 255, 255).lighter(150);
        assert_eq!(white, Color::rgb(255, 255, 255));
    }
}
