//! Color strings as stored in settings
//!
//! Settings hold colors as CSS-like strings (`rgba(255, 107, 107, 0.5)`,
//! `rgb(1, 2, 3)` or `#RRGGBB`). Anything unparseable resolves to
//! [`Rgba::FALLBACK`].

use serde::{Deserialize, Serialize};

/// 8-bit RGB with a floating point alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

impl Rgba {
    /// Used whenever a color setting cannot be parsed.
    pub const FALLBACK: Rgba = Rgba::new(99, 162, 255, 0.7);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn parse_or_default(s: &str) -> Self {
        parse_color(s).unwrap_or(Self::FALLBACK)
    }

    /// Channels normalized to `[0, 1]`.
    pub fn to_unit(self) -> UnitColor {
        UnitColor {
            r: self.red as f32 / 255.0,
            g: self.green as f32 / 255.0,
            b: self.blue as f32 / 255.0,
            a: self.alpha.clamp(0.0, 1.0) as f32,
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Normalized color used while drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl UnitColor {
    /// Linear blend of the RGB channels toward `target`; alpha is kept.
    pub fn blend_rgb(self, target: UnitColor, amount: f32) -> UnitColor {
        let t = amount.clamp(0.0, 1.0);
        UnitColor {
            r: self.r * (1.0 - t) + target.r * t,
            g: self.g * (1.0 - t) + target.g * t,
            b: self.b * (1.0 - t) + target.b * t,
            a: self.a,
        }
    }
}

/// Parse `rgb(...)`, `rgba(...)` or `#RRGGBB` / `#RRGGBBAA`.
pub fn parse_color(s: &str) -> Option<Rgba> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let inner = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))?
        .strip_suffix(')')?;

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let red = parts[0].parse::<u8>().ok()?;
    let green = parts[1].parse::<u8>().ok()?;
    let blue = parts[2].parse::<u8>().ok()?;
    let alpha = match parts.get(3) {
        Some(a) => {
            let a = a.parse::<f64>().ok()?;
            if !a.is_finite() {
                return None;
            }
            a.clamp(0.0, 1.0)
        }
        None => 1.0,
    };

    Some(Rgba::new(red, green, blue, alpha))
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some(Rgba::new(channel(0)?, channel(2)?, channel(4)?, 1.0)),
        8 => Some(Rgba::new(
            channel(0)?,
            channel(2)?,
            channel(4)?,
            channel(6)? as f64 / 255.0,
        )),
        _ => None,
    }
}

/// HSL to RGB, `h` in degrees, `s`/`l` in `[0, 1]`. Alpha is 1.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgba {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba::new(to_byte(r), to_byte(g), to_byte(b), 1.0)
}

/// GNOME accent palette.
pub fn accent_color(name: &str) -> Option<Rgba> {
    let color = match name {
        "blue" | "default" => Rgba::new(53, 132, 228, 1.0),
        "teal" => Rgba::new(99, 193, 190, 1.0),
        "green" => Rgba::new(51, 209, 122, 1.0),
        "yellow" => Rgba::new(246, 211, 45, 1.0),
        "orange" => Rgba::new(255, 120, 0, 1.0),
        "red" => Rgba::new(224, 27, 36, 1.0),
        "pink" => Rgba::new(213, 97, 157, 1.0),
        "purple" => Rgba::new(145, 65, 172, 1.0),
        "slate" => Rgba::new(119, 118, 123, 1.0),
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgba() {
        let c = parse_color("rgba(255, 107, 107, 0.5)").unwrap();
        assert_eq!(c, Rgba::new(255, 107, 107, 0.5));
    }

    #[test]
    fn test_parse_rgb_defaults_alpha() {
        let c = parse_color("rgb(1,2,3)").unwrap();
        assert_eq!(c, Rgba::new(1, 2, 3, 1.0));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_color("#ff8000"), Some(Rgba::new(255, 128, 0, 1.0)));
        let c = parse_color("#00000080").unwrap();
        assert!((c.alpha - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(parse_color("#abc"), None);
    }

    #[test]
    fn test_garbage_falls_back() {
        assert_eq!(parse_color("blue"), None);
        assert_eq!(parse_color("rgba(300, 0, 0, 1)"), None);
        assert_eq!(parse_color("rgba(1, 2)"), None);
        assert_eq!(Rgba::parse_or_default("not a color"), Rgba::FALLBACK);
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Rgba::new(255, 0, 0, 1.0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Rgba::new(0, 255, 0, 1.0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), Rgba::new(0, 0, 255, 1.0));
        assert_eq!(hsl_to_rgb(360.0, 1.0, 0.5), Rgba::new(255, 0, 0, 1.0));
    }

    #[test]
    fn test_blend_rgb_keeps_alpha() {
        let base = Rgba::new(0, 0, 0, 0.4).to_unit();
        let target = Rgba::new(255, 255, 255, 1.0).to_unit();
        let mid = base.blend_rgb(target, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert!((mid.a - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_accent_lookup() {
        assert_eq!(accent_color("red"), Some(Rgba::new(224, 27, 36, 1.0)));
        assert_eq!(accent_color("magenta"), None);
    }
}
