use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Errors raised while parsing colour tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    #[error("invalid color format '{0}': expected #rgb, #rrggbb or an 'H S% L%' triple")]
    InvalidColorFormat(String),
}

/// Hue/saturation/lightness triple stored the way CSS variables consume it.
///
/// Hue is in whole degrees (`0..360`), saturation and lightness in whole
/// percent (`0..=100`). Displays as `"H S% L%"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HslColor {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl HslColor {
    pub const fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue: hue % 360,
            saturation: if saturation > 100 { 100 } else { saturation },
            lightness: if lightness > 100 { 100 } else { lightness },
        }
    }

    pub fn to_hex(self) -> String {
        hsl_to_hex(self)
    }

    /// `hsl(...)` functional notation, for contexts without variable support.
    pub fn to_css_function(self) -> String {
        format!("hsl({} {}% {}%)", self.hue, self.saturation, self.lightness)
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}% {}%", self.hue, self.saturation, self.lightness)
    }
}

impl FromStr for HslColor {
    type Err = ThemeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.starts_with('#') || is_bare_hex(trimmed) {
            return hex_to_hsl(trimmed);
        }
        parse_triple(trimmed).ok_or_else(|| ThemeError::InvalidColorFormat(raw.to_string()))
    }
}

impl Serialize for HslColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HslColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Convert an RGB hex colour (`#rrggbb` or `#rgb`, `#` optional) to HSL.
pub fn hex_to_hsl(hex: &str) -> Result<HslColor, ThemeError> {
    let (r, g, b) = parse_hex(hex).ok_or_else(|| ThemeError::InvalidColorFormat(hex.to_string()))?;
    Ok(rgb_to_hsl(r, g, b))
}

pub fn hsl_to_hex(color: HslColor) -> String {
    let h = f64::from(color.hue) / 360.0;
    let s = f64::from(color.saturation) / 100.0;
    let l = f64::from(color.lightness) / 100.0;

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    format!(
        "#{:02x}{:02x}{:02x}",
        to_byte(r),
        to_byte(g),
        to_byte(b)
    )
}

fn rgb_to_hsl(r: u8, g: u8, b: u8) -> HslColor {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;

    // Achromatic: hue and saturation are undefined, report zero.
    if max == min {
        return HslColor::new(0, 0, percent(lightness));
    }

    let delta = max - min;
    let saturation = if lightness > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let hue = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let degrees = (hue * 60.0).round() as u16 % 360;
    HslColor::new(degrees, percent(saturation), percent(lightness))
}

fn parse_hex(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some((r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

fn is_bare_hex(raw: &str) -> bool {
    matches!(raw.len(), 3 | 6) && raw.chars().all(|c| c.is_ascii_hexdigit())
}

fn parse_triple(raw: &str) -> Option<HslColor> {
    let mut parts = raw.split_whitespace();
    let hue = parts.next()?.trim_end_matches("deg").parse::<f64>().ok()?;
    let saturation = parts.next()?.strip_suffix('%')?.parse::<f64>().ok()?;
    let lightness = parts.next()?.strip_suffix('%')?.parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if !(0.0..=100.0).contains(&saturation) || !(0.0..=100.0).contains(&lightness) {
        return None;
    }

    let hue = hue.rem_euclid(360.0).round() as u16 % 360;
    Some(HslColor::new(
        hue,
        saturation.round() as u8,
        lightness.round() as u8,
    ))
}

fn percent(unit: f64) -> u8 {
    (unit * 100.0).round().clamp(0.0, 100.0) as u8
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}
