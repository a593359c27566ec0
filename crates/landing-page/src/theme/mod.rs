//! Global style tokens shared by every section of a page.

mod color;

pub use color::{hex_to_hsl, hsl_to_hex, HslColor, ThemeError};

use crate::merge::{lenient, overlay_fields, Overlay};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::warn;

/// Corner rounding applied to cards, buttons and images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusClass {
    None,
    Sm,
    #[default]
    Md,
    Lg,
    Full,
}

impl RadiusClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Full => "full",
        }
    }

    /// Unknown classes resolve to `md`.
    pub fn parse_lossy(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "sm" => Self::Sm,
            "md" => Self::Md,
            "lg" => Self::Lg,
            "full" => Self::Full,
            _ => Self::Md,
        }
    }

    pub const fn css_length(self) -> &'static str {
        match self {
            Self::None => "0",
            Self::Sm => "0.25rem",
            Self::Md => "0.5rem",
            Self::Lg => "1rem",
            Self::Full => "9999px",
        }
    }
}

impl fmt::Display for RadiusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RadiusClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lossy(&raw))
    }
}

/// Map a radius class name to a concrete CSS length.
pub fn resolve_radius(class: &str) -> &'static str {
    RadiusClass::parse_lossy(class).css_length()
}

/// Fully populated token set. Every colour is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStyleTokens {
    pub primary_color: HslColor,
    pub secondary_color: HslColor,
    pub accent_color: HslColor,
    pub background_color: HslColor,
    pub text_color: HslColor,
    pub heading_font: String,
    pub body_font: String,
    pub border_radius: RadiusClass,
}

impl Default for GlobalStyleTokens {
    fn default() -> Self {
        Self {
            primary_color: HslColor::new(222, 47, 11),
            secondary_color: HslColor::new(210, 40, 96),
            accent_color: HslColor::new(38, 92, 50),
            background_color: HslColor::new(0, 0, 100),
            text_color: HslColor::new(222, 47, 11),
            heading_font: "Playfair Display".to_string(),
            body_font: "Inter".to_string(),
            border_radius: RadiusClass::Md,
        }
    }
}

impl GlobalStyleTokens {
    /// `--name: value` pairs in a stable order.
    pub fn css_variables(&self) -> Vec<(String, String)> {
        vec![
            ("--primary".to_string(), self.primary_color.to_string()),
            ("--secondary".to_string(), self.secondary_color.to_string()),
            ("--accent".to_string(), self.accent_color.to_string()),
            ("--background".to_string(), self.background_color.to_string()),
            ("--foreground".to_string(), self.text_color.to_string()),
            ("--font-heading".to_string(), quote_font(&self.heading_font)),
            ("--font-body".to_string(), quote_font(&self.body_font)),
            (
                "--radius".to_string(),
                self.border_radius.css_length().to_string(),
            ),
        ]
    }

    pub fn to_css_block(&self) -> String {
        css_block(&self.css_variables())
    }
}

/// Render `:root { ... }` from variable pairs.
pub fn css_block(variables: &[(String, String)]) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in variables {
        css.push_str("  ");
        css.push_str(name);
        css.push_str(": ");
        css.push_str(value);
        css.push_str(";\n");
    }
    css.push('}');
    css.push('\n');
    css
}

fn quote_font(name: &str) -> String {
    format!("\"{}\", sans-serif", name.replace('"', ""))
}

/// Stored style tokens as they come back from persistence.
///
/// Each field decodes on its own and colours stay raw, so one malformed
/// value only loses that value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialStyleTokens {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub heading_font: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub body_font: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<RadiusClass>,
}

impl From<&GlobalStyleTokens> for PartialStyleTokens {
    fn from(tokens: &GlobalStyleTokens) -> Self {
        Self {
            primary_color: Some(tokens.primary_color.to_string()),
            secondary_color: Some(tokens.secondary_color.to_string()),
            accent_color: Some(tokens.accent_color.to_string()),
            background_color: Some(tokens.background_color.to_string()),
            text_color: Some(tokens.text_color.to_string()),
            heading_font: Some(tokens.heading_font.clone()),
            body_font: Some(tokens.body_font.clone()),
            border_radius: Some(tokens.border_radius),
        }
    }
}

impl Overlay<GlobalStyleTokens> for PartialStyleTokens {
    fn overlay_onto(&self, base: &mut GlobalStyleTokens) {
        overlay_color(&self.primary_color, &mut base.primary_color, "primary_color");
        overlay_color(
            &self.secondary_color,
            &mut base.secondary_color,
            "secondary_color",
        );
        overlay_color(&self.accent_color, &mut base.accent_color, "accent_color");
        overlay_color(
            &self.background_color,
            &mut base.background_color,
            "background_color",
        );
        overlay_color(&self.text_color, &mut base.text_color, "text_color");
        overlay_fields!(set self => base; heading_font, body_font, border_radius);
    }
}

fn overlay_color(raw: &Option<String>, target: &mut HslColor, token: &'static str) {
    let Some(raw) = raw else {
        return;
    };

    match raw.parse::<HslColor>() {
        Ok(color) => *target = color,
        Err(err) => {
            let fallback = *target;
            warn!(token, %err, %fallback, "keeping previous color token");
        }
    }
}
