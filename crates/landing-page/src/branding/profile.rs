use crate::merge::{overlay_fields, Overlay};
use crate::theme::{css_block, GlobalStyleTokens, HslColor};
use serde::{Deserialize, Serialize};

/// Where a branding profile comes from. Declaration order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandOrigin {
    /// Process-wide defaults, alive from boot to shutdown.
    System,
    /// Per-account preference, resolved per session.
    Custom,
    /// Domain-bound white label, resolved per request.
    Tenant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Light,
    Dark,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Optional subset of identity fields contributed by one origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandingOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default)]
    pub logos: LogoSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<HslColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<HslColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<HslColor>,
}

impl BrandingOverrides {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandingProfile {
    pub origin: BrandOrigin,
    #[serde(flatten)]
    pub overrides: BrandingOverrides,
}

impl BrandingProfile {
    pub fn new(origin: BrandOrigin, overrides: BrandingOverrides) -> Self {
        Self { origin, overrides }
    }

    pub fn tenant(overrides: BrandingOverrides) -> Self {
        Self::new(BrandOrigin::Tenant, overrides)
    }

    pub fn custom(overrides: BrandingOverrides) -> Self {
        Self::new(BrandOrigin::Custom, overrides)
    }
}

/// Complete branding after the cascade. The system layer guarantees the
/// mandatory fields; logos and favicon may still be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveBranding {
    pub display_name: String,
    pub tagline: Option<String>,
    pub logos: LogoSet,
    pub favicon: Option<String>,
    pub primary_color: HslColor,
    pub secondary_color: HslColor,
    pub accent_color: HslColor,
}

impl EffectiveBranding {
    /// Mode-specific logo, then the generic one. `None` leaves the final
    /// fallback asset to the caller.
    pub fn logo_for(&self, mode: DisplayMode) -> Option<&str> {
        let specific = match mode {
            DisplayMode::Light => self.logos.light.as_deref(),
            DisplayMode::Dark => self.logos.dark.as_deref(),
        };
        specific.or(self.logos.generic.as_deref())
    }

    pub fn css_variables(&self) -> Vec<(String, String)> {
        vec![
            ("--brand-primary".to_string(), self.primary_color.to_string()),
            (
                "--brand-secondary".to_string(),
                self.secondary_color.to_string(),
            ),
            ("--brand-accent".to_string(), self.accent_color.to_string()),
        ]
    }

    pub fn to_css_block(&self) -> String {
        css_block(&self.css_variables())
    }
}

impl Overlay<EffectiveBranding> for BrandingOverrides {
    fn overlay_onto(&self, base: &mut EffectiveBranding) {
        overlay_fields!(set self => base; display_name, primary_color, secondary_color, accent_color);
        overlay_fields!(wrap self => base; tagline, favicon);
        overlay_fields!(wrap self.logos => base.logos; generic, light, dark, icon);
    }
}

/// Brand colours also recolour the page tokens they correspond to.
impl Overlay<GlobalStyleTokens> for BrandingOverrides {
    fn overlay_onto(&self, base: &mut GlobalStyleTokens) {
        overlay_fields!(set self => base; primary_color, secondary_color, accent_color);
    }
}

impl Overlay<EffectiveBranding> for BrandingProfile {
    fn overlay_onto(&self, base: &mut EffectiveBranding) {
        self.overrides.overlay_onto(base);
    }
}

impl Overlay<GlobalStyleTokens> for BrandingProfile {
    fn overlay_onto(&self, base: &mut GlobalStyleTokens) {
        self.overrides.overlay_onto(base);
    }
}
