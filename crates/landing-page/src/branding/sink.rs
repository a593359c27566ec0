use super::profile::EffectiveBranding;
use crate::tenant::TenantKey;
use crate::theme::{css_block, GlobalStyleTokens};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;

/// What gets pushed into the live document once branding is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedTheme {
    pub title: String,
    pub css_variables: Vec<(String, String)>,
    pub favicon: Option<String>,
}

impl AppliedTheme {
    pub fn new(tokens: &GlobalStyleTokens, branding: &EffectiveBranding) -> Self {
        let mut css_variables = tokens.css_variables();
        css_variables.extend(branding.css_variables());
        Self {
            title: branding.display_name.clone(),
            css_variables,
            favicon: branding.favicon.clone(),
        }
    }

    pub fn stylesheet(&self) -> String {
        css_block(&self.css_variables)
    }
}

/// Destination for resolved themes. Resolution itself stays pure.
///
/// `tenant` is `None` for hosts without a tenant, which render the platform
/// default page.
pub trait ThemeSink: Send + Sync {
    fn apply(&self, tenant: Option<&TenantKey>, theme: &AppliedTheme);
}

/// Document themes (root stylesheet, favicon and title) kept per tenant so
/// concurrent tenants never read each other's theme.
#[derive(Debug, Default)]
pub struct DocumentThemeSink {
    themes: RwLock<HashMap<Option<TenantKey>, AppliedTheme>>,
}

impl DocumentThemeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self, tenant: Option<&TenantKey>) -> Option<AppliedTheme> {
        let themes = self
            .themes
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        themes.get(&tenant.cloned()).cloned()
    }

    pub fn stylesheet(&self, tenant: Option<&TenantKey>) -> Option<String> {
        self.current(tenant).map(|theme| theme.stylesheet())
    }

    pub fn favicon(&self, tenant: Option<&TenantKey>) -> Option<String> {
        self.current(tenant).and_then(|theme| theme.favicon)
    }
}

impl ThemeSink for DocumentThemeSink {
    fn apply(&self, tenant: Option<&TenantKey>, theme: &AppliedTheme) {
        let mut themes = self
            .themes
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        themes.insert(tenant.cloned(), theme.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branding::profile::LogoSet;
    use crate::theme::HslColor;

    fn branding() -> EffectiveBranding {
        EffectiveBranding {
            display_name: "Acme".to_string(),
            tagline: None,
            logos: LogoSet::default(),
            favicon: Some("/acme.ico".to_string()),
            primary_color: HslColor::new(200, 80, 50),
            secondary_color: HslColor::new(0, 0, 96),
            accent_color: HslColor::new(38, 92, 50),
        }
    }

    #[test]
    fn document_sink_keeps_latest_theme() {
        let sink = DocumentThemeSink::new();
        let acme = TenantKey::new("acme");
        assert!(sink.stylesheet(Some(&acme)).is_none());

        let theme = AppliedTheme::new(&GlobalStyleTokens::default(), &branding());
        sink.apply(Some(&acme), &theme);

        let css = sink.stylesheet(Some(&acme)).expect("stylesheet present");
        assert!(css.contains("--brand-primary: 200 80% 50%;"));
        assert!(css.contains("--primary: 222 47% 11%;"));
        assert_eq!(sink.favicon(Some(&acme)).as_deref(), Some("/acme.ico"));
        assert_eq!(
            sink.current(Some(&acme)).map(|theme| theme.title),
            Some("Acme".to_string())
        );
        assert!(sink.current(None).is_none());
    }

    #[test]
    fn each_tenant_reads_its_own_theme() {
        let sink = DocumentThemeSink::new();
        let acme = TenantKey::new("acme");
        let globex = TenantKey::new("globex");

        let acme_theme = AppliedTheme::new(&GlobalStyleTokens::default(), &branding());
        let globex_theme = AppliedTheme::new(
            &GlobalStyleTokens::default(),
            &EffectiveBranding {
                display_name: "Globex".to_string(),
                favicon: None,
                primary_color: HslColor::new(120, 60, 40),
                ..branding()
            },
        );
        sink.apply(Some(&acme), &acme_theme);
        sink.apply(Some(&globex), &globex_theme);

        let acme_css = sink.stylesheet(Some(&acme)).expect("acme stylesheet");
        assert!(acme_css.contains("--brand-primary: 200 80% 50%;"));
        let globex_css = sink.stylesheet(Some(&globex)).expect("globex stylesheet");
        assert!(globex_css.contains("--brand-primary: 120 60% 40%;"));
        assert_eq!(sink.favicon(Some(&acme)).as_deref(), Some("/acme.ico"));
        assert!(sink.favicon(Some(&globex)).is_none());
    }
}
