//! Branding cascade: system defaults, account preferences and domain
//! white-labeling merged into one effective identity.

mod cascade;
mod profile;
mod sink;

pub use cascade::{effective_tokens, resolve, resolve_profiles, BrandingCascade};
pub use profile::{
    BrandOrigin, BrandingOverrides, BrandingProfile, DisplayMode, EffectiveBranding, LogoSet,
};
pub use sink::{AppliedTheme, DocumentThemeSink, ThemeSink};
