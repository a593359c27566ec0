use super::profile::{BrandOrigin, BrandingProfile, EffectiveBranding};
use crate::merge::cascade;
use crate::theme::GlobalStyleTokens;

/// Resolve system, tenant and account branding into one profile.
///
/// Priority, low to high: system, custom (account), tenant (domain).
/// Each field is taken from the highest layer that sets it.
pub fn resolve(
    system: &EffectiveBranding,
    tenant: Option<&BrandingProfile>,
    custom: Option<&BrandingProfile>,
) -> EffectiveBranding {
    let layers: Vec<&BrandingProfile> = [custom, tenant].into_iter().flatten().collect();
    resolve_profiles(system, layers)
}

/// Resolve an arbitrary set of override profiles over the system layer.
///
/// Profiles are applied in origin priority order regardless of the order
/// they are passed in; profiles of equal origin keep their relative order.
pub fn resolve_profiles<'a, I>(system: &EffectiveBranding, profiles: I) -> EffectiveBranding
where
    I: IntoIterator<Item = &'a BrandingProfile>,
{
    cascade(system, priority_ordered(profiles))
}

/// Page tokens recoloured by the non-system brand colours.
pub fn effective_tokens<'a, I>(page: &GlobalStyleTokens, profiles: I) -> GlobalStyleTokens
where
    I: IntoIterator<Item = &'a BrandingProfile>,
{
    let layers = priority_ordered(profiles)
        .into_iter()
        .filter(|profile| profile.origin != BrandOrigin::System);
    cascade(page, layers)
}

fn priority_ordered<'a, I>(profiles: I) -> Vec<&'a BrandingProfile>
where
    I: IntoIterator<Item = &'a BrandingProfile>,
{
    let mut ordered: Vec<&BrandingProfile> = profiles.into_iter().collect();
    ordered.sort_by_key(|profile| profile.origin);
    ordered
}

/// Holder for the process-wide system layer.
#[derive(Debug, Clone)]
pub struct BrandingCascade {
    system: EffectiveBranding,
}

impl BrandingCascade {
    pub fn new(system: EffectiveBranding) -> Self {
        Self { system }
    }

    pub fn system(&self) -> &EffectiveBranding {
        &self.system
    }

    pub fn resolve(
        &self,
        tenant: Option<&BrandingProfile>,
        custom: Option<&BrandingProfile>,
    ) -> EffectiveBranding {
        resolve(&self.system, tenant, custom)
    }
}
