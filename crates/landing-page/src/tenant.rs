//! Mapping inbound hostnames to tenants and their domain branding.

use crate::branding::BrandingProfile;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Key under which a tenant's page document is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantKey(pub String);

impl TenantKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantMatch {
    pub tenant_key: TenantKey,
    pub display_name: String,
    pub branding: Option<BrandingProfile>,
}

/// Domain lookup collaborator. `None` means a default deployment.
pub trait TenantResolver: Send + Sync {
    fn resolve(&self, host: &str) -> Option<TenantMatch>;
}

#[derive(Debug, Clone)]
pub struct TenantRecord {
    pub tenant_key: TenantKey,
    pub display_name: String,
    pub slug: String,
    pub custom_domains: Vec<String>,
    pub branding: Option<BrandingProfile>,
}

impl TenantRecord {
    fn to_match(&self) -> TenantMatch {
        TenantMatch {
            tenant_key: self.tenant_key.clone(),
            display_name: self.display_name.clone(),
            branding: self.branding.clone(),
        }
    }
}

/// In-process tenant directory keyed by custom domain and platform subdomain.
#[derive(Debug, Clone, Default)]
pub struct StaticTenantDirectory {
    base_domain: Option<String>,
    records: Vec<TenantRecord>,
    by_domain: HashMap<String, usize>,
    by_slug: HashMap<String, usize>,
}

impl StaticTenantDirectory {
    pub fn new(base_domain: Option<String>) -> Self {
        Self {
            base_domain: base_domain.map(|domain| normalize_host(&domain)),
            ..Self::default()
        }
    }

    pub fn insert(&mut self, record: TenantRecord) {
        let index = self.records.len();
        for domain in &record.custom_domains {
            self.by_domain.insert(normalize_host(domain), index);
        }
        self.by_slug.insert(record.slug.to_ascii_lowercase(), index);
        self.records.push(record);
    }

    pub fn with(mut self, record: TenantRecord) -> Self {
        self.insert(record);
        self
    }

    fn slug_for<'h>(&self, host: &'h str) -> Option<&'h str> {
        let base = self.base_domain.as_deref()?;
        let prefix = host.strip_suffix(base)?.strip_suffix('.')?;
        if prefix.is_empty() || prefix.contains('.') {
            return None;
        }
        Some(prefix)
    }
}

impl TenantResolver for StaticTenantDirectory {
    fn resolve(&self, host: &str) -> Option<TenantMatch> {
        let host = normalize_host(host);
        let index = self
            .by_domain
            .get(&host)
            .or_else(|| self.slug_for(&host).and_then(|slug| self.by_slug.get(slug)))?;
        self.records.get(*index).map(TenantRecord::to_match)
    }
}

/// Lowercase, drop the port, a trailing dot and a leading `www.`.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().to_ascii_lowercase();
    let host = match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name.to_string(),
        _ => host.clone(),
    };
    let host = host.trim_end_matches('.');
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branding::BrandingOverrides;

    fn directory() -> StaticTenantDirectory {
        StaticTenantDirectory::new(Some("pages.example.com".to_string())).with(TenantRecord {
            tenant_key: TenantKey::new("tenant-acme"),
            display_name: "Acme Barbers".to_string(),
            slug: "acme".to_string(),
            custom_domains: vec!["acmebarbers.com".to_string()],
            branding: Some(BrandingProfile::tenant(BrandingOverrides {
                display_name: Some("Acme Barbers".to_string()),
                ..BrandingOverrides::default()
            })),
        })
    }

    #[test]
    fn normalizes_hosts() {
        assert_eq!(normalize_host("WWW.AcmeBarbers.com:8443"), "acmebarbers.com");
        assert_eq!(normalize_host("acme.pages.example.com."), "acme.pages.example.com");
        assert_eq!(normalize_host("localhost"), "localhost");
    }

    #[test]
    fn resolves_custom_domain_and_subdomain() {
        let directory = directory();
        let by_domain = directory.resolve("www.acmebarbers.com").expect("domain match");
        assert_eq!(by_domain.tenant_key, TenantKey::new("tenant-acme"));

        let by_slug = directory
            .resolve("Acme.pages.example.com:3000")
            .expect("subdomain match");
        assert_eq!(by_slug.display_name, "Acme Barbers");
        assert!(by_slug.branding.is_some());
    }

    #[test]
    fn unmatched_hosts_are_default_deployments() {
        let directory = directory();
        assert!(directory.resolve("pages.example.com").is_none());
        assert!(directory.resolve("deep.acme.pages.example.com").is_none());
        assert!(directory.resolve("other.pages.example.com").is_none());
        assert!(directory.resolve("example.org").is_none());
    }
}
