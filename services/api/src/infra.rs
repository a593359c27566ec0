use landing_page::branding::{BrandingOverrides, BrandingProfile, DocumentThemeSink, LogoSet};
use landing_page::page::{PageStore, StoreError};
use landing_page::tenant::{StaticTenantDirectory, TenantKey, TenantRecord};
use landing_page::theme::HslColor;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) theme: Arc<DocumentThemeSink>,
    pub(crate) tenants: Arc<StaticTenantDirectory>,
}

/// Page documents held in process memory, one per tenant.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPageStore {
    documents: Arc<Mutex<HashMap<TenantKey, Value>>>,
}

impl PageStore for InMemoryPageStore {
    fn get(&self, tenant: &TenantKey) -> Result<Option<Value>, StoreError> {
        let guard = self.documents.lock().expect("page store mutex poisoned");
        Ok(guard.get(tenant).cloned())
    }

    fn put(&self, tenant: &TenantKey, document: Value) -> Result<(), StoreError> {
        let mut guard = self.documents.lock().expect("page store mutex poisoned");
        guard.insert(tenant.clone(), document);
        Ok(())
    }
}

/// Single demo tenant reachable at `demo.localhost` or `demo.<base domain>`.
pub(crate) fn demo_directory(base_domain: Option<String>) -> StaticTenantDirectory {
    StaticTenantDirectory::new(base_domain).with(TenantRecord {
        tenant_key: TenantKey::new("tenant-demo"),
        display_name: "Demo Barbershop".to_string(),
        slug: "demo".to_string(),
        custom_domains: vec!["demo.localhost".to_string()],
        branding: Some(BrandingProfile::tenant(BrandingOverrides {
            display_name: Some("Demo Barbershop".to_string()),
            tagline: Some("Walk-ins welcome".to_string()),
            logos: LogoSet {
                generic: Some("/static/demo-logo.svg".to_string()),
                ..LogoSet::default()
            },
            accent_color: Some(HslColor::new(16, 85, 55)),
            ..BrandingOverrides::default()
        })),
    })
}
