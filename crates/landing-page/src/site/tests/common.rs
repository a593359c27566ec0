use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::branding::{
    AppliedTheme, BrandingOverrides, BrandingProfile, EffectiveBranding, LogoSet, ThemeSink,
};
use crate::page::{PageStore, StoreError, TemplateCatalog};
use crate::site::{page_router, LandingPageService};
use crate::tenant::{StaticTenantDirectory, TenantKey, TenantRecord};
use crate::theme::HslColor;

pub(super) const ACME_HOST: &str = "acme.pages.example.com";
pub(super) const UNKNOWN_HOST: &str = "pages.example.com";

pub(super) fn acme_key() -> TenantKey {
    TenantKey::new("tenant-acme")
}

pub(super) fn system_brand() -> EffectiveBranding {
    EffectiveBranding {
        display_name: "Landing Studio".to_string(),
        tagline: None,
        logos: LogoSet {
            generic: Some("/static/logo.svg".to_string()),
            ..LogoSet::default()
        },
        favicon: Some("/favicon.ico".to_string()),
        primary_color: HslColor::new(0, 0, 10),
        secondary_color: HslColor::new(210, 40, 96),
        accent_color: HslColor::new(38, 92, 50),
    }
}

pub(super) fn directory() -> StaticTenantDirectory {
    StaticTenantDirectory::new(Some("pages.example.com".to_string())).with(TenantRecord {
        tenant_key: acme_key(),
        display_name: "Acme Barbers".to_string(),
        slug: "acme".to_string(),
        custom_domains: vec!["acmebarbers.com".to_string()],
        branding: Some(BrandingProfile::tenant(BrandingOverrides {
            display_name: Some("Acme Barbers".to_string()),
            favicon: Some("/acme.ico".to_string()),
            accent_color: Some(HslColor::new(10, 70, 40)),
            ..BrandingOverrides::default()
        })),
    })
}

pub(super) type TestService = LandingPageService<MemoryPageStore, StaticTenantDirectory>;

pub(super) fn build_service() -> (TestService, Arc<MemoryPageStore>) {
    let store = Arc::new(MemoryPageStore::default());
    let service = LandingPageService::new(
        store.clone(),
        Arc::new(directory()),
        TemplateCatalog::standard(),
        system_brand(),
    );
    (service, store)
}

pub(super) fn stored_document() -> Value {
    json!({
        "template_id": "classic",
        "global_styles": { "primary_color": "#3b82f6" },
        "sections": [
            { "id": "hero", "type": "hero", "order": 0, "variant": "split",
              "settings": { "headline": "Fresh cuts daily" } },
            { "id": "services", "type": "services", "order": 1 },
            { "id": "promo", "type": "countdown", "order": 2 },
            { "id": "team", "type": "team", "order": 3, "enabled": false },
            { "id": "cta", "type": "cta", "order": 4, "variant": "retired-style" }
        ]
    })
}

#[derive(Default, Clone)]
pub(super) struct MemoryPageStore {
    pub(super) documents: Arc<Mutex<HashMap<TenantKey, Value>>>,
}

impl MemoryPageStore {
    pub(super) fn seed(&self, tenant: TenantKey, document: Value) {
        self.documents
            .lock()
            .expect("store mutex poisoned")
            .insert(tenant, document);
    }

    pub(super) fn document(&self, tenant: &TenantKey) -> Option<Value> {
        self.documents
            .lock()
            .expect("store mutex poisoned")
            .get(tenant)
            .cloned()
    }
}

impl PageStore for MemoryPageStore {
    fn get(&self, tenant: &TenantKey) -> Result<Option<Value>, StoreError> {
        Ok(self.document(tenant))
    }

    fn put(&self, tenant: &TenantKey, document: Value) -> Result<(), StoreError> {
        self.seed(tenant.clone(), document);
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl PageStore for UnavailableStore {
    fn get(&self, _tenant: &TenantKey) -> Result<Option<Value>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn put(&self, _tenant: &TenantKey, _document: Value) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct RecordingSink {
    applied: Mutex<Vec<(Option<TenantKey>, AppliedTheme)>>,
}

impl RecordingSink {
    pub(super) fn applied(&self) -> Vec<(Option<TenantKey>, AppliedTheme)> {
        self.applied.lock().expect("sink mutex poisoned").clone()
    }
}

impl ThemeSink for RecordingSink {
    fn apply(&self, tenant: Option<&TenantKey>, theme: &AppliedTheme) {
        self.applied
            .lock()
            .expect("sink mutex poisoned")
            .push((tenant.cloned(), theme.clone()));
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    page_router(Arc::new(service))
}
