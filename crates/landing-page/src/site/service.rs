use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::branding::{
    effective_tokens, AppliedTheme, BrandingCascade, BrandingProfile, DisplayMode,
    EffectiveBranding, ThemeSink,
};
use crate::page::{
    apply_template, load_document, prepare_for_save, Edit, EditError, FooterSettings,
    LoadOutcome, PageConfiguration, PageStore, Placement, SeoConfig, StoreError, TemplateCatalog,
    TemplateSummary,
};
use crate::render::{compose, DataProviders, DispatchTable, RenderPlan};
use crate::sections::{SectionId, SectionRegistry};
use crate::tenant::{TenantKey, TenantMatch, TenantResolver};
use crate::theme::GlobalStyleTokens;

/// Error raised by the landing page service.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("no tenant is configured for host '{0}'")]
    UnknownTenant(String),
    #[error("template '{0}' does not exist")]
    UnknownTemplate(String),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Everything the presentation layer needs to draw one tenant's page.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<TenantKey>,
    pub template_id: String,
    pub branding: EffectiveBranding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub styles: GlobalStyleTokens,
    pub stylesheet: String,
    pub seo: SeoConfig,
    pub footer: FooterSettings,
    pub plan: RenderPlan,
}

/// Service composing tenant lookup, the page store and the composition engine.
pub struct LandingPageService<S, T> {
    store: Arc<S>,
    tenants: Arc<T>,
    registry: Arc<SectionRegistry>,
    catalog: Arc<TemplateCatalog>,
    dispatch: Arc<DispatchTable>,
    branding: BrandingCascade,
    theme_sink: Option<Arc<dyn ThemeSink>>,
    edit_locks: Mutex<HashMap<TenantKey, Arc<Mutex<()>>>>,
}

impl<S, T> LandingPageService<S, T>
where
    S: PageStore + 'static,
    T: TenantResolver + 'static,
{
    pub fn new(
        store: Arc<S>,
        tenants: Arc<T>,
        catalog: TemplateCatalog,
        system_brand: EffectiveBranding,
    ) -> Self {
        Self {
            store,
            tenants,
            registry: Arc::new(SectionRegistry::standard()),
            catalog: Arc::new(catalog),
            dispatch: Arc::new(DispatchTable::standard()),
            branding: BrandingCascade::new(system_brand),
            theme_sink: None,
            edit_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_dispatch(mut self, dispatch: DispatchTable) -> Self {
        self.dispatch = Arc::new(dispatch);
        self
    }

    /// Push every rendered theme into `sink`.
    pub fn with_theme_sink(mut self, sink: Arc<dyn ThemeSink>) -> Self {
        self.theme_sink = Some(sink);
        self
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn templates(&self) -> Vec<TemplateSummary> {
        self.catalog.summaries()
    }

    pub fn tenant_for_host(&self, host: &str) -> Option<TenantMatch> {
        self.tenants.resolve(host)
    }

    /// Stored page for `host` reconciled against its template. Hosts with no
    /// tenant get the default template.
    pub fn page_config(&self, host: &str) -> Result<LoadOutcome, SiteError> {
        let tenant = self.tenant_for_host(host);
        self.load(tenant.as_ref().map(|tenant| &tenant.tenant_key))
    }

    /// Compose the page for `host` and publish its theme.
    pub fn render_page(
        &self,
        host: &str,
        custom: Option<&BrandingProfile>,
        providers: &DataProviders,
    ) -> Result<PageView, SiteError> {
        let tenant = self.tenant_for_host(host);
        let tenant_key = tenant.as_ref().map(|tenant| &tenant.tenant_key);
        let LoadOutcome { config, warnings } = self.load(tenant_key)?;

        let tenant_profile = tenant.as_ref().and_then(|tenant| tenant.branding.as_ref());
        let branding = self.branding.resolve(tenant_profile, custom);
        let styles = effective_tokens(
            &config.global_styles,
            custom.into_iter().chain(tenant_profile),
        );

        let theme = AppliedTheme::new(&styles, &branding);
        if let Some(sink) = &self.theme_sink {
            sink.apply(tenant_key, &theme);
        }

        let plan = compose(&config, &self.registry, &self.dispatch)
            .with_leading_warnings(warnings)
            .bind(providers);
        debug!(
            host,
            sections = plan.len(),
            warnings = plan.warnings.len(),
            "page composed"
        );

        Ok(PageView {
            tenant: tenant.map(|tenant| tenant.tenant_key),
            template_id: config.template_id,
            logo: branding.logo_for(DisplayMode::Light).map(str::to_string),
            branding,
            styles,
            stylesheet: theme.stylesheet(),
            seo: config.seo,
            footer: config.footer,
            plan,
        })
    }

    /// Reconcile a builder document and persist it for the host's tenant.
    ///
    /// The outcome carries the persisted configuration and every section the
    /// reconciliation dropped, so the builder can tell the editor about them.
    pub fn save(&self, host: &str, document: Value) -> Result<LoadOutcome, SiteError> {
        self.save_at(host, document, Utc::now())
    }

    pub fn save_at(
        &self,
        host: &str,
        document: Value,
        now: DateTime<Utc>,
    ) -> Result<LoadOutcome, SiteError> {
        let tenant = self.require_tenant(host)?;
        let LoadOutcome { config, warnings } =
            load_document(&self.registry, &self.catalog, Some(document));
        for warning in &warnings {
            warn!(
                tenant = %tenant.tenant_key,
                section_id = %warning.section_id(),
                %warning,
                "section dropped from saved page"
            );
        }

        let lock = self.edit_lock(&tenant.tenant_key);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let config = self.persist(&tenant.tenant_key, &config, now)?;
        Ok(LoadOutcome { config, warnings })
    }

    pub fn reorder(
        &self,
        host: &str,
        from: &SectionId,
        to: &SectionId,
        placement: Placement,
    ) -> Result<PageConfiguration, SiteError> {
        self.apply_edit(
            host,
            &Edit::Reorder {
                from: from.clone(),
                to: to.clone(),
                placement,
            },
        )
    }

    pub fn set_enabled(
        &self,
        host: &str,
        section_id: &SectionId,
        enabled: bool,
    ) -> Result<PageConfiguration, SiteError> {
        self.apply_edit(
            host,
            &Edit::SetEnabled {
                section_id: section_id.clone(),
                enabled,
            },
        )
    }

    pub fn apply_template(
        &self,
        host: &str,
        template_id: &str,
    ) -> Result<PageConfiguration, SiteError> {
        let template = self
            .catalog
            .get(template_id)
            .ok_or_else(|| SiteError::UnknownTemplate(template_id.to_string()))?;
        let tenant = self.require_tenant(host)?;
        let lock = self.edit_lock(&tenant.tenant_key);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.load(Some(&tenant.tenant_key))?.config;
        self.persist(&tenant.tenant_key, &apply_template(&current, template), Utc::now())
    }

    /// Load, edit and persist the host tenant's page in one step.
    ///
    /// Edits to the same tenant are serialized through this service, so two
    /// concurrent edits both land instead of the later write discarding the
    /// earlier one.
    pub fn apply_edit(&self, host: &str, edit: &Edit) -> Result<PageConfiguration, SiteError> {
        let tenant = self.require_tenant(host)?;
        let lock = self.edit_lock(&tenant.tenant_key);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.load(Some(&tenant.tenant_key))?.config;
        let edited = edit.apply(&current, &self.registry)?;
        self.persist(&tenant.tenant_key, &edited, Utc::now())
    }

    fn edit_lock(&self, tenant: &TenantKey) -> Arc<Mutex<()>> {
        let mut locks = self
            .edit_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks.entry(tenant.clone()).or_default().clone()
    }

    fn require_tenant(&self, host: &str) -> Result<TenantMatch, SiteError> {
        self.tenant_for_host(host)
            .ok_or_else(|| SiteError::UnknownTenant(host.to_string()))
    }

    fn load(&self, tenant: Option<&TenantKey>) -> Result<LoadOutcome, SiteError> {
        let document = match tenant {
            Some(key) => self.store.get(key)?,
            None => None,
        };
        Ok(load_document(&self.registry, &self.catalog, document))
    }

    fn persist(
        &self,
        tenant: &TenantKey,
        config: &PageConfiguration,
        now: DateTime<Utc>,
    ) -> Result<PageConfiguration, SiteError> {
        let prepared = prepare_for_save(config, now);
        let document = serde_json::to_value(&prepared).map_err(StoreError::from)?;
        self.store.put(tenant, document)?;
        info!(%tenant, sections = prepared.sections.len(), "page saved");
        Ok(prepared)
    }
}
