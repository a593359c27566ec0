use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::service::{LandingPageService, SiteError};
use crate::branding::{BrandingOverrides, BrandingProfile};
use crate::error::AppError;
use crate::page::{PageStore, Placement};
use crate::render::{DataProviders, DataSource};
use crate::sections::SectionId;
use crate::tenant::TenantResolver;

type SharedService<S, T> = Arc<LandingPageService<S, T>>;

/// Router builder exposing the page, builder and catalog endpoints.
pub fn page_router<S, T>(service: Arc<LandingPageService<S, T>>) -> Router
where
    S: PageStore + 'static,
    T: TenantResolver + 'static,
{
    Router::new()
        .route("/api/v1/page", get(page_handler::<S, T>))
        .route("/api/v1/page/preview", post(preview_handler::<S, T>))
        .route(
            "/api/v1/page/config",
            get(config_handler::<S, T>).put(save_handler::<S, T>),
        )
        .route(
            "/api/v1/page/sections/reorder",
            post(reorder_handler::<S, T>),
        )
        .route(
            "/api/v1/page/sections/:section_id/enabled",
            post(enabled_handler::<S, T>),
        )
        .route("/api/v1/page/template", post(template_handler::<S, T>))
        .route("/api/v1/templates", get(templates_handler::<S, T>))
        .route("/api/v1/sections/registry", get(registry_handler::<S, T>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReorderRequest {
    pub from: SectionId,
    pub to: SectionId,
    #[serde(default = "default_placement")]
    pub placement: Placement,
}

fn default_placement() -> Placement {
    Placement::Before
}

#[derive(Debug, Deserialize)]
pub(crate) struct EnabledRequest {
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TemplateRequest {
    pub template_id: String,
}

/// Account-level branding and provider data for a builder preview.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PreviewRequest {
    #[serde(default)]
    pub branding: Option<BrandingOverrides>,
    #[serde(default)]
    pub data: BTreeMap<DataSource, Value>,
}

pub(crate) async fn page_handler<S, T>(
    State(service): State<SharedService<S, T>>,
    headers: HeaderMap,
) -> Response
where
    S: PageStore + 'static,
    T: TenantResolver + 'static,
{
    match service.render_page(host(&headers), None, &DataProviders::new()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn preview_handler<S, T>(
    State(service): State<SharedService<S, T>>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<PreviewRequest>,
) -> Response
where
    S: PageStore + 'static,
    T: TenantResolver + 'static,
{
    let custom = request.branding.map(BrandingProfile::custom);
    let providers = request
        .data
        .into_iter()
        .fold(DataProviders::new(), |providers, (source, payload)| {
            providers.with(source, payload)
        });

    match service.render_page(host(&headers), custom.as_ref(), &providers) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn config_handler<S, T>(
    State(service): State<SharedService<S, T>>,
    headers: HeaderMap,
) -> Response
where
    S: PageStore + 'static,
    T: TenantResolver + 'static,
{
    match service.page_config(host(&headers)) {
        Ok(outcome) => {
            let payload = json!({
                "config": outcome.config,
                "warnings": outcome.warnings,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn save_handler<S, T>(
    State(service): State<SharedService<S, T>>,
    headers: HeaderMap,
    axum::Json(document): axum::Json<Value>,
) -> Response
where
    S: PageStore + 'static,
    T: TenantResolver + 'static,
{
    match service.save(host(&headers), document) {
        Ok(outcome) => {
            let payload = json!({
                "config": outcome.config,
                "warnings": outcome.warnings,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn reorder_handler<S, T>(
    State(service): State<SharedService<S, T>>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<ReorderRequest>,
) -> Response
where
    S: PageStore + 'static,
    T: TenantResolver + 'static,
{
    match service.reorder(host(&headers), &request.from, &request.to, request.placement) {
        Ok(config) => (StatusCode::OK, axum::Json(config)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn enabled_handler<S, T>(
    State(service): State<SharedService<S, T>>,
    headers: HeaderMap,
    Path(section_id): Path<String>,
    axum::Json(request): axum::Json<EnabledRequest>,
) -> Response
where
    S: PageStore + 'static,
    T: TenantResolver + 'static,
{
    let section_id = SectionId(section_id);
    match service.set_enabled(host(&headers), &section_id, request.enabled) {
        Ok(config) => (StatusCode::OK, axum::Json(config)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn template_handler<S, T>(
    State(service): State<SharedService<S, T>>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<TemplateRequest>,
) -> Response
where
    S: PageStore + 'static,
    T: TenantResolver + 'static,
{
    match service.apply_template(host(&headers), &request.template_id) {
        Ok(config) => (StatusCode::OK, axum::Json(config)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn templates_handler<S, T>(
    State(service): State<SharedService<S, T>>,
) -> Response
where
    S: PageStore + 'static,
    T: TenantResolver + 'static,
{
    (StatusCode::OK, axum::Json(service.templates())).into_response()
}

pub(crate) async fn registry_handler<S, T>(
    State(service): State<SharedService<S, T>>,
) -> Response
where
    S: PageStore + 'static,
    T: TenantResolver + 'static,
{
    (StatusCode::OK, axum::Json(service.registry().descriptors())).into_response()
}

fn host(headers: &HeaderMap) -> &str {
    headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn error_response(err: SiteError) -> Response {
    AppError::from(err).into_response()
}
