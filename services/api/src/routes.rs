use crate::infra::AppState;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use landing_page::page::PageStore;
use landing_page::site::{page_router, LandingPageService};
use landing_page::tenant::TenantResolver;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_site_routes<S, T>(service: Arc<LandingPageService<S, T>>) -> axum::Router
where
    S: PageStore + 'static,
    T: TenantResolver + 'static,
{
    page_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/theme.css", axum::routing::get(theme_stylesheet))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Root stylesheet of the page most recently rendered for the request host.
pub(crate) async fn theme_stylesheet(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let tenant = state.tenants.resolve(host).map(|tenant| tenant.tenant_key);

    match state.theme.stylesheet(tenant.as_ref()) {
        Some(css) => (StatusCode::OK, [(header::CONTENT_TYPE, "text/css")], css),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/css")],
            "/* no page rendered yet */\n".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::demo_directory;
    use axum::http::HeaderValue;
    use axum::response::Response;
    use landing_page::branding::{
        AppliedTheme, BrandingOverrides, BrandingProfile, DocumentThemeSink, EffectiveBranding,
        LogoSet, ThemeSink,
    };
    use landing_page::tenant::{TenantKey, TenantRecord};
    use landing_page::theme::{GlobalStyleTokens, HslColor};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;

    fn state(ready: bool) -> AppState {
        let tenants = demo_directory(None).with(TenantRecord {
            tenant_key: TenantKey::new("tenant-harbor"),
            display_name: "Harbor Spa".to_string(),
            slug: "harbor".to_string(),
            custom_domains: vec!["harbor.localhost".to_string()],
            branding: Some(BrandingProfile::tenant(BrandingOverrides::default())),
        });
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            theme: Arc::new(DocumentThemeSink::new()),
            tenants: Arc::new(tenants),
        }
    }

    fn host(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static(value));
        headers
    }

    fn theme(accent: HslColor) -> AppliedTheme {
        let branding = EffectiveBranding {
            display_name: "Demo Barbershop".to_string(),
            tagline: None,
            logos: LogoSet::default(),
            favicon: None,
            primary_color: HslColor::new(222, 47, 11),
            secondary_color: HslColor::new(210, 40, 96),
            accent_color: accent,
        };
        AppliedTheme::new(&GlobalStyleTokens::default(), &branding)
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let waiting = readiness_endpoint(Extension(state(false)))
            .await
            .into_response();
        assert_eq!(waiting.status(), StatusCode::SERVICE_UNAVAILABLE);

        let ready = readiness_endpoint(Extension(state(true))).await.into_response();
        assert_eq!(ready.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn theme_stylesheet_serves_the_host_tenant_theme() {
        let state = state(true);
        let missing = theme_stylesheet(Extension(state.clone()), host("demo.localhost"))
            .await
            .into_response();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        state.theme.apply(
            Some(&TenantKey::new("tenant-demo")),
            &theme(HslColor::new(16, 85, 55)),
        );

        let served = theme_stylesheet(Extension(state), host("demo.localhost"))
            .await
            .into_response();
        assert_eq!(served.status(), StatusCode::OK);
        let css = body_text(served).await;
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--primary: 222 47% 11%;"));
    }

    #[tokio::test]
    async fn theme_stylesheet_never_serves_another_tenants_theme() {
        let state = state(true);
        state.theme.apply(
            Some(&TenantKey::new("tenant-demo")),
            &theme(HslColor::new(16, 85, 55)),
        );
        state.theme.apply(
            Some(&TenantKey::new("tenant-harbor")),
            &theme(HslColor::new(190, 70, 35)),
        );

        let demo = theme_stylesheet(Extension(state.clone()), host("demo.localhost"))
            .await
            .into_response();
        let demo_css = body_text(demo).await;
        assert!(demo_css.contains("--brand-accent: 16 85% 55%;"));
        assert!(!demo_css.contains("190 70% 35%"));

        let harbor = theme_stylesheet(Extension(state.clone()), host("harbor.localhost"))
            .await
            .into_response();
        let harbor_css = body_text(harbor).await;
        assert!(harbor_css.contains("--brand-accent: 190 70% 35%;"));

        let unknown = theme_stylesheet(Extension(state), host("elsewhere.localhost"))
            .await
            .into_response();
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    }
}
