use crate::cli::ServeArgs;
use crate::infra::{demo_directory, AppState, InMemoryPageStore};
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use landing_page::branding::DocumentThemeSink;
use landing_page::config::AppConfig;
use landing_page::error::AppError;
use landing_page::page::TemplateCatalog;
use landing_page::site::LandingPageService;
use landing_page::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let theme = Arc::new(DocumentThemeSink::new());

    let platform = config.platform.clone();
    let catalog = TemplateCatalog::standard();
    if catalog.get(&platform.default_template).is_none() {
        warn!(
            template = %platform.default_template,
            "configured default template does not exist; using the built-in default"
        );
    }
    let catalog = catalog.with_default(&platform.default_template);

    let store = Arc::new(InMemoryPageStore::default());
    let tenants = Arc::new(demo_directory(platform.base_domain.clone()));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        theme: theme.clone(),
        tenants: tenants.clone(),
    };
    let site_service = Arc::new(
        LandingPageService::new(store, tenants, catalog, platform.system_brand)
            .with_theme_sink(theme),
    );

    let app = with_site_routes(site_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "landing page service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
