use axum::{
    http::{HeaderValue, Method},
    routing::get,
};
use axum_prometheus::PrometheusMetricLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use portfolio_server::config::Config;
use portfolio_server::og::OgResolver;
use portfolio_server::routes;
use portfolio_server::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing — JSON in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("portfolio_server=info,tower_http=info"));

    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("🚀 Portfolio server starting...");

    let config = Config::from_env().expect("Failed to load configuration");
    info!("📝 Configuration loaded");

    let resolver =
        OgResolver::new(&config.resolver_config()).expect("Failed to build HTTP client");
    info!(
        timeout_secs = config.og_fetch_timeout.as_secs(),
        max_body_bytes = config.og_max_body_bytes,
        "🔎 OG resolver ready"
    );

    // CORS: permissive in dev, ALLOWED_ORIGINS only in production.
    let cors = if config.is_dev {
        info!("🔓 CORS: permissive (dev mode)");
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring unparsable ALLOWED_ORIGINS entry");
                    None
                }
            })
            .collect();
        if origins.is_empty() {
            tracing::warn!(
                "🔒 CORS: restrictive (production mode). \
                 Cross-origin requests will be denied. \
                 Set ALLOWED_ORIGINS to allow specific origins."
            );
        }
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
    };

    let addr = config.server_addr();
    let app_state = AppState { resolver };

    // Prometheus metrics layer
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app = routes::api_router(app_state)
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    info!("🎧 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
