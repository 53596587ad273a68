use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::precedents;
use super::state::AppState;
use super::strategy;
use crate::infrastructure::observability::{PrometheusMetrics, create_metrics_router};

/// Create the full router with application state
pub fn create_router(
    state: AppState,
    cors_origins: &[String],
    metrics: Option<PrometheusMetrics>,
) -> Router {
    let router = Router::new()
        .route("/", get(health::welcome))
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .route("/api/health", get(health::ai_health_check))
        .nest("/api/strategy", strategy::create_strategy_router())
        .nest("/api/precedents", precedents::create_precedents_router())
        .with_state(state);

    let router = match metrics {
        Some(metrics) => router.merge(create_metrics_router(metrics)),
        None => router,
    };

    router
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// CORS restricted to the configured origins; unparseable origins are skipped
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}
