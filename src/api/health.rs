//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::state::AppState;
use crate::api::types::Json;

pub const WELCOME_MESSAGE: &str = "Welcome to the Legal Strategy Advisor API!";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Service health including whether any AI provider is reachable
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiHealthResponse {
    pub status: HealthStatus,
    pub ai_available: bool,
    pub timestamp: DateTime<Utc>,
}

pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

/// Simple health check - returns 200 if the service is running
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Liveness check - simple check to verify the service is running
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Always healthy; a slow or failing probe fan-out reports `aiAvailable: false`
pub async fn ai_health_check(State(state): State<AppState>) -> impl IntoResponse {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let ai_available = tokio::time::timeout(
        state.status_timeout,
        state.strategy_service.is_available(&cancel),
    )
    .await
    .unwrap_or(false);

    Json(AiHealthResponse {
        status: HealthStatus::Healthy,
        ai_available,
        timestamp: Utc::now(),
    })
}
