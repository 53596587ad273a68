//! Strategy endpoint handlers

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use validator::Validate;

use super::state::AppState;
use crate::api::types::{
    AnalyzeRequest, AnalyzeResponse, ApiError, GenerateStrategyRequest, GenerateStrategyResponse,
    Json, StatusResponse,
};

/// Create strategy router, nested under `/api/strategy`
pub fn create_strategy_router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_strategy))
        .route("/analyze", post(analyze))
        .route("/status", get(status))
}

/// POST /api/strategy/generate
pub async fn generate_strategy(
    State(state): State<AppState>,
    Json(request): Json<GenerateStrategyRequest>,
) -> Result<Json<GenerateStrategyResponse>, ApiError> {
    // Fires when the client disconnects and axum drops this future
    let cancel = CancellationToken::new();
    let _disconnect = cancel.clone().drop_guard();

    run_generate(&state, request, &cancel).await
}

/// POST /api/strategy/analyze
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let cancel = CancellationToken::new();
    let _disconnect = cancel.clone().drop_guard();

    run_analyze(&state, request, &cancel).await
}

/// GET /api/strategy/status
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let cancel = CancellationToken::new();
    let _disconnect = cancel.clone().drop_guard();

    match tokio::time::timeout(
        state.status_timeout,
        state.strategy_service.is_available(&cancel),
    )
    .await
    {
        Ok(is_available) => Json(StatusResponse::from_availability(is_available)),
        Err(_) => {
            cancel.cancel();
            warn!(
                timeout_secs = state.status_timeout.as_secs(),
                "Provider availability check timed out"
            );
            Json(StatusResponse::error("Unable to check AI service status"))
        }
    }
}

async fn run_generate(
    state: &AppState,
    request: GenerateStrategyRequest,
    cancel: &CancellationToken,
) -> Result<Json<GenerateStrategyResponse>, ApiError> {
    request.validate()?;
    debug!(description_len = request.case_description.len(), "Generating strategy");

    let result = state
        .strategy_service
        .generate_strategy(&request.case_description, cancel)
        .await?;

    Ok(Json(GenerateStrategyResponse::new(
        result,
        request.case_description,
    )))
}

async fn run_analyze(
    state: &AppState,
    request: AnalyzeRequest,
    cancel: &CancellationToken,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    request.validate()?;
    let generation = request.into_generation_request();
    debug!(prompt_len = generation.prompt.len(), "Running analysis");

    let result = state.strategy_service.analyze(&generation, cancel).await?;

    Ok(Json(AnalyzeResponse::from(result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode;

    use crate::config::OpenAiSettings;
    use crate::domain::ai::mock::{Scripted, ScriptedProvider};
    use crate::domain::{AiOrchestrator, AiProvider, AvailabilityProber, ProviderChain, RetryPolicy};
    use crate::infrastructure::precedent::InMemoryPrecedentRepository;
    use crate::infrastructure::services::{PrecedentService, StrategyService};

    fn state(provider: Arc<ScriptedProvider>) -> AppState {
        let chain = ProviderChain::single(provider as Arc<dyn AiProvider>);
        let strategy = StrategyService::new(
            AiOrchestrator::new(chain.clone(), RetryPolicy::default()),
            AvailabilityProber::new(chain),
            &OpenAiSettings::default(),
        );
        let precedents = PrecedentService::new(Arc::new(InMemoryPrecedentRepository::seeded()));

        AppState::new(strategy, precedents, Duration::from_secs(30))
    }

    #[tokio::test(start_paused = true)]
    async fn test_caller_cancellation_returns_408() {
        let provider = Arc::new(ScriptedProvider::new("OpenAI").then(Scripted::Hang));
        let state = state(provider.clone());
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            trigger.cancel();
        });

        let err = run_generate(
            &state,
            GenerateStrategyRequest {
                case_description: "Landlord withholding a security deposit".to_string(),
            },
            &cancel,
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(err.response.error.code.as_deref(), Some("request_cancelled"));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_analyze_with_cancelled_token_makes_no_calls() {
        let provider = Arc::new(ScriptedProvider::always_ok("OpenAI", "analysis"));
        let state = state(provider.clone());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = run_analyze(
            &state,
            AnalyzeRequest {
                prompt: "Assess the indemnity clause".to_string(),
                system_prompt: None,
                temperature: None,
                max_tokens: None,
            },
            &cancel,
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(provider.calls(), 0);
    }
}
