//! Legal Strategy Gateway
//!
//! AI-backed legal strategy generation with:
//! - An ordered chain of providers (OpenAI, Azure OpenAI, a Python delegate and a local stub)
//! - Per-provider retries with exponential backoff and failover
//! - A synthetic notice when every provider is exhausted
//! - Precedent search over a static catalog or Postgres

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use api::state::AppState;
use config::{AiConfig, DatabaseConfig};
use domain::{AiOrchestrator, AvailabilityProber, PrecedentRepository, RetryPolicy};
use infrastructure::ai::build_provider_chain;
use infrastructure::precedent::{InMemoryPrecedentRepository, PostgresPrecedentRepository};
use infrastructure::services::{PrecedentService, StrategyService};

/// Create application state from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let strategy_service = create_strategy_service(&config.ai);
    let repository = create_precedent_repository(&config.database).await?;

    Ok(AppState::new(
        strategy_service,
        PrecedentService::new(repository),
        Duration::from_secs(config.server.status_timeout_secs.max(1)),
    ))
}

/// Resolve the provider chain and wrap it in the orchestrator and prober
pub fn create_strategy_service(config: &AiConfig) -> StrategyService {
    let chain = build_provider_chain(config);
    let policy = RetryPolicy::new(
        config.max_retries,
        Duration::from_secs(config.timeout_seconds.max(1)),
    );

    info!(
        max_retries = policy.max_retries,
        timeout_secs = policy.per_attempt_timeout.as_secs(),
        "Retry policy configured"
    );

    StrategyService::new(
        AiOrchestrator::new(chain.clone(), policy),
        AvailabilityProber::new(chain),
        &config.openai,
    )
}

/// Postgres when a connection string is configured, otherwise the static catalog
pub async fn create_precedent_repository(
    config: &DatabaseConfig,
) -> anyhow::Result<Arc<dyn PrecedentRepository>> {
    match config.url.as_deref() {
        Some(url) => {
            let repository = PostgresPrecedentRepository::connect(url)
                .await
                .context("Failed to connect to the precedent database")?;
            repository
                .ensure_schema()
                .await
                .context("Failed to prepare the precedent schema")?;

            info!("Using Postgres precedent storage");
            Ok(Arc::new(repository))
        }
        None => {
            info!("Using in-memory precedent catalog");
            Ok(Arc::new(InMemoryPrecedentRepository::seeded()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_config_builds_mock_only_state() {
        let state = create_app_state(&AppConfig::default()).await.unwrap();

        assert_eq!(state.strategy_service.provider_names(), vec!["Mock".to_string()]);
        assert_eq!(state.status_timeout, Duration::from_secs(30));

        let page = state
            .precedent_service
            .search(Default::default())
            .await
            .unwrap();
        assert_eq!(page.total_count, 8);
    }
}
