//! Application state for shared services

use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::services::{PrecedentService, StrategyService};

/// Application state shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub strategy_service: Arc<StrategyService>,
    pub precedent_service: Arc<PrecedentService>,
    /// Upper bound on an availability check made on behalf of a request
    pub status_timeout: Duration,
}

impl AppState {
    pub fn new(
        strategy_service: StrategyService,
        precedent_service: PrecedentService,
        status_timeout: Duration,
    ) -> Self {
        Self {
            strategy_service: Arc::new(strategy_service),
            precedent_service: Arc::new(precedent_service),
            status_timeout,
        }
    }
}
