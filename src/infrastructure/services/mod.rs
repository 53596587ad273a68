//! Infrastructure services

mod precedent_service;
mod strategy_service;

pub use precedent_service::PrecedentService;
pub use strategy_service::{MAX_CASE_DESCRIPTION_LEN, StrategyService};
