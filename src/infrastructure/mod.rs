//! Infrastructure layer - External service implementations

pub mod ai;
pub mod logging;
pub mod observability;
pub mod precedent;
pub mod services;
