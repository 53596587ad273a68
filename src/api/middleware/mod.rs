//! HTTP middleware

pub mod logging;
pub mod metrics;

pub use logging::{REQUEST_ID_HEADER, logging_middleware};
pub use metrics::metrics_middleware;
