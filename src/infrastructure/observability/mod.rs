//! Observability infrastructure - Prometheus metrics

mod metrics;

pub use metrics::{
    PrometheusMetrics, create_metrics_router, init_metrics, record_ai_generation,
    record_http_request, sanitize_path,
};
