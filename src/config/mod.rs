//! Layered application configuration

mod app_config;

pub use app_config::{
    AiConfig, AppConfig, AzureSettings, DatabaseConfig, LogFormat, LoggingConfig, MetricsConfig,
    OpenAiSettings, PythonAiSettings, ServerConfig,
};
