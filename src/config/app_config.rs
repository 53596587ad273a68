use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
    pub ai: AiConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on the provider probe fan-out behind the status and health endpoints
    pub status_timeout_secs: u64,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
}

/// Provider selection, retry policy and per-provider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// One of Mock, OpenAI, AzureOpenAI, PythonAI (case-insensitive)
    pub provider: String,
    pub enable_fallback: bool,
    pub max_retries: u32,
    pub timeout_seconds: u64,
    pub openai: OpenAiSettings,
    pub azure: AzureSettings,
    pub python_ai: PythonAiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AzureSettings {
    pub api_key: String,
    pub endpoint: String,
    pub deployment_name: String,
    pub api_version: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PythonAiSettings {
    /// Empty means the delegate is not configured
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Postgres connection string; the static catalog is used when absent
    pub url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            status_timeout_secs: 30,
            cors_origins: vec!["http://localhost:4200".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: "Mock".to_string(),
            enable_fallback: true,
            max_retries: 3,
            timeout_seconds: 30,
            openai: OpenAiSettings::default(),
            azure: AzureSettings::default(),
            python_ai: PythonAiSettings::default(),
        }
    }
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 2000,
            temperature: 0.7,
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

impl Default for AzureSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: String::new(),
            deployment_name: String::new(),
            api_version: "2024-06-01".to_string(),
        }
    }
}

impl Default for PythonAiSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_seconds: 30,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.apply_env_fallbacks(|key| std::env::var(key).ok());

        Ok(app_config)
    }

    /// Fill settings left empty by the layered sources from well-known plain variables
    pub fn apply_env_fallbacks(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        fill_if_empty(&mut self.ai.openai.api_key, lookup("OPENAI_API_KEY"));
        fill_if_empty(&mut self.ai.azure.api_key, lookup("AZURE_OPENAI_API_KEY"));
        fill_if_empty(&mut self.ai.azure.endpoint, lookup("AZURE_OPENAI_ENDPOINT"));
        fill_if_empty(
            &mut self.ai.azure.deployment_name,
            lookup("AZURE_OPENAI_DEPLOYMENT"),
        );
        fill_if_empty(&mut self.ai.python_ai.base_url, lookup("PYTHON_AI_BASE_URL"));

        if self.database.url.is_none() {
            self.database.url = lookup("POSTGRES_CONNECTION")
                .or_else(|| lookup("DATABASE_URL"))
                .filter(|url| !url.trim().is_empty());
        }

        if let Some(origins) = lookup("CORS_ORIGINS") {
            let parsed: Vec<String> = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();

            if !parsed.is_empty() {
                self.server.cors_origins = parsed;
            }
        }
    }
}

fn fill_if_empty(target: &mut String, value: Option<String>) {
    if target.trim().is_empty() {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            *target = value;
        }
    }
}
