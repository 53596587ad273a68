//! AI provider adapters and chain assembly

mod azure_openai;
mod chat_completion;
mod factory;
pub mod http_client;
mod mock_provider;
mod openai;
mod python_ai;
mod selector;

pub use azure_openai::AzureOpenAiProvider;
pub use factory::AiProviderFactory;
pub use http_client::{HttpClient, HttpClientTrait};
pub use mock_provider::{CaseCategory, MockAiProvider};
pub use openai::OpenAiProvider;
pub use python_ai::{HealthResponse, PythonAiProvider, StrategyResponse};
pub use selector::{assemble_chain, build_provider_chain};
