use async_trait::async_trait;
use std::fmt::Debug;
use tokio_util::sync::CancellationToken;

use super::GenerationRequest;
use crate::domain::DomainError;

/// Uniform capability over one text-generation backend (stub, OpenAI, Azure, PythonAI)
///
/// Implementations hold only read-only state and a shared transport handle, so a
/// single instance serves concurrent requests for the lifetime of the process.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug {
    /// Generate text for the request.
    ///
    /// Returns `DomainError::Cancelled` when `cancel` fires before a result is
    /// available and `DomainError::Provider` for transport, auth, format or
    /// empty-content failures.
    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<String, DomainError>;

    /// Lightweight reachability check. Never fails: every fault reads as `false`.
    async fn probe(&self, cancel: &CancellationToken) -> bool;

    /// Name reported in results and logs
    fn name(&self) -> &str;
}
