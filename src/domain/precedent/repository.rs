//! Precedent repository trait

use super::{Precedent, PrecedentPage, PrecedentQuery};
use crate::domain::error::DomainError;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Read-only access to the precedent catalog
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PrecedentRepository: Send + Sync {
    /// Filtered, ranked and paginated search; the query is already normalized
    async fn search(&self, query: &PrecedentQuery) -> Result<PrecedentPage, DomainError>;

    /// Finds a precedent by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Precedent>, DomainError>;

    /// Distinct non-empty case types, sorted
    async fn case_types(&self) -> Result<Vec<String>, DomainError>;

    /// Distinct non-empty jurisdictions, sorted
    async fn jurisdictions(&self) -> Result<Vec<String>, DomainError>;
}
