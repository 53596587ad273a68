//! Precedent service - Search and lookup over the precedent catalog

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, Precedent, PrecedentPage, PrecedentQuery, PrecedentRepository};

/// Precedent service for searching the catalog
pub struct PrecedentService {
    repository: Arc<dyn PrecedentRepository>,
}

impl std::fmt::Debug for PrecedentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrecedentService").finish_non_exhaustive()
    }
}

impl PrecedentService {
    pub fn new(repository: Arc<dyn PrecedentRepository>) -> Self {
        Self { repository }
    }

    /// Validate and sanitize the query, then run it against the repository
    pub async fn search(&self, query: PrecedentQuery) -> Result<PrecedentPage, DomainError> {
        let query = query.normalized()?;
        let page = self.repository.search(&query).await?;

        info!(
            total = page.total_count,
            page = page.page,
            "Precedent search completed"
        );

        Ok(page)
    }

    pub async fn get(&self, id: i32) -> Result<Precedent, DomainError> {
        if id < 1 {
            return Err(DomainError::validation("Precedent id must be positive"));
        }

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Precedent with ID {} not found", id)))
    }

    pub async fn case_types(&self) -> Result<Vec<String>, DomainError> {
        self.repository.case_types().await
    }

    pub async fn jurisdictions(&self) -> Result<Vec<String>, DomainError> {
        self.repository.jurisdictions().await
    }
}
