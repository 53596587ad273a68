use std::collections::BTreeSet;

use async_trait::async_trait;

use super::catalog::seed_precedents;
use crate::domain::precedent::rank_order;
use crate::domain::{DomainError, Precedent, PrecedentPage, PrecedentQuery, PrecedentRepository};

/// Read-only precedent repository over a fixed in-memory catalog
#[derive(Debug, Clone)]
pub struct InMemoryPrecedentRepository {
    precedents: Vec<Precedent>,
}

impl InMemoryPrecedentRepository {
    pub fn new(precedents: Vec<Precedent>) -> Self {
        Self { precedents }
    }

    /// Repository over the built-in seed catalog
    pub fn seeded() -> Self {
        Self::new(seed_precedents())
    }

    fn distinct<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&Precedent) -> &str,
    {
        self.precedents
            .iter()
            .map(&field)
            .filter(|value| !value.is_empty())
            .map(String::from)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl Default for InMemoryPrecedentRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl PrecedentRepository for InMemoryPrecedentRepository {
    async fn search(&self, query: &PrecedentQuery) -> Result<PrecedentPage, DomainError> {
        let mut matches: Vec<&Precedent> =
            self.precedents.iter().filter(|p| query.matches(p)).collect();
        matches.sort_by(|a, b| rank_order(a, b));

        let total = matches.len() as u64;
        let page = matches
            .into_iter()
            .skip(query.offset())
            .take(query.page_size as usize)
            .cloned()
            .collect();

        Ok(PrecedentPage::new(page, total, query))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Precedent>, DomainError> {
        Ok(self.precedents.iter().find(|p| p.id == id).cloned())
    }

    async fn case_types(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.distinct(|p| p.case_type.as_str()))
    }

    async fn jurisdictions(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.distinct(|p| p.jurisdiction.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_orders_by_relevance_then_year() {
        let repo = InMemoryPrecedentRepository::seeded();
        let page = repo.search(&PrecedentQuery::default()).await.unwrap();

        let scores: Vec<f64> = page.precedents.iter().map(|p| p.relevance_score).collect();
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());

        assert_eq!(scores, sorted);
        assert_eq!(page.precedents[0].citation, "Brown v. Board of Education, 347 U.S. 483 (1954)");
        assert_eq!(page.total_count, 8);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_search_filters_and_paginates() {
        let repo = InMemoryPrecedentRepository::seeded();
        let query = PrecedentQuery {
            jurisdiction: Some("Supreme Court".to_string()),
            page: 2,
            page_size: 3,
            ..Default::default()
        };

        let page = repo.search(&query).await.unwrap();

        // Seven seeds sit in a "Supreme Court" jurisdiction
        assert_eq!(page.total_count, 7);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.precedents.len(), 3);
        assert_eq!(page.page, 2);
    }

    #[tokio::test]
    async fn test_search_term_matches_citation_or_summary() {
        let repo = InMemoryPrecedentRepository::seeded();
        let query = PrecedentQuery {
            search_term: Some("foreseeable".to_string()),
            ..Default::default()
        };

        let page = repo.search(&query).await.unwrap();
        assert_eq!(page.precedents.len(), 1);
        assert_eq!(page.precedents[0].id, 7);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let repo = InMemoryPrecedentRepository::seeded();
        let query = PrecedentQuery {
            page: 5,
            ..Default::default()
        };

        let page = repo.search(&query).await.unwrap();
        assert!(page.precedents.is_empty());
        assert_eq!(page.total_count, 8);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = InMemoryPrecedentRepository::seeded();
        assert_eq!(repo.find_by_id(2).await.unwrap().unwrap().year, 1966);
        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_distinct_lists_are_sorted() {
        let repo = InMemoryPrecedentRepository::seeded();

        assert_eq!(
            repo.case_types().await.unwrap(),
            vec!["Civil Rights", "Constitutional", "Contract", "Corporate", "Criminal"]
        );

        let jurisdictions = repo.jurisdictions().await.unwrap();
        assert_eq!(jurisdictions.len(), 3);
        assert!(jurisdictions.windows(2).all(|w| w[0] < w[1]));
    }
}
