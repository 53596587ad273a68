use std::cmp::Ordering;

use super::Precedent;
use crate::domain::DomainError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

const MAX_JURISDICTION_LEN: usize = 100;
const MAX_CASE_TYPE_LEN: usize = 50;
const MAX_SEARCH_TERM_LEN: usize = 200;
const MIN_YEAR: i32 = 1000;
const MAX_YEAR: i32 = 2100;

/// Filters and pagination for a precedent search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedentQuery {
    pub jurisdiction: Option<String>,
    pub case_type: Option<String>,
    pub year: Option<i32>,
    pub search_term: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for PrecedentQuery {
    fn default() -> Self {
        Self {
            jurisdiction: None,
            case_type: None,
            year: None,
            search_term: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PrecedentQuery {
    /// Validate ranges and sanitize the free-text filters (trim, drop blanks, cap length)
    pub fn normalized(self) -> Result<Self, DomainError> {
        if self.page == 0 {
            return Err(DomainError::validation("page must be at least 1"));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(DomainError::validation(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        if let Some(year) = self.year {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(DomainError::validation(format!(
                    "year must be between {} and {}",
                    MIN_YEAR, MAX_YEAR
                )));
            }
        }

        Ok(Self {
            jurisdiction: sanitize(self.jurisdiction, MAX_JURISDICTION_LEN),
            case_type: sanitize(self.case_type, MAX_CASE_TYPE_LEN),
            search_term: sanitize(self.search_term, MAX_SEARCH_TERM_LEN),
            ..self
        })
    }

    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.page_size as usize
    }

    /// Whether a precedent passes every filter of this query
    pub fn matches(&self, precedent: &Precedent) -> bool {
        if let Some(ref jurisdiction) = self.jurisdiction {
            if !precedent.jurisdiction.contains(jurisdiction.as_str()) {
                return false;
            }
        }

        if let Some(ref case_type) = self.case_type {
            if !precedent.case_type.contains(case_type.as_str()) {
                return false;
            }
        }

        if let Some(year) = self.year {
            if precedent.year != year {
                return false;
            }
        }

        if let Some(ref term) = self.search_term {
            if !precedent.citation.contains(term.as_str()) && !precedent.summary.contains(term.as_str()) {
                return false;
            }
        }

        true
    }
}

fn sanitize(value: Option<String>, max_len: usize) -> Option<String> {
    value
        .map(|v| v.trim().chars().take(max_len).collect::<String>())
        .filter(|v| !v.is_empty())
}

/// Result ordering: relevance score descending, then year descending
pub fn rank_order(a: &Precedent, b: &Precedent) -> Ordering {
    b.relevance_score
        .partial_cmp(&a.relevance_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.year.cmp(&a.year))
}

/// One page of search results
#[derive(Debug, Clone, PartialEq)]
pub struct PrecedentPage {
    pub precedents: Vec<Precedent>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl PrecedentPage {
    pub fn new(precedents: Vec<Precedent>, total_count: u64, query: &PrecedentQuery) -> Self {
        Self {
            precedents,
            total_count,
            page: query.page,
            page_size: query.page_size,
            total_pages: total_pages(total_count, query.page_size),
        }
    }
}

pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }

    total_count.div_ceil(page_size as u64) as u32
}
