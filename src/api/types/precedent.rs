//! Query parameters and bodies of the precedent endpoints

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::precedent::DEFAULT_PAGE_SIZE;
use crate::domain::{Precedent, PrecedentPage, PrecedentQuery};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PrecedentSearchParams {
    #[validate(length(max = 100))]
    pub jurisdiction: Option<String>,
    #[validate(length(max = 50))]
    pub case_type: Option<String>,
    #[validate(range(min = 1000, max = 2100))]
    pub year: Option<i32>,
    #[validate(length(max = 200))]
    pub search_term: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u32>,
}

impl From<PrecedentSearchParams> for PrecedentQuery {
    fn from(params: PrecedentSearchParams) -> Self {
        Self {
            jurisdiction: params.jurisdiction,
            case_type: params.case_type,
            year: params.year,
            search_term: params.search_term,
            page: params.page.unwrap_or(1),
            page_size: params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecedentDto {
    pub id: i32,
    pub citation: String,
    pub summary: String,
    pub jurisdiction: String,
    pub year: i32,
    pub case_type: String,
    pub relevance_score: f64,
}

impl From<Precedent> for PrecedentDto {
    fn from(p: Precedent) -> Self {
        Self {
            id: p.id,
            citation: p.citation,
            summary: p.summary,
            jurisdiction: p.jurisdiction,
            year: p.year,
            case_type: p.case_type,
            relevance_score: p.relevance_score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecedentSearchResponse {
    pub precedents: Vec<PrecedentDto>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl From<PrecedentPage> for PrecedentSearchResponse {
    fn from(page: PrecedentPage) -> Self {
        Self {
            precedents: page.precedents.into_iter().map(PrecedentDto::from).collect(),
            total_count: page.total_count,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_default_paging() {
        let query: PrecedentQuery = PrecedentSearchParams::default().into();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 10);
    }

    #[test]
    fn test_params_validation() {
        let params = PrecedentSearchParams {
            year: Some(999),
            page_size: Some(101),
            ..Default::default()
        };

        let errors = params.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("year"));
        assert!(errors.field_errors().contains_key("page_size"));
    }

    #[test]
    fn test_dto_is_camel_case() {
        let dto = PrecedentDto::from(Precedent::new(
            3,
            "Roe v. Wade",
            "Summary",
            "United States Supreme Court",
            1973,
            "Constitutional",
            0.85,
        ));

        let json = serde_json::to_value(dto).unwrap();
        assert_eq!(json["caseType"], "Constitutional");
        assert_eq!(json["relevanceScore"], 0.85);
    }
}
