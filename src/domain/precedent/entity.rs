use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored case-law precedent with a fixed relevance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Precedent {
    pub id: i32,
    pub citation: String,
    pub summary: String,
    pub jurisdiction: String,
    pub year: i32,
    pub case_type: String,
    /// Stored score in [0, 1], used for ordering only
    pub relevance_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Precedent {
    pub fn new(
        id: i32,
        citation: impl Into<String>,
        summary: impl Into<String>,
        jurisdiction: impl Into<String>,
        year: i32,
        case_type: impl Into<String>,
        relevance_score: f64,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            citation: citation.into(),
            summary: summary.into(),
            jurisdiction: jurisdiction.into(),
            year,
            case_type: case_type.into(),
            relevance_score: relevance_score.clamp(0.0, 1.0),
            created_at: now,
            updated_at: now,
        }
    }
}
