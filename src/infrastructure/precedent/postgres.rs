//! PostgreSQL precedent repository

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::info;

use super::catalog::seed_precedents;
use crate::domain::{DomainError, Precedent, PrecedentPage, PrecedentQuery, PrecedentRepository};

const MAX_CONNECTIONS: u32 = 10;
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Optional filters shared by the count and page queries; a NULL parameter disables its filter
const FILTER_CLAUSE: &str = r#"
    WHERE ($1::TEXT IS NULL OR strpos(jurisdiction, $1) > 0)
      AND ($2::TEXT IS NULL OR strpos(case_type, $2) > 0)
      AND ($3::INT IS NULL OR year = $3)
      AND ($4::TEXT IS NULL OR strpos(citation, $4) > 0 OR strpos(summary, $4) > 0)
"#;

/// PostgreSQL implementation of PrecedentRepository
#[derive(Debug, Clone)]
pub struct PostgresPrecedentRepository {
    pool: PgPool,
}

impl PostgresPrecedentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .connect(url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Create the precedents table if missing and seed it when empty
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS precedents (
                id INTEGER PRIMARY KEY,
                citation VARCHAR(500) NOT NULL,
                summary VARCHAR(2000) NOT NULL,
                jurisdiction VARCHAR(100) NOT NULL,
                year INTEGER NOT NULL,
                case_type VARCHAR(50) NOT NULL DEFAULT '',
                relevance_score NUMERIC(3, 2) NOT NULL DEFAULT 0,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create precedents table: {}", e)))?;

        for index in ["jurisdiction", "year", "case_type"] {
            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS idx_precedents_{0} ON precedents ({0})",
                index
            ))
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create index: {}", e)))?;
        }

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM precedents")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count precedents: {}", e)))?;

        if existing == 0 {
            let seeds = seed_precedents();
            for precedent in &seeds {
                self.insert(precedent).await?;
            }
            info!(count = seeds.len(), "Seeded precedents table");
        }

        Ok(())
    }

    async fn insert(&self, precedent: &Precedent) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO precedents (id, citation, summary, jurisdiction, year, case_type,
                                    relevance_score, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7::FLOAT8::NUMERIC(3, 2), $8, $9)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(precedent.id)
        .bind(&precedent.citation)
        .bind(&precedent.summary)
        .bind(&precedent.jurisdiction)
        .bind(precedent.year)
        .bind(&precedent.case_type)
        .bind(precedent.relevance_score)
        .bind(precedent.created_at)
        .bind(precedent.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to insert precedent: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl PrecedentRepository for PostgresPrecedentRepository {
    async fn search(&self, query: &PrecedentQuery) -> Result<PrecedentPage, DomainError> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM precedents {}",
            FILTER_CLAUSE
        ))
        .bind(query.jurisdiction.as_deref())
        .bind(query.case_type.as_deref())
        .bind(query.year)
        .bind(query.search_term.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to count precedents: {}", e)))?;

        let rows = sqlx::query(&format!(
            r#"
            SELECT id, citation, summary, jurisdiction, year, case_type,
                   relevance_score::FLOAT8 AS relevance_score, created_at, updated_at
            FROM precedents
            {}
            ORDER BY relevance_score DESC, year DESC
            LIMIT $5 OFFSET $6
            "#,
            FILTER_CLAUSE
        ))
        .bind(query.jurisdiction.as_deref())
        .bind(query.case_type.as_deref())
        .bind(query.year)
        .bind(query.search_term.as_deref())
        .bind(query.page_size as i64)
        .bind(query.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to search precedents: {}", e)))?;

        let precedents = rows
            .iter()
            .map(row_to_precedent)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PrecedentPage::new(precedents, total.max(0) as u64, query))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Precedent>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, citation, summary, jurisdiction, year, case_type,
                   relevance_score::FLOAT8 AS relevance_score, created_at, updated_at
            FROM precedents
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get precedent: {}", e)))?;

        row.as_ref().map(row_to_precedent).transpose()
    }

    async fn case_types(&self) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar(
            "SELECT DISTINCT case_type FROM precedents WHERE case_type <> '' ORDER BY case_type",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list case types: {}", e)))
    }

    async fn jurisdictions(&self) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar(
            "SELECT DISTINCT jurisdiction FROM precedents WHERE jurisdiction <> '' ORDER BY jurisdiction",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list jurisdictions: {}", e)))
    }
}

fn row_to_precedent(row: &PgRow) -> Result<Precedent, DomainError> {
    let read = |e: sqlx::Error| DomainError::storage(format!("Invalid precedent row: {}", e));

    Ok(Precedent {
        id: row.try_get("id").map_err(read)?,
        citation: row.try_get("citation").map_err(read)?,
        summary: row.try_get("summary").map_err(read)?,
        jurisdiction: row.try_get("jurisdiction").map_err(read)?,
        year: row.try_get("year").map_err(read)?,
        case_type: row.try_get("case_type").map_err(read)?,
        relevance_score: row.try_get("relevance_score").map_err(read)?,
        created_at: row.try_get("created_at").map_err(read)?,
        updated_at: row.try_get("updated_at").map_err(read)?,
    })
}
