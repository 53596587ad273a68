//! Precedent endpoint handlers

use axum::{
    Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    routing::get,
};
use tracing::debug;
use validator::Validate;

use super::state::AppState;
use crate::api::types::{ApiError, Json, PrecedentDto, PrecedentSearchParams, PrecedentSearchResponse};

/// Create precedent router, nested under `/api/precedents`
pub fn create_precedents_router() -> Router<AppState> {
    Router::new()
        .route("/", get(search_precedents))
        .route("/case-types", get(list_case_types))
        .route("/jurisdictions", get(list_jurisdictions))
        .route("/{id}", get(get_precedent))
}

/// GET /api/precedents
pub async fn search_precedents(
    State(state): State<AppState>,
    params: Result<Query<PrecedentSearchParams>, QueryRejection>,
) -> Result<Json<PrecedentSearchResponse>, ApiError> {
    let Query(params) = params.map_err(|e| {
        ApiError::bad_request(e.body_text()).with_code("invalid_query")
    })?;
    params.validate()?;
    debug!(?params, "Searching precedents");

    let page = state.precedent_service.search(params.into()).await?;

    Ok(Json(PrecedentSearchResponse::from(page)))
}

/// GET /api/precedents/{id}
pub async fn get_precedent(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<PrecedentDto>, ApiError> {
    let Path(id) = id.map_err(|_| {
        ApiError::bad_request("Precedent id must be an integer").with_param("id")
    })?;

    let precedent = state.precedent_service.get(id).await?;

    Ok(Json(PrecedentDto::from(precedent)))
}

/// GET /api/precedents/case-types
pub async fn list_case_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.precedent_service.case_types().await?))
}

/// GET /api/precedents/jurisdictions
pub async fn list_jurisdictions(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.precedent_service.jurisdictions().await?))
}
