//! API request, response and error types

pub mod error;
pub mod json;
pub mod precedent;
pub mod strategy;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use precedent::{PrecedentDto, PrecedentSearchParams, PrecedentSearchResponse};
pub use strategy::{
    AnalyzeRequest, AnalyzeResponse, AvailabilityStatus, GenerateStrategyRequest,
    GenerateStrategyResponse, StatusResponse,
};
