use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("pickup point is outside every service zone")]
    ZoneNotCovered,

    #[error("no drivers available")]
    NoDriversAvailable,

    #[error("no compatible drivers for this request")]
    NoCompatibleDrivers,

    #[error("driver already has an offer on this booking")]
    DuplicateOffer,

    #[error("driver not eligible to bid: {0}")]
    IneligibleDriver(String),

    #[error("counter-offer exceeds twice the proposed price")]
    CounterOfferTooHigh,

    #[error("assignment write failed: {0}")]
    AssignmentWriteFailed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::ZoneNotCovered => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            AppError::NoDriversAvailable | AppError::NoCompatibleDrivers => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            AppError::DuplicateOffer => (StatusCode::CONFLICT, self.to_string()),
            AppError::IneligibleDriver(_) => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::CounterOfferTooHigh => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::AssignmentWriteFailed(_) => (StatusCode::CONFLICT, self.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
