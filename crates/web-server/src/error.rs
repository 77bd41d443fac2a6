use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validator error: {0}")]
    Validator(#[from] validator::ValidatorError),
    #[error("Roster error: {0}")]
    Roster(#[from] roster::RosterError),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Both variants mean the store failed under us (validation failures never
/// reach here). The detail goes to the log; the client gets a generic 500.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validator(err) => {
                tracing::error!(error = ?err, "Uniqueness lookup failed.");
            }
            AppError::Roster(err) => {
                tracing::error!(error = ?err, "Roster operation failed.");
            }
        }

        let body = Json(json!({ "error": "An internal database error occurred" }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
