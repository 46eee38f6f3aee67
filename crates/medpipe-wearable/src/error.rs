//! Listener error responses
//!
//! Every failure answers with an explicit status and the same body shape:
//! `{"error": {"message": ..., "status": ...}}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("User not found")]
    UserNotFound(String),

    #[error("Invalid reading: {0}")]
    InvalidPayload(#[from] JsonRejection),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidPayload(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::UserNotFound(user_id) => {
                tracing::debug!(user_id = %user_id, "Lookup for unknown user");
                self.to_string()
            },
            AppError::InvalidPayload(rejection) => {
                tracing::warn!(error = %rejection.body_text(), "Rejected reading update");
                self.to_string()
            },
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}
