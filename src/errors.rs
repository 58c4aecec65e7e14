use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;

use crate::notification::resend::MailError;

pub const NOT_CONFIGURED_MESSAGE: &str =
    "Email service not configured. Please set RESEND_API_KEY environment variable.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("email service not configured")]
    NotConfigured,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("email provider error")]
    Provider { details: Value },

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<MailError> for AppError {
    fn from(e: MailError) -> Self {
        match e {
            MailError::Provider { details, .. } => AppError::Provider { details },
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::NotConfigured => {
                tracing::error!("RESEND_API_KEY is not set");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    NOT_CONFIGURED_MESSAGE.to_string(),
                    None,
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::InvalidJson(detail) => (
                StatusCode::BAD_REQUEST,
                "Invalid JSON in request body".to_string(),
                Some(Value::String(detail)),
            ),
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what), None),
            AppError::Provider { details } => {
                tracing::error!("Email provider error: {}", details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to send email".to_string(),
                    Some(details),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                let msg = e.to_string();
                let detail = if msg.is_empty() { "Unknown error".to_string() } else { msg };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(Value::String(detail)),
                )
            }
        };

        let body = match details {
            Some(details) => json!({ "error": error, "details": details }),
            None => json!({ "error": error }),
        };

        (status, Json(body)).into_response()
    }
}
