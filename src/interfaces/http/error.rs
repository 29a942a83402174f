//! JSON error bodies for the HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::domain::error::CraftyError;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: code.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "BAD_REQUEST")
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "CONFIG_ERROR")
    }

    pub fn upstream(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, message, "UPSTREAM_ERROR")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "INTERNAL_ERROR")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<CraftyError> for ApiError {
    fn from(err: CraftyError) -> Self {
        if let Some(status) = err.upstream_status() {
            // Anything that is not a valid error status is reported as a bad gateway.
            let status = StatusCode::from_u16(status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            return ApiError::upstream(status, err.to_string());
        }

        match &err {
            CraftyError::InvalidInput(message) => ApiError::bad_request(message.clone()),
            CraftyError::Config(message) => {
                error!(error = %message, "configuration error");
                ApiError::config(message.clone())
            }
            CraftyError::Http(_) => ApiError::upstream(StatusCode::BAD_GATEWAY, err.to_string()),
            _ => {
                error!(error = %err, "internal error");
                ApiError::internal("An internal error occurred")
            }
        }
    }
}
