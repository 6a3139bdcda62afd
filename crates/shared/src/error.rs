use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Cat description is required.";
pub const INTERNAL_MESSAGE: &str = "Internal server error.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Upstream,
    Internal,
}

/// Error body returned to clients of the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Debug, Clone, Error)]
#[error("{code:?} ({status}): {message}")]
pub struct ApiException {
    pub code: ErrorCode,
    pub status: u16,
    pub message: String,
}

impl ApiException {
    pub fn validation() -> Self {
        Self {
            code: ErrorCode::Validation,
            status: 400,
            message: VALIDATION_MESSAGE.to_string(),
        }
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Upstream,
            status,
            message: message.into(),
        }
    }

    /// Never carries internal detail; that belongs in the log.
    pub fn internal() -> Self {
        Self {
            code: ErrorCode::Internal,
            status: 500,
            message: INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl From<ApiException> for ApiError {
    fn from(value: ApiException) -> Self {
        Self {
            error: value.message,
        }
    }
}
