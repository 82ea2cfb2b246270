//! # Command Error Type
//!
//! What a failed command prints on stderr.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command handler ── Result<T, ApiError>                                 │
//! │        │                                                                │
//! │        ├── unreadable file / bad JSON ─── INVALID_INPUT ──┐            │
//! │        ├── ValidationError ────────────── VALIDATION_ERROR ┤            │
//! │        ├── CoreError::InvalidSchedule ─── CONFIG_ERROR ────┤            │
//! │        ├── unreadable policy file ─────── CONFIG_ERROR ────┤            │
//! │        └── anything else ──────────────── INTERNAL ────────┴──► stderr │
//! │                                                                         │
//! │  { "code": "VALIDATION_ERROR", "reason": "discount_exceeds_total",      │
//! │    "line": null, "message": "invoice discount 5000.00 exceeds ..." }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use solarbooks_core::{CoreError, ValidationError};

use crate::config::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error category
    pub code: ErrorCode,

    /// Stable validation reason (`discount_exceeds_total`, ...)
    pub reason: Option<&'static str>,

    /// Offending invoice line, zero-based
    pub line: Option<usize>,

    /// Human-readable error message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input could not be read or parsed
    InvalidInput,

    /// Input parsed but broke a business rule
    ValidationError,

    /// The policy configuration is unusable
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            reason: None,
            line: None,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidInput, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            reason: Some(err.code()),
            line: err.line_index(),
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(err) => ApiError::from(err),
            other @ CoreError::InvalidSchedule { .. } => {
                ApiError::new(ErrorCode::ConfigError, other.to_string())
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(err) => ApiError::from(err),
            other @ ConfigError::FileNotFound(_) => ApiError::invalid_input(other.to_string()),
            other @ ConfigError::Load(_) => ApiError::new(ErrorCode::ConfigError, other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::invalid_input(format!("Malformed JSON: {err}"))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
