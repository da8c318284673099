//! Unified error types and result handling.
//!
//! Every failure the backend can produce maps onto one variant here; the API
//! layer translates variants into HTTP statuses and response envelopes.
//! AI-service failures are deliberately absent from this enum: the gateway
//! absorbs them and degrades to local fallback content instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Request payload failed a domain invariant. Optional field-level
    /// details are surfaced verbatim in the response envelope.
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("Missing or invalid credentials")]
    Unauthorized,

    #[error("Not permitted to access this resource")]
    Forbidden,

    #[error("Product {id} not found")]
    ProductNotFound { id: i64 },

    #[error("Report {id} not found")]
    ReportNotFound { id: i64 },

    #[error("Question {id} not found")]
    QuestionNotFound { id: i64 },
}

impl Error {
    /// Shorthand for a validation failure without field-level details.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: None,
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
