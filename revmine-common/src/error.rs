//! Error types and utilities for RevMine

use thiserror::Error;

/// Result type alias for RevMine operations
pub type Result<T> = std::result::Result<T, RevMineError>;

/// Main error type for RevMine operations
#[derive(Error, Debug)]
pub enum RevMineError {
    /// A raw date value that could not be canonicalized into a calendar day
    #[error("Invalid date format: {input:?}")]
    InvalidDateFormat { input: String },

    /// Errors propagated unchanged from the upstream data-retrieval service
    #[error("Upstream fetch error: {message}")]
    Upstream {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for caller-supplied input
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl RevMineError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new invalid-date error carrying the offending raw input
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDateFormat {
            input: input.into(),
        }
    }

    /// Create a new upstream fetch error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream {
            message: msg.into(),
            status_code: None,
            source: None,
        }
    }

    /// Create a new upstream fetch error with an HTTP status code
    pub fn upstream_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Upstream {
            message: msg.into(),
            status_code: Some(status),
            source: None,
        }
    }

    /// Create a new upstream fetch error with source
    pub fn upstream_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Upstream {
            message: msg.into(),
            status_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether this error came from the date normalizer
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, Self::InvalidDateFormat { .. })
    }
}
