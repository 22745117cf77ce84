//! Unified error types for the trigger simulator.
//!
//! Error codes:
//! - VALID_001-003: Payload validation errors
//! - RATE_001: Rate limit errors
//! - SINK_001: Log sink errors

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    /// VALID_001: Payload is missing, not a JSON object, or empty
    EmptyPayload,
    /// VALID_002: `trigger` field is missing or not a string
    MalformedTrigger,
    /// VALID_003: Trigger type is not recognized
    UnrecognizedTrigger,
}

impl ValidationErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyPayload => "VALID_001",
            Self::MalformedTrigger => "VALID_002",
            Self::UnrecognizedTrigger => "VALID_003",
        }
    }

    /// Get the HTTP status code.
    pub fn http_status(&self) -> u16 {
        400
    }
}

/// Rate limit error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitErrorCode {
    /// RATE_001: Rate limit exceeded
    Exceeded,
}

impl RateLimitErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Exceeded => "RATE_001",
        }
    }

    /// Get the HTTP status code.
    pub fn http_status(&self) -> u16 {
        429
    }
}

/// Log sink error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkErrorCode {
    /// SINK_001: Failed to append to the trigger log
    AppendFailed,
}

impl SinkErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AppendFailed => "SINK_001",
        }
    }

    /// Get the HTTP status code.
    pub fn http_status(&self) -> u16 {
        500
    }
}

/// Unified error type for the trigger simulator.
#[derive(Debug, Error)]
pub enum Error {
    /// Validation error with code.
    #[error("[{code}] {message}")]
    Validation {
        code: &'static str,
        message: String,
        http_status: u16,
    },

    /// Rate limit error with code.
    #[error("[{code}] {message}")]
    RateLimit {
        code: &'static str,
        message: String,
        http_status: u16,
        retry_after: Option<u64>,
    },

    /// Log sink error with code.
    #[error("[{code}] {message}")]
    Sink {
        code: &'static str,
        message: String,
        http_status: u16,
    },

    /// Invalid limiter or sink configuration, fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a validation error with code.
    pub fn validation(code: ValidationErrorCode, msg: impl Into<String>) -> Self {
        Self::Validation {
            code: code.code(),
            message: msg.into(),
            http_status: code.http_status(),
        }
    }

    /// Create a rate limit error.
    pub fn rate_limit(msg: impl Into<String>, retry_after: Option<u64>) -> Self {
        let code = RateLimitErrorCode::Exceeded;
        Self::RateLimit {
            code: code.code(),
            message: msg.into(),
            http_status: code.http_status(),
            retry_after,
        }
    }

    /// Create a log sink error.
    pub fn sink(msg: impl Into<String>) -> Self {
        let code = SinkErrorCode::AppendFailed;
        Self::Sink {
            code: code.code(),
            message: msg.into(),
            http_status: code.http_status(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation { http_status, .. } => *http_status,
            Self::RateLimit { http_status, .. } => *http_status,
            Self::Sink { http_status, .. } => *http_status,
            Self::Config(_) => 500,
            Self::Serialization(_) => 400,
            Self::Io(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code if this is a coded error.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Validation { code, .. } => Some(code),
            Self::RateLimit { code, .. } => Some(code),
            Self::Sink { code, .. } => Some(code),
            _ => None,
        }
    }
}
