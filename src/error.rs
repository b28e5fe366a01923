//! Error handling for the mystbin mapping layer
//!
//! Every failure carries a stable code so callers can log and match on it:
//! - Coded variants built through constructor helpers
//! - Automatic conversions from serde_json and config errors

use std::fmt;
use thiserror::Error;

/// Result type for all mystbin operations
pub type Result<T> = std::result::Result<T, MystbinError>;

/// Error codes for mystbin operations
///
/// Each error has a unique code in the format `MXXX` where:
/// - M1XX: Response mapping errors
/// - M4XX: Configuration errors
/// - M9XX: Internal errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Response (M1XX)
    /// M101: Required key missing from a response
    MissingField,
    /// M102: Timestamp is not valid ISO-8601
    MalformedTimestamp,
    /// M103: Response has an unusable shape
    InvalidResponse,

    // Configuration (M4XX)
    /// M401: Configuration could not be loaded
    ConfigError,
    /// M402: Configuration value out of range
    InvalidConfigValue,

    // Internal (M9XX)
    /// M902: Serialization error
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u16 {
        match self {
            ErrorCode::MissingField => 101,
            ErrorCode::MalformedTimestamp => 102,
            ErrorCode::InvalidResponse => 103,

            ErrorCode::ConfigError => 401,
            ErrorCode::InvalidConfigValue => 402,

            ErrorCode::SerializationError => 902,
        }
    }

    /// Get the string code (e.g., "M101")
    pub fn as_str(&self) -> String {
        format!("M{}", self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.code())
    }
}

/// Main error type for all mystbin operations
#[derive(Error, Debug)]
pub enum MystbinError {
    // ==================== Response Errors (M1XX) ====================
    /// Required key absent from a response shape
    #[error("[{code}] Missing field `{field}` in {shape}")]
    MissingField {
        code: ErrorCode,
        shape: String,
        field: String,
    },

    /// Timestamp present but not parseable
    #[error("[{code}] Malformed timestamp in `{field}`: {value:?}")]
    MalformedTimestamp {
        code: ErrorCode,
        field: String,
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    /// Response decoded but unusable (wrong types, not an object, ...)
    #[error("[{code}] Invalid {shape} response: {message}")]
    InvalidResponse {
        code: ErrorCode,
        shape: String,
        message: String,
    },

    // ==================== Configuration Errors (M4XX) ====================
    /// Configuration error
    #[error("[{code}] Configuration error: {message}")]
    Config {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<config::ConfigError>,
    },

    // ==================== Internal Errors (M9XX) ====================
    /// JSON serialization error
    #[error("[{code}] Serialization error: {message}")]
    Serialization {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

// ==================== Constructor Methods ====================

impl MystbinError {
    // --- Response ---

    /// Create missing field error
    pub fn missing_field(shape: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            code: ErrorCode::MissingField,
            shape: shape.into(),
            field: field.into(),
        }
    }

    /// Create malformed timestamp error
    pub fn malformed_timestamp(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MalformedTimestamp {
            code: ErrorCode::MalformedTimestamp,
            field: field.into(),
            value: value.into(),
            source: None,
        }
    }

    /// Create malformed timestamp error with the last parser failure
    pub fn malformed_timestamp_with_source(
        field: impl Into<String>,
        value: impl Into<String>,
        source: chrono::ParseError,
    ) -> Self {
        Self::MalformedTimestamp {
            code: ErrorCode::MalformedTimestamp,
            field: field.into(),
            value: value.into(),
            source: Some(source),
        }
    }

    /// Create invalid response error
    pub fn invalid_response(shape: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            code: ErrorCode::InvalidResponse,
            shape: shape.into(),
            message: message.into(),
        }
    }

    // --- Configuration ---

    /// Create configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::ConfigError,
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration error with source
    pub fn config_from_error(err: config::ConfigError) -> Self {
        Self::Config {
            code: ErrorCode::ConfigError,
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create invalid configuration value error
    pub fn invalid_config_value(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::InvalidConfigValue,
            message: message.into(),
            source: None,
        }
    }

    // --- Utility Methods ---

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingField { code, .. } => *code,
            Self::MalformedTimestamp { code, .. } => *code,
            Self::InvalidResponse { code, .. } => *code,
            Self::Config { code, .. } => *code,
            Self::Serialization { code, .. } => *code,
        }
    }

    /// Check if the remote broke the response contract
    ///
    /// These are never worth retrying at this layer.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::MalformedTimestamp { .. } | Self::InvalidResponse { .. }
        )
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

// ==================== From Implementations ====================

impl From<serde_json::Error> for MystbinError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            code: ErrorCode::SerializationError,
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<config::ConfigError> for MystbinError {
    fn from(err: config::ConfigError) -> Self {
        Self::config_from_error(err)
    }
}

// Manual Clone implementation that drops non-cloneable sources
impl Clone for MystbinError {
    fn clone(&self) -> Self {
        match self {
            Self::MissingField { code, shape, field } => Self::MissingField {
                code: *code,
                shape: shape.clone(),
                field: field.clone(),
            },
            Self::MalformedTimestamp {
                code,
                field,
                value,
                source,
            } => Self::MalformedTimestamp {
                code: *code,
                field: field.clone(),
                value: value.clone(),
                source: *source,
            },
            Self::InvalidResponse {
                code,
                shape,
                message,
            } => Self::InvalidResponse {
                code: *code,
                shape: shape.clone(),
                message: message.clone(),
            },
            Self::Config {
                code,
                message,
                source: _,
            } => Self::Config {
                code: *code,
                message: message.clone(),
                source: None,
            },
            Self::Serialization {
                code,
                message,
                source: _,
            } => Self::Serialization {
                code: *code,
                message: message.clone(),
                source: None,
            },
        }
    }
}
