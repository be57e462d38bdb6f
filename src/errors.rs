// Gateway errors and the error normalizer
//
// Every failure raised by argument validation, the backend client or the
// HTTP transport is a GatewayError. The normalizer turns any error (typed or
// not) into a kind plus one human-readable line for the result envelope.

use std::fmt;
use thiserror::Error;

/// Typed failure produced by validation, transport or domain logic
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Tool arguments did not match the input schema
    #[error("{0}")]
    Validation(String),

    /// Transport-level failure (DNS, refused connection, timeout)
    #[error("{message}")]
    Network { message: String },

    /// Remote returned a non-2xx status
    #[error("{message}")]
    HttpStatus { status: u16, message: String },

    /// Capability absent in the current backend mode
    #[error("{0}")]
    NotSupported(String),

    /// Capability absent from the remote facade
    #[error("{0}")]
    NotImplemented(String),

    /// Anything else
    #[error("{0}")]
    Unknown(String),
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    /// Same classification as a 404 from the facade
    pub fn not_found(what: impl fmt::Display) -> Self {
        Self::HttpStatus {
            status: 404,
            message: format!("{} not found", what),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Network { .. } => ErrorKind::Network,
            Self::HttpStatus { .. } => ErrorKind::HttpStatus,
            Self::NotSupported(_) => ErrorKind::NotSupported,
            Self::NotImplemented(_) => ErrorKind::NotImplemented,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Status code carried by the error: 0 for network failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { .. } => Some(0),
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Only transport failures are transient
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

/// Fixed set of error classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Network,
    HttpStatus,
    NotSupported,
    NotImplemented,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Network => "NetworkError",
            ErrorKind::HttpStatus => "HttpStatusError",
            ErrorKind::NotSupported => "NotSupported",
            ErrorKind::NotImplemented => "NotImplemented",
            ErrorKind::Unknown => "UnknownError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized view of a failure, ready for the caller-facing envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedError {
    pub kind: ErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

/// Classify any error raised below the dispatcher
///
/// Errors that are (or wrap) a `GatewayError` keep their classification;
/// everything else becomes `UnknownError` with the top-level message only,
/// so no cause chain or backtrace reaches the caller.
pub fn normalize(err: &anyhow::Error) -> NormalizedError {
    let typed = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<GatewayError>());

    match typed {
        Some(gateway_err) => NormalizedError {
            kind: gateway_err.kind(),
            message: user_message(gateway_err),
            status: gateway_err.status(),
        },
        None => NormalizedError {
            kind: ErrorKind::Unknown,
            message: format!("Unexpected error: {}", err),
            status: None,
        },
    }
}

/// Human-readable one-line message for a typed error
pub fn user_message(err: &GatewayError) -> String {
    match err {
        GatewayError::Validation(msg) => format!("Invalid arguments: {}", msg),
        GatewayError::Network { message } => format!("Network error: {}", message),
        GatewayError::HttpStatus { status, message } => {
            if message.is_empty() {
                format!("API request failed with status {}", status)
            } else {
                format!("API request failed with status {}: {}", status, message)
            }
        }
        GatewayError::NotSupported(msg) => format!("Not supported: {}", msg),
        GatewayError::NotImplemented(msg) => format!("Not implemented: {}", msg),
        GatewayError::Unknown(msg) => format!("Unexpected error: {}", msg),
    }
}
