//! Shared error type across devdemo crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Malformed request (bad JSON syntax, unreadable body).
    BadRequest,
    /// No route matches the request.
    NotFound,
    /// Well-formed JSON that does not match the expected schema.
    InvalidPayload,
    /// Missing or wrong `Content-Type`.
    UnsupportedMediaType,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::InvalidPayload => "INVALID_PAYLOAD",
            ClientCode::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, DemoError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl DemoError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            DemoError::BadRequest(_) => ClientCode::BadRequest,
            DemoError::NotFound(_) => ClientCode::NotFound,
            DemoError::InvalidPayload(_) => ClientCode::InvalidPayload,
            DemoError::UnsupportedMediaType(_) => ClientCode::UnsupportedMediaType,
            DemoError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            DemoError::Internal(_) => ClientCode::Internal,
        }
    }
}
