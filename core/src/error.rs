//! Error types for the pet-store client.
//!
//! # Design
//! Every failure surfaces to the immediate caller; nothing is retried. A
//! non-2xx response is always `ApiError::Http` with the raw status and body,
//! 404 included, so scenarios can assert on an expected status without a
//! dedicated variant per code.

/// Errors raised while validating or encoding schema values.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A plain mapping did not match the expected shape.
    #[error("invalid {entity}: {message}")]
    Invalid {
        entity: &'static str,
        message: String,
    },

    /// A value could not be converted to a plain mapping.
    #[error("failed to encode {entity}: {message}")]
    Encode {
        entity: &'static str,
        message: String,
    },
}

/// Errors returned by `ApiClient` and the typed pet operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response: connect failure, timeout, TLS.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status outside 200..=299.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A 2xx response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A payload failed schema validation.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// An upload file could not be read.
    #[error("failed to read upload file: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Status code carried by an `Http` error.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }
}
