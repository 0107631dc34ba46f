//! Error types for the Contentful client.
//!
//! # Design
//! Callers most often need to tell "the entry does not exist" and "someone
//! else wrote first" apart from other failures, so 404 and 409 get dedicated
//! variants. Every other non-2xx response lands in `Http` with the raw status
//! and body.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be built locally (empty space id, entry without
    /// `sys`, ...). Nothing was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned 409: the `X-Contentful-Version` sent does not
    /// match the stored version.
    #[error("version mismatch: {0}")]
    VersionMismatch(String),

    /// The server returned a non-2xx status other than 404 and 409.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The transport failed before a response was received.
    #[error("transport failed: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_and_body() {
        let err = ApiError::Http {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn display_not_found() {
        assert_eq!(ApiError::NotFound.to_string(), "resource not found");
    }
}
