//! Client error types.
//!
//! Every operation either returns a parsed payload or fails with a
//! [`ClientError`] carrying a human-readable message. Callers can match on
//! the variant to distinguish transport failures from server-side
//! rejections without string matching.

use thiserror::Error;

/// Errors that can occur when calling the quiz service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service returned a non-success HTTP status. The message is the
    /// server's `detail` field when the body carried one, otherwise the
    /// operation's fixed default.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A network error occurred (connect, DNS, broken connection).
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the client timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A success response carried a body that failed to deserialize.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// The human-readable message for this failure. For [`ClientError::Api`]
    /// this is exactly the server `detail` (or the operation default).
    pub fn message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns `true` if the failure never reached the service.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Network(_) | ClientError::Timeout(_))
    }

    /// The HTTP status code, if the service responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
