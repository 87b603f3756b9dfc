use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Undecodable token, bad signature, wrong algorithm or missing `exp`.
    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token has no subject")]
    MissingSubject,

    #[error("Token subject is not a valid identifier: {0}")]
    InvalidSubject(String),
}
