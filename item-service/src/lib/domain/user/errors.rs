use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user id: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password policy violations at registration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: must be at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Why a request could not be bound to a principal.
///
/// Every variant except `Repository` collapses to the same
/// "not authenticated" response at the HTTP boundary; the variants only
/// exist for logs and tests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Expired token")]
    ExpiredToken,

    #[error("Token has no subject")]
    MissingSubject,

    #[error("Token subject is not a user id: {0}")]
    InvalidSubject(String),

    #[error("Principal no longer exists: {0}")]
    UnknownPrincipal(String),

    #[error("Principal is deactivated: {0}")]
    InactivePrincipal(String),

    #[error("Principal lookup failed: {0}")]
    Repository(String),
}

impl From<JwtError> for AuthFailure {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthFailure::ExpiredToken,
            JwtError::MissingSubject => AuthFailure::MissingSubject,
            JwtError::InvalidSubject(subject) => AuthFailure::InvalidSubject(subject),
            JwtError::Malformed(reason) | JwtError::EncodingFailed(reason) => {
                AuthFailure::MalformedToken(reason)
            }
        }
    }
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Authentication core errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    // Domain-level errors
    #[error("Email already registered: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
