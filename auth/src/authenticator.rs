use std::str::FromStr;
use std::sync::OnceLock;

use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::Credential;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::settings::HashSettings;
use crate::settings::TokenSettings;

/// Authentication coordinator combining password verification and token issuance.
///
/// Immutable once built; share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_settings: TokenSettings,
    decoy_credential: OnceLock<Option<Credential>>,
}

/// Plaintext behind the decoy credential. Nothing is ever stored under it.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Wrong password")]
    WrongPassword,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("JWT error: {0}")]
    Token(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `token_settings` - Validated signing secret, algorithm and ttl
    /// * `hash_settings` - Validated scheme and cost for new credentials
    pub fn new(token_settings: TokenSettings, hash_settings: HashSettings) -> Self {
        Self {
            password_hasher: hash_settings.hasher(),
            jwt_handler: JwtHandler::new(token_settings.secret(), token_settings.algorithm()),
            token_settings,
            decoy_credential: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<Credential, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored credential.
    ///
    /// # Errors
    /// * `InvalidCredentialFormat` - Stored credential is corrupt
    pub fn verify_password(
        &self,
        password: &str,
        credential: &Credential,
    ) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, credential)
    }

    /// Run one full verification against a decoy credential and report a mismatch.
    ///
    /// Call this when no stored credential exists for the claimed account, so
    /// a login for an unknown account costs the same work as a wrong password.
    /// The decoy is hashed with the configured scheme and cost on first use.
    pub fn verify_decoy(&self, password: &str) -> bool {
        let decoy = self
            .decoy_credential
            .get_or_init(|| self.password_hasher.hash(DECOY_PASSWORD).ok());

        if let Some(credential) = decoy {
            self.password_hasher.matches(password, credential);
        }
        false
    }

    /// Verify credentials and issue an access token for `subject`.
    ///
    /// # Errors
    /// * `WrongPassword` - Password does not match
    /// * `Password` - Stored credential is corrupt
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        credential: &Credential,
        subject: impl ToString,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, credential)? {
            return Err(AuthenticationError::WrongPassword);
        }

        let access_token = self.issue_token(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token for `subject` expiring one ttl from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(&self, subject: impl ToString) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, Utc::now(), self.token_settings.ttl())?;
        self.jwt_handler.encode(&claims)
    }

    /// Validate a token and return its subject.
    ///
    /// # Errors
    /// * `Malformed` - Signature, algorithm or structure is invalid
    /// * `Expired` - Token lifetime has elapsed
    /// * `MissingSubject` - Token carries no `sub`
    pub fn validate_token(&self, token: &str) -> Result<String, JwtError> {
        self.jwt_handler
            .decode(token)?
            .sub
            .ok_or(JwtError::MissingSubject)
    }

    /// Validate a token and parse its subject as a principal identifier.
    ///
    /// # Errors
    /// Everything [`validate_token`](Self::validate_token) returns, plus
    /// `InvalidSubject` when `sub` does not parse as `T`.
    pub fn validate_subject<T: FromStr>(&self, token: &str) -> Result<T, JwtError> {
        let subject = self.validate_token(token)?;
        subject
            .parse::<T>()
            .map_err(|_| JwtError::InvalidSubject(subject))
    }
}
