use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;
use sha2::Digest;
use sha2::Sha256;

use super::credential::Credential;
use super::credential::HashScheme;
use super::errors::PasswordError;

/// Lowest bcrypt work factor accepted.
pub const MIN_COST: u32 = 4;
/// Highest bcrypt work factor accepted.
pub const MAX_COST: u32 = 31;
/// Work factor used when none is configured.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Password hashing implementation.
///
/// Every plaintext goes through a SHA-256 pre-pass whose hex digest is
/// what the adaptive hash actually sees. bcrypt only reads the first 72
/// bytes of its input, so hashing the raw password would silently
/// truncate long passwords.
///
/// New credentials are produced with the configured scheme. Verification
/// dispatches on the stored credential's own prefix, so bcrypt and
/// Argon2id credentials keep verifying after the configured scheme or
/// cost changes.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    scheme: HashScheme,
    cost: u32,
}

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher using bcrypt with the default work factor
    pub fn new() -> Self {
        Self {
            scheme: HashScheme::Bcrypt,
            cost: DEFAULT_COST,
        }
    }

    /// Select the scheme used for new credentials.
    pub fn with_scheme(mut self, scheme: HashScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set the bcrypt work factor (ignored by Argon2id, which uses its own defaults).
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn scheme(&self) -> HashScheme {
        self.scheme
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password, any length
    ///
    /// # Returns
    /// Self-describing credential (scheme tag, cost, salt and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - The adaptive hash rejected its parameters
    pub fn hash(&self, password: &str) -> Result<Credential, PasswordError> {
        let digest = prehash(password);

        let encoded = match self.scheme {
            HashScheme::Bcrypt => bcrypt::hash(digest.as_bytes(), self.cost)
                .map_err(|e| PasswordError::HashingFailed(e.to_string()))?,
            HashScheme::Argon2id => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(digest.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| PasswordError::HashingFailed(e.to_string()))?
            }
        };

        Ok(Credential::from_stored(encoded))
    }

    /// Verify a password against a stored credential.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `credential` - Stored credential
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `InvalidCredentialFormat` - Stored credential cannot be parsed
    pub fn verify(&self, password: &str, credential: &Credential) -> Result<bool, PasswordError> {
        let digest = prehash(password);

        match credential.scheme() {
            Some(HashScheme::Bcrypt) => bcrypt::verify(digest.as_bytes(), credential.as_str())
                .map_err(|e| PasswordError::InvalidCredentialFormat(e.to_string())),
            Some(HashScheme::Argon2id) => {
                let parsed = PasswordHash::new(credential.as_str())
                    .map_err(|e| PasswordError::InvalidCredentialFormat(e.to_string()))?;
                if parsed.salt.is_none() || parsed.hash.is_none() {
                    return Err(PasswordError::InvalidCredentialFormat(
                        "missing salt or digest".to_string(),
                    ));
                }

                match Argon2::default().verify_password(digest.as_bytes(), &parsed) {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(PasswordError::InvalidCredentialFormat(e.to_string())),
                }
            }
            None => Err(PasswordError::InvalidCredentialFormat(
                "unrecognized scheme prefix".to_string(),
            )),
        }
    }

    /// Fail-closed variant of [`verify`](Self::verify): a malformed
    /// credential counts as a mismatch.
    pub fn matches(&self, password: &str, credential: &Credential) -> bool {
        self.verify(password, credential).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn prehash(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}
