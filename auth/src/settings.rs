use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;
use thiserror::Error;

use crate::password::hasher::MAX_COST;
use crate::password::hasher::MIN_COST;
use crate::password::HashScheme;
use crate::password::PasswordHasher;

/// Longest accepted token lifetime: one year.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

/// Invalid authentication settings. Only raised while starting up.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Token signing secret is empty")]
    MissingSecret,

    #[error("Unsupported token algorithm: {0} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),

    #[error("Token lifetime must be between 1 and {MAX_TTL_MINUTES} minutes, got {0}")]
    InvalidTtl(i64),

    #[error("Unsupported password hashing scheme: {0}")]
    UnsupportedHashScheme(String),

    #[error("Password hashing cost must be between {min} and {max}, got {actual}")]
    InvalidCost { min: u32, max: u32, actual: u32 },
}

/// Signing secret, algorithm and lifetime for access tokens.
#[derive(Clone)]
pub struct TokenSettings {
    secret: Vec<u8>,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenSettings {
    /// Validate raw token settings.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret, must not be empty
    /// * `algorithm` - JWT algorithm name, HMAC family only
    /// * `ttl_minutes` - Token lifetime in minutes, 1..=`MAX_TTL_MINUTES`
    ///
    /// # Errors
    /// * `MissingSecret`, `UnsupportedAlgorithm`, `InvalidTtl`
    pub fn new(
        secret: impl Into<Vec<u8>>,
        algorithm: &str,
        ttl_minutes: i64,
    ) -> Result<Self, ConfigurationError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigurationError::MissingSecret);
        }

        let algorithm = match Algorithm::from_str(algorithm.trim()) {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
            _ => return Err(ConfigurationError::UnsupportedAlgorithm(algorithm.to_string())),
        };

        let ttl = Some(ttl_minutes)
            .filter(|minutes| (1..=MAX_TTL_MINUTES).contains(minutes))
            .and_then(Duration::try_minutes)
            .ok_or(ConfigurationError::InvalidTtl(ttl_minutes))?;

        Ok(Self {
            secret,
            algorithm,
            ttl,
        })
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("ttl_minutes", &self.ttl.num_minutes())
            .finish()
    }
}

/// Scheme and work factor for new credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashSettings {
    scheme: HashScheme,
    cost: u32,
}

impl HashSettings {
    /// Validate raw hashing settings.
    ///
    /// # Errors
    /// * `UnsupportedHashScheme` - Name is neither bcrypt nor argon2id
    /// * `InvalidCost` - bcrypt cost outside 4..=31
    pub fn new(scheme: &str, cost: u32) -> Result<Self, ConfigurationError> {
        let scheme = HashScheme::from_name(scheme.trim())
            .ok_or_else(|| ConfigurationError::UnsupportedHashScheme(scheme.to_string()))?;

        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(ConfigurationError::InvalidCost {
                min: MIN_COST,
                max: MAX_COST,
                actual: cost,
            });
        }

        Ok(Self { scheme, cost })
    }

    pub fn hasher(&self) -> PasswordHasher {
        PasswordHasher::new()
            .with_scheme(self.scheme)
            .with_cost(self.cost)
    }
}

impl Default for HashSettings {
    fn default() -> Self {
        Self {
            scheme: HashScheme::default(),
            cost: crate::password::hasher::DEFAULT_COST,
        }
    }
}
