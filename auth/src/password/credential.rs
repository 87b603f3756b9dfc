use std::fmt;

/// Stored representation of a password.
///
/// Wraps the full encoded output of the adaptive hash (scheme tag, cost,
/// salt and digest). The `Debug` impl is redacted so a credential never
/// ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a credential string loaded from storage.
    pub fn from_stored(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded credential, for persistence only.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Scheme that produced this credential, derived from its prefix.
    pub fn scheme(&self) -> Option<HashScheme> {
        HashScheme::detect(&self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Adaptive hash used for new credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashScheme {
    #[default]
    Bcrypt,
    Argon2id,
}

impl HashScheme {
    fn detect(encoded: &str) -> Option<Self> {
        if encoded.starts_with("$2a$") || encoded.starts_with("$2b$") || encoded.starts_with("$2y$")
        {
            Some(Self::Bcrypt)
        } else if encoded.starts_with("$argon2id$") {
            Some(Self::Argon2id)
        } else {
            None
        }
    }

    /// Parse a scheme name as it appears in configuration.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bcrypt" => Some(Self::Bcrypt),
            "argon2" | "argon2id" => Some(Self::Argon2id),
            _ => None,
        }
    }
}
