//! Authentication core
//!
//! - Password hashing (SHA-256 pre-pass, then bcrypt or Argon2id)
//! - JWT access token issuance and validation
//! - Startup-time validation of token and hashing settings
//!
//! Everything here is synchronous and free of I/O. Services own persistence
//! and decide how to map failures onto their transport.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new().with_cost(4);
//! let credential = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &credential).unwrap());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, HashSettings, TokenSettings};
//!
//! let auth = Authenticator::new(
//!     TokenSettings::new("secret_key_at_least_32_bytes_long!", "HS256", 30).unwrap(),
//!     HashSettings::new("bcrypt", 4).unwrap(),
//! );
//!
//! // Register: hash password
//! let credential = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &credential, 42).unwrap();
//!
//! // Every request: validate token, recover the principal id
//! let user_id: i64 = auth.validate_subject(&result.access_token).unwrap();
//! assert_eq!(user_id, 42);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod settings;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jsonwebtoken::Algorithm;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::Credential;
pub use password::HashScheme;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use settings::ConfigurationError;
pub use settings::HashSettings;
pub use settings::TokenSettings;
