pub mod credential;
pub mod errors;
pub mod hasher;

pub use credential::Credential;
pub use credential::HashScheme;
pub use errors::PasswordError;
pub use hasher::PasswordHasher;
