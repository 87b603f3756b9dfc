use std::env;

use auth::ConfigurationError;
use auth::HashSettings;
use auth::TokenSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for item-service.
///
/// Loaded once at startup from configuration files with environment
/// variable overrides, then passed down explicitly.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

/// PostgreSQL database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Access token configuration. Every field is mandatory.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: String,
    pub expiration_minutes: i64,
}

/// Password hashing configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    #[serde(default = "default_password_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_password_cost")]
    pub cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            algorithm: default_password_algorithm(),
            cost: default_password_cost(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

/// Unprefixed process environment, `SECTION__KEY` mapped to `section.key`.
fn environment() -> Environment {
    Environment::default().separator("__").try_parsing(true)
}

fn default_max_connections() -> u32 {
    5
}

fn default_password_algorithm() -> String {
    "bcrypt".to_string()
}

fn default_password_cost() -> u32 {
    auth::password::hasher::DEFAULT_COST
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Returns error if required configuration values are missing or invalid
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        Self::layered(&run_mode, environment())
    }

    fn layered(run_mode: &str, environment: Environment) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(environment)
            .build()?;

        configuration.try_deserialize()
    }

    /// Validate the token and hashing sections.
    ///
    /// # Errors
    /// Returns the first invalid setting; the process must not serve traffic
    pub fn auth_settings(&self) -> Result<(TokenSettings, HashSettings), ConfigurationError> {
        let token_settings = TokenSettings::new(
            self.jwt.secret.as_bytes(),
            &self.jwt.algorithm,
            self.jwt.expiration_minutes,
        )?;
        let hash_settings = HashSettings::new(&self.password.algorithm, self.password.cost)?;

        Ok((token_settings, hash_settings))
    }
}
