//! Configuration loading and validation for the token subsystem.
//!
//! One value is required: the signup secret, read from the `TOKEN_SECRET`
//! environment variable. The host process must fail its startup with a clear
//! error if the secret is missing or blank, rather than silently deriving a
//! weak key from an empty string.

use serde::Deserialize;
use thiserror::Error;

use crate::key::SecretKey;

/// Errors raised while loading or validating configuration.
///
/// These are the only failures in the crate that surface as hard errors:
/// without a valid secret no token can be created or read, so the process
/// should refuse to start.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `TOKEN_SECRET` is unset, empty, or whitespace-only.
    #[error("TOKEN_SECRET is required and must not be empty")]
    EmptySecret,

    /// The environment could not be read or deserialised.
    #[error("failed to load configuration from environment: {0}")]
    Load(#[from] config::ConfigError),
}

/// Validated token subsystem configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Secret the AEAD key is derived from. **Required.**
    pub token_secret: String,
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TOKEN_SECRET` is absent or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;

        let c: Config = cfg.try_deserialize()?;
        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.token_secret.trim().is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(())
    }

    /// Derive the AEAD key from the configured secret.
    ///
    /// Derivation is deterministic, so this is typically called once at
    /// startup and the key handed to
    /// [`TokenCodec::new`](crate::codec::TokenCodec::new).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecret`] if the secret is blank.
    pub fn secret_key(&self) -> Result<SecretKey, ConfigError> {
        SecretKey::derive(&self.token_secret)
    }
}
