//! [`TokenCodec`]: create and read signup tokens.
//!
//! `create` serialises the payload to UTF-8 JSON, seals it, and renders the
//! three-segment token string. `read` reverses each step and collapses every
//! failure (malformed text, tampering, wrong key, invalid JSON) into `None`,
//! so a caller presenting a bad token observes exactly the same outcome as a
//! caller presenting no token at all.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::crypto::cipher::{self, CipherError, EncryptedPayload};
use crate::key::SecretKey;

/// Errors produced while creating a token.
///
/// For JSON-representable payloads these are unreachable in practice; they
/// exist so exotic `Serialize` implementations cannot panic the codec.
#[derive(Debug, Error)]
pub enum CreateError {
    /// The payload could not be serialised to JSON.
    #[error("failed to serialise payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The AEAD layer failed.
    #[error(transparent)]
    Cipher(#[from] CipherError),
}

/// Stage at which a token was rejected.
///
/// Internal only: `read` collapses all variants to `None` so the API surface
/// cannot be used as an oracle to distinguish tampering from malformed text.
#[derive(Debug, Error)]
enum DecodeError {
    /// Wrong segment count, invalid base64url, or wrong nonce/tag length.
    #[error("malformed token text")]
    Format,

    /// Authentication tag verification failed.
    #[error("authentication failed")]
    Integrity,

    /// The decrypted bytes are not the expected JSON shape.
    #[error("payload is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Stateless codec over a single injected [`SecretKey`].
///
/// Both operations are synchronous and side-effect-free aside from nonce
/// randomness, so one codec may be shared freely across threads behind
/// `&self`.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    key: SecretKey,
}

impl TokenCodec {
    /// Build a codec around an already-derived key.
    ///
    /// The key is injected rather than read from ambient configuration, which
    /// keeps the codec independently testable with arbitrary keys.
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }

    /// Serialise and seal `payload` into a token string.
    ///
    /// Two calls with the same payload produce different tokens (fresh nonce
    /// per call); both decode to the same payload.
    ///
    /// # Errors
    ///
    /// Returns [`CreateError`] if the payload cannot be serialised to JSON.
    pub fn create<T: Serialize>(&self, payload: &T) -> Result<String, CreateError> {
        let plaintext = serde_json::to_vec(payload).map_err(|e| {
            warn!(error = %e, "payload serialisation failed");
            CreateError::Serialize(e)
        })?;
        let sealed = cipher::encrypt(&plaintext, &self.key).map_err(|e| {
            warn!(error = %e, "token encryption failed");
            CreateError::Cipher(e)
        })?;
        Ok(sealed.to_string_repr())
    }

    /// Open a token string and deserialise the payload it carries.
    ///
    /// Returns `None` for any invalid input: wrong segment count, invalid
    /// base64url, failed authentication, wrong key, or undecodable JSON.
    /// This function never panics and never surfaces which stage failed.
    pub fn read<T: DeserializeOwned>(&self, token: &str) -> Option<T> {
        match self.read_inner(token) {
            Ok(payload) => Some(payload),
            Err(stage) => {
                // Token contents are attacker-controlled; log the stage for
                // operators but keep the caller-visible outcome uniform.
                debug!(stage = %stage, "token rejected");
                None
            }
        }
    }

    fn read_inner<T: DeserializeOwned>(&self, token: &str) -> Result<T, DecodeError> {
        let sealed =
            EncryptedPayload::from_str(token).map_err(|_| DecodeError::Format)?;
        let plaintext =
            cipher::decrypt(&sealed, &self.key).map_err(|_| DecodeError::Integrity)?;
        let payload = serde_json::from_slice(&plaintext)?;
        Ok(payload)
    }
}
