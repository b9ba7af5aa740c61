//! Secret-key derivation from the configured signup secret.
//!
//! The 256-bit AEAD key is a single SHA-256 digest of the secret's UTF-8
//! bytes. No salt, iteration count, or key-stretching is applied: the secret
//! is operator-managed, high-entropy configuration, not a user password.
//! Swapping in a password KDF here would change the effective security model
//! of every token in circulation without changing the wire format.

use sha2::{Digest, Sha256};

use crate::config::ConfigError;

/// Byte length of the derived AEAD key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// Derived once at startup and injected into
/// [`TokenCodec`](crate::codec::TokenCodec). When this type is dropped, the
/// memory is overwritten with zeroes to minimise the window during which key
/// material lives in RAM.
#[derive(Clone)]
pub struct SecretKey(Box<[u8; KEY_LEN]>);

impl SecretKey {
    /// Derive a [`SecretKey`] from the configured secret string.
    ///
    /// Derivation is pure and deterministic: the same secret always yields
    /// the same key, so tokens remain readable across process restarts as
    /// long as the configuration is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecret`] if the secret is empty or
    /// whitespace-only. A blank secret must never silently become a weak key.
    pub fn derive(secret: &str) -> Result<Self, ConfigError> {
        if secret.trim().is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        let digest = Sha256::digest(secret.as_bytes());
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(&digest);
        Ok(Self(buf))
    }

    /// Borrow the raw key bytes for cipher construction.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("SecretKey([REDACTED])")
    }
}
