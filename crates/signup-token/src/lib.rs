//! Stateless, tamper-evident signup tokens.
//!
//! A token carries an arbitrary JSON-serialisable payload (typically a
//! pending-registration record) across an untrusted channel such as a URL
//! or form field, with no server-side session state. The payload is sealed
//! with AES-256-GCM-SIV under a key derived from one operator-managed
//! secret, so any modification of a token is detected on read.
//!
//! # Token format
//!
//! ```text
//! <base64url-no-pad(nonce)>.<base64url-no-pad(tag)>.<base64url-no-pad(ciphertext)>
//! ```
//!
//! 96-bit random nonce, 128-bit authentication tag, ciphertext the length of
//! the JSON payload. A token decodes only under the key that created it, and
//! every invalid token (malformed, tampered, or sealed under another key)
//! reads back as `None` with no distinguishing detail.
//!
//! # Example
//!
//! ```
//! use serde_json::{json, Value};
//! use signup_token::{SecretKey, TokenCodec};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let key = SecretKey::derive("operator-managed-secret")?;
//! let codec = TokenCodec::new(key);
//!
//! let token = codec.create(&json!({"email": "a@b.com", "plan": "pro"}))?;
//! let payload: Value = codec.read(&token).ok_or("token rejected")?;
//! assert_eq!(payload["email"], "a@b.com");
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod key;

pub use codec::{CreateError, TokenCodec};
pub use config::{Config, ConfigError};
pub use key::{SecretKey, KEY_LEN};
