//! AES-256-GCM-SIV sealing primitives for signup tokens.
//!
//! This module is intentionally free of configuration and serialisation
//! concerns. It provides the low-level encrypt/decrypt operations used by the
//! token codec.
//!
//! # Wire format
//!
//! ```text
//! <base64url-no-pad(nonce)>.<base64url-no-pad(tag)>.<base64url-no-pad(ciphertext)>
//! ```
//!
//! The format carries no version or key identifier, so it cannot be extended
//! (e.g. for key rotation) without a breaking change to every outstanding
//! token.

pub mod cipher;

pub use cipher::{EncryptedPayload, NONCE_LEN, TAG_LEN};
