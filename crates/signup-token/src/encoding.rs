//! URL-safe, unpadded base64 used for every token segment.
//!
//! Tokens travel in URLs and form fields, so the alphabet is `-`/`_` rather
//! than `+`/`/` and padding is omitted entirely. Decoding re-derives the byte
//! length from the text length and rejects anything that does not reconcile
//! to a whole byte sequence.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use thiserror::Error;

/// The input is not valid unpadded URL-safe base64.
///
/// Covers out-of-alphabet characters, embedded `=` padding, and lengths that
/// cannot correspond to any byte sequence.
#[derive(Debug, Error)]
#[error("invalid base64url text")]
pub struct FormatError;

/// Encode `bytes` as unpadded URL-safe base64.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode unpadded URL-safe base64 text back into bytes.
///
/// # Errors
///
/// Returns [`FormatError`] for any input the strict engine rejects. The
/// underlying cause is not preserved; callers treat every malformed segment
/// identically.
pub fn decode(text: &str) -> Result<Vec<u8>, FormatError> {
    URL_SAFE_NO_PAD.decode(text).map_err(|_| FormatError)
}
