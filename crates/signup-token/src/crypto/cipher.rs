//! AES-256-GCM-SIV encryption and decryption of serialised payload bytes.
//!
//! **Algorithm choice:** AES-256-GCM-SIV (RFC 8452), a nonce-misuse-resistant
//! member of the GCM family with a 96-bit nonce and 128-bit tag. Every call
//! still draws a fresh random nonce; misuse resistance is a backstop, not a
//! licence to reuse nonces.
//!
//! The tag is kept detached from the ciphertext so that nonce, tag, and
//! ciphertext can each become their own token segment.

use aes_gcm_siv::{
    aead::{AeadInPlace, KeyInit, OsRng},
    Aes256GcmSiv, Nonce, Tag,
};
use thiserror::Error;

use crate::encoding;
use crate::key::SecretKey;

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// A sealed payload, parsed from or ready to become a token string.
///
/// The string representation is
/// `<base64url(nonce)>.<base64url(tag)>.<base64url(ciphertext)>`, each
/// segment unpadded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw authentication tag bytes.
    pub tag: [u8; TAG_LEN],
    /// Raw ciphertext bytes, same length as the plaintext.
    pub ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    /// Encode this value to its canonical token string.
    pub fn to_string_repr(&self) -> String {
        format!(
            "{}.{}.{}",
            encoding::encode(self.nonce),
            encoding::encode(self.tag),
            encoding::encode(&self.ciphertext),
        )
    }

    /// Parse a token string back into an [`EncryptedPayload`].
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidFormat`] unless the input is exactly
    /// three valid base64url segments with a 12-byte nonce and a 16-byte tag.
    pub fn from_str(s: &str) -> Result<Self, CipherError> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(CipherError::InvalidFormat);
        }

        let nonce_bytes =
            encoding::decode(parts[0]).map_err(|_| CipherError::InvalidFormat)?;
        let tag_bytes = encoding::decode(parts[1]).map_err(|_| CipherError::InvalidFormat)?;
        let ciphertext = encoding::decode(parts[2]).map_err(|_| CipherError::InvalidFormat)?;

        if nonce_bytes.len() != NONCE_LEN || tag_bytes.len() != TAG_LEN {
            return Err(CipherError::InvalidFormat);
        }
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&nonce_bytes);
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&tag_bytes);

        Ok(Self {
            nonce,
            tag,
            ciphertext,
        })
    }
}

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// Tag verification or an internal AEAD operation failed. On the decrypt
    /// path this means tampering, truncation, or a wrong key.
    #[error("aead operation failed")]
    AeadFailure,

    /// The token string does not match the expected three-segment structure.
    #[error("invalid token format")]
    InvalidFormat,
}

/// Encrypt serialised payload bytes under `key`.
///
/// A fresh 96-bit nonce is drawn from the OS CSPRNG on every call; callers
/// cannot supply their own. Nonce reuse under one key is therefore impossible
/// by construction.
///
/// # Errors
///
/// Returns [`CipherError::AeadFailure`] on an internal AEAD error (should be
/// unreachable with a valid key and nonce).
pub fn encrypt(plaintext: &[u8], key: &SecretKey) -> Result<EncryptedPayload, CipherError> {
    let cipher = build_cipher(key);

    // Use OsRng for a cryptographically secure random nonce.
    use aes_gcm_siv::aead::rand_core::RngCore;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let mut ciphertext = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(nonce, b"", &mut ciphertext)
        .map_err(|_| CipherError::AeadFailure)?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(&tag);

    Ok(EncryptedPayload {
        nonce: nonce_bytes,
        tag: tag_bytes,
        ciphertext,
    })
}

/// Decrypt an [`EncryptedPayload`] back to plaintext bytes.
///
/// The tag is verified before any plaintext is released; there is no path
/// that returns partial or unauthenticated output.
///
/// # Errors
///
/// Returns [`CipherError::AeadFailure`] if authentication fails (wrong key or
/// tampered data).
pub fn decrypt(sealed: &EncryptedPayload, key: &SecretKey) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key);
    let nonce = Nonce::from_slice(&sealed.nonce);
    let tag = Tag::from_slice(&sealed.tag);

    let mut plaintext = sealed.ciphertext.clone();
    cipher
        .decrypt_in_place_detached(nonce, b"", &mut plaintext, tag)
        .map_err(|_| CipherError::AeadFailure)?;
    Ok(plaintext)
}

fn build_cipher(key: &SecretKey) -> Aes256GcmSiv {
    // SecretKey is a fixed 32-byte buffer, so construction cannot fail.
    Aes256GcmSiv::new(key.as_bytes().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> SecretKey {
        SecretKey::derive("cipher-test-secret").unwrap()
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let key = test_key();
        let plaintext = br#"{"email":"a@b.com"}"#;
        let sealed = encrypt(plaintext, &key).unwrap();
        let decrypted = decrypt(&sealed, &key).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn nonce_is_fresh_per_call() {
        let key = test_key();
        let a = encrypt(b"same plaintext", &key).unwrap();
        let b = encrypt(b"same plaintext", &key).unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let sealed = encrypt(b"secret", &test_key()).unwrap();
        let other = SecretKey::derive("a different secret").unwrap();
        assert!(decrypt(&sealed, &other).is_err());
    }

    #[test]
    fn tampered_ciphertext_fails_auth() {
        let key = test_key();
        let mut sealed = encrypt(b"tamper me", &key).unwrap();
        sealed.ciphertext[0] ^= 0x01;
        assert!(decrypt(&sealed, &key).is_err());
    }

    #[test]
    fn tampered_tag_fails_auth() {
        let key = test_key();
        let mut sealed = encrypt(b"tamper me", &key).unwrap();
        sealed.tag[TAG_LEN - 1] ^= 0x01;
        assert!(decrypt(&sealed, &key).is_err());
    }

    #[test]
    fn tampered_nonce_fails_auth() {
        let key = test_key();
        let mut sealed = encrypt(b"tamper me", &key).unwrap();
        sealed.nonce[0] ^= 0x01;
        assert!(decrypt(&sealed, &key).is_err());
    }

    #[test]
    fn ciphertext_length_matches_plaintext() {
        let key = test_key();
        let sealed = encrypt(b"0123456789", &key).unwrap();
        assert_eq!(sealed.ciphertext.len(), 10);
    }

    #[test]
    fn string_repr_round_trip() {
        let key = test_key();
        let sealed = encrypt(b"hello", &key).unwrap();
        let s = sealed.to_string_repr();
        let parsed = EncryptedPayload::from_str(&s).unwrap();
        assert_eq!(parsed, sealed);
    }

    #[test]
    fn string_repr_segment_lengths() {
        let key = test_key();
        let s = encrypt(b"hello", &key).unwrap().to_string_repr();
        let parts: Vec<&str> = s.split('.').collect();
        // 12 raw bytes -> 16 chars, 16 raw bytes -> 22 chars, both unpadded.
        assert_eq!(parts[0].len(), 16);
        assert_eq!(parts[1].len(), 22);
        assert!(!s.contains('='));
    }

    #[test]
    fn from_str_rejects_too_few_segments() {
        assert!(EncryptedPayload::from_str("a.b").is_err());
    }

    #[test]
    fn from_str_rejects_too_many_segments() {
        assert!(EncryptedPayload::from_str("a.b.c.d").is_err());
    }

    #[test]
    fn from_str_rejects_bad_base64() {
        assert!(EncryptedPayload::from_str("!!!.b.c").is_err());
    }

    #[test]
    fn from_str_rejects_wrong_nonce_length() {
        let key = test_key();
        let sealed = encrypt(b"x", &key).unwrap();
        let s = format!(
            "{}.{}.{}",
            crate::encoding::encode(b"short"),
            crate::encoding::encode(sealed.tag),
            crate::encoding::encode(&sealed.ciphertext),
        );
        assert!(EncryptedPayload::from_str(&s).is_err());
    }

    #[test]
    fn from_str_rejects_wrong_tag_length() {
        let key = test_key();
        let sealed = encrypt(b"x", &key).unwrap();
        let s = format!(
            "{}.{}.{}",
            crate::encoding::encode(sealed.nonce),
            crate::encoding::encode(b"not sixteen"),
            crate::encoding::encode(&sealed.ciphertext),
        );
        assert!(EncryptedPayload::from_str(&s).is_err());
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let key = test_key();
        let sealed = encrypt(b"", &key).unwrap();
        assert!(sealed.ciphertext.is_empty());
        assert_eq!(decrypt(&sealed, &key).unwrap(), b"");
    }
}
