//! Simple-to-use wrappers around NaCl's secretbox (XSalsa20-Poly1305).
//!
//! This crate does none of the cryptography itself; sealing and opening are
//! delegated to the RustCrypto [`crypto_secretbox`] implementation. What it
//! adds:
//!
//! - a 256-bit random key generator, returning the key base64-encoded;
//! - encrypt/decrypt functions that read and write base64 text;
//! - a fresh random 24-byte nonce per encryption, prepended to the sealed box.
//!
//! ```text
//! base64( nonce (24 bytes) || tag (16 bytes) || ciphertext )
//! ```
//!
//! Randomly generated nonces carry a negligible collision risk at 192 bits.
//!
//! # Example
//!
//! ```
//! let key = cryptohelper::generate_key()?;
//! let blob = cryptohelper::encrypt("hello", &key)?;
//! assert_eq!(cryptohelper::decrypt(&blob, &key)?, "hello");
//! # Ok::<(), cryptohelper::CipherError>(())
//! ```

pub mod error;
pub mod key;
pub mod random;
pub mod secretbox;

pub use error::CipherError;
pub use key::{decode_key, SecretKey, KEY_LEN};
pub use random::{OsRandom, RandomSource};
pub use secretbox::{SecretboxCodec, NONCE_LEN, TAG_LEN};

/// Generate a random 32-byte key from the OS CSPRNG, base64-encoded.
///
/// # Errors
///
/// Returns [`CipherError::RandomSourceFailure`] if OS entropy is unavailable.
pub fn generate_key() -> Result<String, CipherError> {
    SecretboxCodec::new().generate_key()
}

/// Encrypt `plaintext` under the base64 `key`; see [`SecretboxCodec::encrypt`].
///
/// # Errors
///
/// Returns [`CipherError::InvalidKey`] or [`CipherError::RandomSourceFailure`].
pub fn encrypt(plaintext: &str, key: &str) -> Result<String, CipherError> {
    SecretboxCodec::new().encrypt(plaintext, key)
}

/// Decrypt a base64 blob under the base64 `key`; see [`SecretboxCodec::decrypt`].
///
/// # Errors
///
/// Returns [`CipherError::InvalidKey`], [`CipherError::MalformedCiphertext`],
/// [`CipherError::AuthenticationFailure`] or [`CipherError::InvalidUtf8Plaintext`].
pub fn decrypt(ciphertext: &str, key: &str) -> Result<String, CipherError> {
    SecretboxCodec::new().decrypt(ciphertext, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_functions_round_trip() {
        let key = generate_key().unwrap();
        let blob = encrypt("hello", &key).unwrap();
        assert_eq!(decrypt(&blob, &key).unwrap(), "hello");
    }

    #[test]
    fn free_functions_reject_empty_key() {
        assert_eq!(encrypt("", ""), Err(CipherError::InvalidKey));
        assert_eq!(decrypt("", ""), Err(CipherError::InvalidKey));
    }
}
