//! NaCl secretbox (XSalsa20-Poly1305) over base64 text blobs.
//!
//! # Blob format
//!
//! ```text
//! base64( nonce (24 bytes) || tag (16 bytes) || ciphertext )
//! ```
//!
//! The tag-then-ciphertext layout of the sealed region is the primitive's own
//! (NaCl compatible); this module only prepends the nonce. Offsets are fixed so
//! blobs stay readable by any other secretbox implementation using the same
//! framing.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use crypto_secretbox::{
    aead::{generic_array::GenericArray, Aead, KeyInit},
    XSalsa20Poly1305,
};
use tracing::debug;

use crate::error::CipherError;
use crate::key::{self, SecretKey};
use crate::random::{random_array, OsRandom, RandomSource};

/// Byte length of an XSalsa20 nonce (24 bytes = 192 bits).
pub const NONCE_LEN: usize = 24;

/// Byte length of the Poly1305 authentication tag inside the sealed region.
pub const TAG_LEN: usize = 16;

/// Encrypts and decrypts base64 secretbox blobs.
///
/// Holds nothing but its [`RandomSource`]; every call is independent, so a
/// single codec can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct SecretboxCodec<R = OsRandom> {
    rng: R,
}

impl SecretboxCodec<OsRandom> {
    /// A codec drawing keys and nonces from the OS CSPRNG.
    pub fn new() -> Self {
        Self { rng: OsRandom }
    }
}

impl<R: RandomSource> SecretboxCodec<R> {
    /// A codec drawing keys and nonces from `rng`.
    pub fn with_random_source(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a random 32-byte key, returned base64-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::RandomSourceFailure`] if the random source fails.
    pub fn generate_key(&self) -> Result<String, CipherError> {
        key::generate_key(&self.rng)
    }

    /// Encrypt `plaintext` under the base64 `key`.
    ///
    /// A fresh nonce is drawn per call, so encrypting the same input twice
    /// yields different blobs.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKey`] if `key` is not a b64-encoded
    /// 32-byte buffer, or [`CipherError::RandomSourceFailure`] if no nonce
    /// could be drawn. [`CipherError::SealFailure`] is reserved for inputs
    /// beyond the cipher's length limit.
    pub fn encrypt(&self, plaintext: &str, key: &str) -> Result<String, CipherError> {
        self.encrypt_bytes(plaintext.as_bytes(), key)
    }

    /// Encrypt arbitrary bytes; see [`SecretboxCodec::encrypt`].
    ///
    /// # Errors
    ///
    /// Same as [`SecretboxCodec::encrypt`].
    pub fn encrypt_bytes(&self, plaintext: &[u8], key: &str) -> Result<String, CipherError> {
        let key = SecretKey::decode(key)?;
        let nonce: [u8; NONCE_LEN] = random_array(&self.rng)?;

        let cipher = XSalsa20Poly1305::new(GenericArray::from_slice(key.as_bytes()));
        let sealed = cipher
            .encrypt(GenericArray::from_slice(&nonce), plaintext)
            .map_err(|_| CipherError::SealFailure)?;

        let mut blob = Vec::with_capacity(NONCE_LEN + sealed.len());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&sealed);

        debug!(
            plaintext_len = plaintext.len(),
            blob_len = blob.len(),
            "sealed secretbox"
        );
        Ok(STANDARD.encode(blob))
    }

    /// Decrypt a base64 blob produced by [`SecretboxCodec::encrypt`].
    ///
    /// # Errors
    ///
    /// - [`CipherError::InvalidKey`] if `key` is not a b64-encoded 32-byte buffer.
    /// - [`CipherError::MalformedCiphertext`] if `ciphertext` is not base64 or
    ///   is shorter than the nonce.
    /// - [`CipherError::AuthenticationFailure`] if the box fails to open.
    /// - [`CipherError::InvalidUtf8Plaintext`] if the recovered bytes are not UTF-8.
    pub fn decrypt(&self, ciphertext: &str, key: &str) -> Result<String, CipherError> {
        let plaintext = self.decrypt_bytes(ciphertext, key)?;
        String::from_utf8(plaintext).map_err(|_| CipherError::InvalidUtf8Plaintext)
    }

    /// Decrypt a base64 blob to raw bytes; see [`SecretboxCodec::decrypt`].
    ///
    /// # Errors
    ///
    /// Same as [`SecretboxCodec::decrypt`], minus the UTF-8 check.
    pub fn decrypt_bytes(&self, ciphertext: &str, key: &str) -> Result<Vec<u8>, CipherError> {
        let key = SecretKey::decode(key)?;
        let blob = STANDARD
            .decode(ciphertext)
            .map_err(|_| CipherError::MalformedCiphertext)?;
        if blob.len() < NONCE_LEN {
            return Err(CipherError::MalformedCiphertext);
        }
        let (nonce, sealed) = blob.split_at(NONCE_LEN);

        let cipher = XSalsa20Poly1305::new(GenericArray::from_slice(key.as_bytes()));
        let plaintext = cipher
            .decrypt(GenericArray::from_slice(nonce), sealed)
            .map_err(|_| CipherError::AuthenticationFailure)?;

        debug!(
            blob_len = blob.len(),
            plaintext_len = plaintext.len(),
            "opened secretbox"
        );
        Ok(plaintext)
    }
}
