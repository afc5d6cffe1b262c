//! Errors produced by the key and secretbox layers.

use thiserror::Error;

use crate::key::KEY_LEN;
use crate::secretbox::NONCE_LEN;

/// Errors produced by [`generate_key`](crate::generate_key),
/// [`encrypt`](crate::encrypt) and [`decrypt`](crate::decrypt).
///
/// Every variant is terminal for the call that produced it. A tampered blob
/// and a wrong key are indistinguishable: both surface as
/// [`CipherError::AuthenticationFailure`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// The random source could not produce bytes (e.g. OS entropy unavailable).
    #[error("random source failure: {0}")]
    RandomSourceFailure(String),

    /// The key is not valid base64 or does not decode to [`KEY_LEN`] bytes.
    #[error("invalid key: must be {KEY_LEN} bytes b64-encoded")]
    InvalidKey,

    /// The ciphertext is not valid base64 or is shorter than the [`NONCE_LEN`]-byte nonce.
    #[error("malformed ciphertext: expected b64 of at least {NONCE_LEN} bytes")]
    MalformedCiphertext,

    /// The secretbox failed to open (tampered, truncated, or wrong key).
    #[error("ciphertext failed to authenticate")]
    AuthenticationFailure,

    /// Sealing failed; only possible past the cipher's keystream length limit.
    #[error("secretbox seal failed")]
    SealFailure,

    /// The box opened, but the recovered plaintext is not UTF-8.
    #[error("decrypted plaintext is not valid UTF-8")]
    InvalidUtf8Plaintext,
}
