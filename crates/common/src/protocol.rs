//! JSON bodies printed by `cryptohelper --format json`.
//!
//! Each subcommand writes exactly one of these objects to stdout on success, or
//! an [`ErrorResponse`] on failure.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// generate-key
// ---------------------------------------------------------------------------

/// Output of `cryptohelper generate-key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyResponse {
    /// Standard-base64 encoding of a fresh 32-byte key.
    pub key: String,
}

// ---------------------------------------------------------------------------
// encrypt / decrypt
// ---------------------------------------------------------------------------

/// Output of `cryptohelper encrypt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptResponse {
    /// Standard-base64 encoding of `nonce || sealed box`.
    pub ciphertext: String,
}

/// Output of `cryptohelper decrypt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptResponse {
    /// The recovered plaintext.
    pub plaintext: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Error body printed on any failure when JSON output is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_input"`).
    pub code: String,
    /// Human-readable description. Never contains key material or plaintext.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::ServiceError> for ErrorResponse {
    fn from(err: &crate::ServiceError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}
