//! Command-level error classification.

use thiserror::Error;

/// Top-level error type reported by the `cryptohelper` CLI.
///
/// Variants map to process exit codes:
/// - [`ServiceError::Internal`] → 1
/// - [`ServiceError::BadInput`] → 2
/// - [`ServiceError::AuthenticationFailed`] → 3
/// - [`ServiceError::Unavailable`] → 4
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller supplied something unusable: a bad key, a malformed blob, or missing input.
    #[error("bad input: {0}")]
    BadInput(String),

    /// The ciphertext did not authenticate under the given key.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// A required resource (OS entropy, stdin) is unavailable.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the process exit code that should be used for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ServiceError::Internal(_) => 1,
            ServiceError::BadInput(_) => 2,
            ServiceError::AuthenticationFailed(_) => 3,
            ServiceError::Unavailable(_) => 4,
        }
    }

    /// Returns the short machine-readable code used in JSON error output.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadInput(_) => "bad_input",
            ServiceError::AuthenticationFailed(_) => "authentication_failed",
            ServiceError::Unavailable(_) => "unavailable",
            ServiceError::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(ServiceError::Internal("x".into()).exit_code(), 1);
        assert_eq!(ServiceError::BadInput("x".into()).exit_code(), 2);
        assert_eq!(
            ServiceError::AuthenticationFailed("x".into()).exit_code(),
            3
        );
        assert_eq!(ServiceError::Unavailable("x".into()).exit_code(), 4);
    }

    #[test]
    fn codes_are_snake_case() {
        assert_eq!(ServiceError::BadInput("x".into()).code(), "bad_input");
        assert_eq!(
            ServiceError::AuthenticationFailed("x".into()).code(),
            "authentication_failed"
        );
    }

    #[test]
    fn display_includes_message() {
        let e = ServiceError::BadInput("invalid key: must be 32 bytes b64-encoded".into());
        assert!(e.to_string().contains("must be 32 bytes"));
    }
}
