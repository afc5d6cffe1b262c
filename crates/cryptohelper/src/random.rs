//! Entropy source used for key and nonce generation.
//!
//! The codec never reaches for a process-wide RNG directly; it holds a
//! [`RandomSource`] so tests can substitute a deterministic or failing fake.

use crypto_secretbox::aead::{rand_core::RngCore, OsRng};

use crate::error::CipherError;

/// A cryptographically secure source of random bytes.
///
/// Implementations must be safe to share between threads without external
/// locking.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::RandomSourceFailure`] if the source cannot
    /// produce bytes. `dest` contents are unspecified on error.
    fn fill(&self, dest: &mut [u8]) -> Result<(), CipherError>;
}

/// The operating system CSPRNG (`getrandom`), via [`OsRng`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CipherError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CipherError::RandomSourceFailure(e.to_string()))
    }
}

/// Draw exactly `N` random bytes from `rng`.
pub(crate) fn random_array<const N: usize, R>(rng: &R) -> Result<[u8; N], CipherError>
where
    R: RandomSource + ?Sized,
{
    let mut bytes = [0u8; N];
    rng.fill(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_random_fills_buffer() {
        let mut buf = [0u8; 32];
        OsRandom.fill(&mut buf).unwrap();
        // All-zero output has probability 2^-256.
        assert_ne!(buf, [0u8; 32]);
    }

    #[test]
    fn os_random_differs_between_calls() {
        let a: [u8; 24] = random_array(&OsRandom).unwrap();
        let b: [u8; 24] = random_array(&OsRandom).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn random_array_propagates_failure() {
        let mut rng = MockRandomSource::new();
        rng.expect_fill()
            .times(1)
            .returning(|_| Err(CipherError::RandomSourceFailure("no entropy".into())));

        let result: Result<[u8; 8], _> = random_array(&rng);
        assert_eq!(
            result,
            Err(CipherError::RandomSourceFailure("no entropy".into()))
        );
    }
}
