//! [`SecretKey`]: a 256-bit secretbox key and its base64 text form.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::CipherError;
use crate::random::{random_array, RandomSource};

/// Byte length of a secretbox key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Raw key material, exactly [`KEY_LEN`] bytes.
///
/// The buffer is zeroized on drop, and `Debug` never prints it.
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Draw a fresh key from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::RandomSourceFailure`] if `rng` fails.
    pub fn generate<R: RandomSource + ?Sized>(rng: &R) -> Result<Self, CipherError> {
        random_array(rng).map(Self)
    }

    /// Parse the standard-base64 text form of a key.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKey`] if `text` is not valid base64 or
    /// does not decode to exactly [`KEY_LEN`] bytes. Decoding is strict:
    /// padding is required, and embedded whitespace or non-zero trailing bits
    /// are rejected.
    pub fn decode(text: &str) -> Result<Self, CipherError> {
        let decoded = Zeroizing::new(STANDARD.decode(text).map_err(|_| CipherError::InvalidKey)?);
        <[u8; KEY_LEN]>::try_from(decoded.as_slice())
            .map(Self)
            .map_err(|_| CipherError::InvalidKey)
    }

    /// Standard-base64 (padded) text form of this key.
    pub fn encode(&self) -> String {
        STANDARD.encode(self.0)
    }

    /// Expose the raw key bytes for the AEAD primitive.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl ZeroizeOnDrop for SecretKey {}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// Generate a random key and return its base64 text form.
///
/// # Errors
///
/// Returns [`CipherError::RandomSourceFailure`] if `rng` fails.
pub fn generate_key<R: RandomSource + ?Sized>(rng: &R) -> Result<String, CipherError> {
    SecretKey::generate(rng).map(|key| key.encode())
}

/// Decode a base64 key, validating its length.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKey`]; see [`SecretKey::decode`].
pub fn decode_key(text: &str) -> Result<SecretKey, CipherError> {
    SecretKey::decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{MockRandomSource, OsRandom};
    use base64::engine::general_purpose::STANDARD_NO_PAD;

    #[test]
    fn generated_key_decodes_to_32_bytes() {
        let text = generate_key(&OsRandom).unwrap();
        assert_eq!(STANDARD.decode(&text).unwrap().len(), KEY_LEN);
        assert!(decode_key(&text).is_ok());
    }

    #[test]
    fn generated_keys_differ() {
        let a = generate_key(&OsRandom).unwrap();
        let b = generate_key(&OsRandom).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn generate_uses_injected_source() {
        let mut rng = MockRandomSource::new();
        rng.expect_fill().times(1).returning(|dest| {
            dest.fill(0xAB);
            Ok(())
        });
        let text = generate_key(&rng).unwrap();
        assert_eq!(text, STANDARD.encode([0xABu8; KEY_LEN]));
    }

    #[test]
    fn generate_surfaces_random_source_failure() {
        let mut rng = MockRandomSource::new();
        rng.expect_fill()
            .returning(|_| Err(CipherError::RandomSourceFailure("entropy".into())));
        assert!(matches!(
            generate_key(&rng),
            Err(CipherError::RandomSourceFailure(_))
        ));
    }

    #[test]
    fn decode_rejects_empty_string() {
        assert_eq!(decode_key("").unwrap_err(), CipherError::InvalidKey);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let short = STANDARD.encode([1u8; 16]);
        let long = STANDARD.encode([1u8; 33]);
        assert_eq!(decode_key(&short).unwrap_err(), CipherError::InvalidKey);
        assert_eq!(decode_key(&long).unwrap_err(), CipherError::InvalidKey);
    }

    #[test]
    fn decode_rejects_bad_base64() {
        assert_eq!(decode_key("!!!not-base64!!!").unwrap_err(), CipherError::InvalidKey);
    }

    #[test]
    fn decode_rejects_url_safe_alphabet() {
        // 0xFB.. encodes with '+' and '/' in the standard alphabet.
        let standard = STANDARD.encode([0xFBu8; KEY_LEN]);
        let url_safe = standard.replace('+', "-").replace('/', "_");
        assert_ne!(standard, url_safe);
        assert_eq!(decode_key(&url_safe).unwrap_err(), CipherError::InvalidKey);
    }

    #[test]
    fn decode_rejects_missing_padding() {
        let unpadded = STANDARD_NO_PAD.encode([0u8; KEY_LEN]);
        assert!(!unpadded.ends_with('='));
        assert_eq!(decode_key(&unpadded).unwrap_err(), CipherError::InvalidKey);
    }

    #[test]
    fn decode_rejects_embedded_newline() {
        let text = STANDARD.encode([0u8; KEY_LEN]);
        let wrapped = format!("{}\n{}", &text[..20], &text[20..]);
        assert_eq!(decode_key(&wrapped).unwrap_err(), CipherError::InvalidKey);
    }

    #[test]
    fn decode_rejects_non_zero_trailing_bits() {
        // 32 zero bytes end in "AA="; "AB=" sets a bit past the last byte.
        let text = STANDARD.encode([0u8; KEY_LEN]);
        let sloppy = format!("{}AB=", &text[..text.len() - 3]);
        assert_eq!(decode_key(&sloppy).unwrap_err(), CipherError::InvalidKey);
    }

    #[test]
    fn key_is_zeroized_on_drop() {
        fn assert_zeroize_on_drop<T: ZeroizeOnDrop>() {}
        assert_zeroize_on_drop::<SecretKey>();

        let mut key = std::mem::ManuallyDrop::new(SecretKey::from_bytes([0x42u8; KEY_LEN]));
        // SAFETY: `key` is never used as a `SecretKey` again; the plain byte
        // array stays readable in the `ManuallyDrop` slot after drop runs.
        unsafe { std::ptr::drop_in_place(&mut *key) };
        assert_eq!(key.0, [0u8; KEY_LEN]);
    }

    #[test]
    fn encode_decode_preserves_bytes() {
        let key = SecretKey::from_bytes([7u8; KEY_LEN]);
        let decoded = decode_key(&key.encode()).unwrap();
        assert_eq!(decoded.as_bytes(), &[7u8; KEY_LEN]);
    }

    #[test]
    fn debug_redacts_key_material() {
        let key = SecretKey::from_bytes([9u8; KEY_LEN]);
        assert_eq!(format!("{key:?}"), "SecretKey([REDACTED])");
    }
}
