//! Voter-held secrets.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// The secret a voter mixes into a commitment and must keep until reveal.
///
/// This type intentionally does not implement `Debug`, `Serialize`, or `Clone`
/// to prevent accidental exposure. Bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Secret(Vec<u8>);

impl Secret {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Hex-encode random bytes into a printable secret. The hex text itself,
    /// not the raw bytes, is what gets committed, so it can be typed back in.
    pub fn from_random_bytes(bytes: [u8; 32]) -> Self {
        let mut bytes = bytes;
        let secret = Self(hex::encode(bytes).into_bytes());
        bytes.zeroize();
        secret
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The secret as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl From<&str> for Secret {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_secret_is_printable_hex() {
        let secret = Secret::from_random_bytes([0x5a; 32]);
        assert_eq!(secret.as_bytes().len(), 64);
        assert_eq!(secret.as_str(), Some("5a".repeat(32).as_str()));
    }

    #[test]
    fn from_str_keeps_bytes() {
        let secret = Secret::from("x");
        assert_eq!(secret.as_bytes(), b"x");
        assert!(!secret.is_empty());
    }
}
