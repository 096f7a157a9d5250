//! `Sec-WebSocket-Key` generation and the matching accept digest.
//!
//! The key is an anti-cache token defined by RFC 6455 §4.1, not a secret.
//! It only has to differ between connection attempts, so it is drawn from the
//! thread-local `rand` generator without any cryptographic requirement.

use base64::{engine::general_purpose, Engine as _};
use rand::Rng;

/// GUID appended to the key before hashing (RFC 6455 §1.3).
pub const WS_GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

const KEY_CHARS: &[u8; 74] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!\"$&/()=[]{}0123456789";
const KEY_LEN: usize = 16;

/// The base64 key sent in `Sec-WebSocket-Key`. One per connect attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeNonce(String);

impl HandshakeNonce {
    /// Draw 16 characters from the key alphabet and base64 them.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let raw: Vec<u8> = (0..KEY_LEN)
            .map(|_| KEY_CHARS[rng.gen_range(0..KEY_CHARS.len())])
            .collect();
        Self(general_purpose::STANDARD.encode(raw))
    }

    /// Wrap an already-encoded key.
    pub fn from_encoded(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `Sec-WebSocket-Accept` value a conforming server must return.
    pub fn expected_accept(&self) -> String {
        accept_key(&self.0)
    }
}

/// base64(SHA-1(key + GUID)).
pub fn accept_key(key: &str) -> String {
    let mut input = Vec::with_capacity(key.len() + WS_GUID.len());
    input.extend_from_slice(key.as_bytes());
    input.extend_from_slice(WS_GUID.as_bytes());
    general_purpose::STANDARD.encode(boring::sha::sha1(&input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc6455_accept_example() {
        let nonce = HandshakeNonce::from_encoded("dGhlIHNhbXBsZSBub25jZQ==");
        assert_eq!(nonce.expected_accept(), "s3pPLMBiTxaQ9kYGzzhZRbK+xOo=");
    }

    #[test]
    fn test_alphabet_size() {
        assert_eq!(KEY_CHARS.len(), 74);
        assert!(KEY_CHARS.iter().all(|c| c.is_ascii_graphic()));
    }

    #[test]
    fn test_generated_key_shape() {
        let nonce = HandshakeNonce::generate();
        // 16 bytes always encode to 24 base64 chars with "==" padding
        assert_eq!(nonce.as_str().len(), 24);
        assert!(nonce.as_str().ends_with("=="));

        let raw = general_purpose::STANDARD.decode(nonce.as_str()).unwrap();
        assert_eq!(raw.len(), KEY_LEN);
        assert!(raw.iter().all(|b| KEY_CHARS.contains(b)));
    }

    #[test]
    fn test_keys_differ_between_attempts() {
        let a = HandshakeNonce::generate();
        let b = HandshakeNonce::generate();
        assert_ne!(a, b);
    }
}
