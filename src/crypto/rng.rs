//! The keystream CSPRNG: AES-256-CTR exposed as an infinite byte source and
//! as 64-bit integer / float sources.
//!
//! The stream is append-only and shared between the alphabet shuffle phase
//! and the encode/decode payload phase (see [`crate::crypto::binder`] and
//! [`crate::engine`]); callers must consume it in lockstep on both sides of
//! a round-trip or the cipher desynchronizes.

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};

type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// AES-256-CTR keystream source.
pub struct Csprng {
    cipher: Aes256Ctr,
}

impl Csprng {
    /// Initializes the keystream with the RNG key and IV sliced from the
    /// derived key material.
    pub fn new(key: &[u8; 32], iv: &[u8; 16]) -> Self {
        Self {
            cipher: Aes256Ctr::new(key.into(), iv.into()),
        }
    }

    /// Returns the next `n` keystream bytes.
    pub fn next_bytes(&mut self, n: usize) -> Vec<u8> {
        let mut buf = vec![0u8; n];
        self.cipher.apply_keystream(&mut buf);
        buf
    }

    /// Returns the next 8 keystream bytes as a big-endian `u64`.
    pub fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.cipher.apply_keystream(&mut buf);
        u64::from_be_bytes(buf)
    }

    /// Returns a value in `[0, 1)` with 53 bits of precision, in the manner
    /// of `(nextU64() >> 11) * 2⁻⁵³`.
    pub fn next_float(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (1u64 << 53) as f64;
        ((self.next_u64() >> 11) as f64) * SCALE
    }
}
