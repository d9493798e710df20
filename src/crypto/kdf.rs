//! Key derivation: turns a password and salt into 80 bytes of key material
//! via scrypt.

use scrypt::Params;

use crate::error::{Error, Result};

/// scrypt cost parameter `N = 2^14 = 16384`.
const LOG_N: u8 = 14;
/// scrypt block size parameter `r`.
const R: u32 = 8;
/// scrypt parallelization parameter `p`.
const P: u32 = 1;
/// Total derived key material length in bytes: `rngKey(32) || rngIv(16) || authKey(32)`.
pub const KEY_MATERIAL_LEN: usize = 80;

/// The three keys sliced out of the 80 bytes of derived material.
pub struct KeyMaterial {
    /// AES-256-CTR key for the CSPRNG.
    pub rng_key: [u8; 32],
    /// AES-256-CTR IV for the CSPRNG.
    pub rng_iv: [u8; 16],
    /// HMAC-SHA256 key.
    pub auth_key: [u8; 32],
}

impl KeyMaterial {
    /// The 4-byte auth-check prefix of `auth_key`, stored in the header for
    /// fast password pre-validation.
    pub fn auth_check(&self) -> [u8; 4] {
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.auth_key[0..4]);
        out
    }

    fn from_bytes(bytes: [u8; KEY_MATERIAL_LEN]) -> Self {
        let mut rng_key = [0u8; 32];
        let mut rng_iv = [0u8; 16];
        let mut auth_key = [0u8; 32];
        rng_key.copy_from_slice(&bytes[0..32]);
        rng_iv.copy_from_slice(&bytes[32..48]);
        auth_key.copy_from_slice(&bytes[48..80]);
        Self {
            rng_key,
            rng_iv,
            auth_key,
        }
    }
}

/// Derives 80 bytes of key material from `password` and `salt` via
/// scrypt(N=16384, r=8, p=1).
///
/// # Errors
///
/// Returns [`Error::KdfFailure`] if scrypt rejects the fixed cost parameters
/// or output length, which should not occur in practice since both are
/// compile-time constants within scrypt's accepted ranges.
pub fn derive(password: &[u8], salt: &[u8]) -> Result<KeyMaterial> {
    let params = Params::new(LOG_N, R, P, KEY_MATERIAL_LEN)
        .map_err(|e| Error::KdfFailure(e.to_string()))?;
    let mut out = [0u8; KEY_MATERIAL_LEN];
    scrypt::scrypt(password, salt, &params, &mut out).map_err(|e| Error::KdfFailure(e.to_string()))?;
    Ok(KeyMaterial::from_bytes(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_is_deterministic() {
        let a = derive(b"hunter2", &[0u8; 32]).unwrap();
        let b = derive(b"hunter2", &[0u8; 32]).unwrap();
        assert_eq!(a.rng_key, b.rng_key);
        assert_eq!(a.rng_iv, b.rng_iv);
        assert_eq!(a.auth_key, b.auth_key);
    }

    #[test]
    fn derive_is_salt_sensitive() {
        let a = derive(b"hunter2", &[0u8; 32]).unwrap();
        let b = derive(b"hunter2", &[1u8; 32]).unwrap();
        assert_ne!(a.rng_key, b.rng_key);
    }

    #[test]
    fn derive_is_password_sensitive() {
        let a = derive(b"hunter2", &[0u8; 32]).unwrap();
        let b = derive(b"hunter3", &[0u8; 32]).unwrap();
        assert_ne!(a.auth_key, b.auth_key);
    }

    #[test]
    fn auth_check_is_prefix_of_auth_key() {
        let material = derive(b"hunter2", &[0u8; 32]).unwrap();
        assert_eq!(&material.auth_check(), &material.auth_key[0..4]);
    }
}
