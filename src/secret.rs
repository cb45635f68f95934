//! Password based key for the key bundle fields, and the shared LTPA secret it unlocks.
//!
//! A bundle field is `base64(DES-EDE3(value, pad24(sha1(password))))`, the 3-key-DES runs in ECB mode with
//! PKCS #5 padding.

use crate::error::{LtpaError, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use cipher::block_cipher::{AES128, TDES};
use cipher::cipher_mode::{AES128Cbc, TDESEcb};
use cipher::Decrypt;
use sha1::{Digest, Sha1};
use std::fmt::{Debug, Formatter};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

pub const SECRET_KEY_LEN: usize = TDES::KEY_SIZE;
pub const AES_KEY_LEN: usize = AES128::KEY_SIZE;

/// `sha1(password)` right padded with zero bytes to 24 bytes.
pub fn derive_key(password: &str) -> [u8; SECRET_KEY_LEN] {
    let mut key = [0u8; SECRET_KEY_LEN];
    let digest = Sha1::digest(password.as_bytes());
    key[..digest.len()].copy_from_slice(digest.as_slice());
    key
}

/// Decodes and decrypts one base64 field of the key bundle.
pub fn decrypt_field(payload: &str, key: &[u8]) -> Result<Vec<u8>> {
    let ciphertext = STANDARD.decode(payload.trim())?;
    let ecb = TDESEcb::new(TDES::new(key)?);

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    ecb.decrypt(ciphertext.as_slice(), &mut plaintext)?;
    Ok(plaintext)
}

/// The 24 bytes LTPA secret, the 3-key-DES key for v1 tokens and, truncated to 16 bytes, both AES key and IV
/// for v2 tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    key: [u8; SECRET_KEY_LEN],
}

impl SecretKey {
    /// Decrypts the bundle's 3DES key field with the password.
    pub fn derive(des3_key: &str, password: &str) -> Result<Self> {
        #[allow(unused_mut)]
        let mut key = derive_key(password);
        let r = decrypt_field(des3_key, key.as_slice());
        #[cfg(feature = "sec-zeroize")]
        key.zeroize();

        let mut plaintext = r?;
        let secret = Self::from_bytes(plaintext.as_slice());
        #[cfg(feature = "sec-zeroize")]
        plaintext.zeroize();
        #[cfg(not(feature = "sec-zeroize"))]
        plaintext.clear();

        secret.map_err(|_| {
            LtpaError::Decryption(format!(
                "the decrypted 3DES key is not {SECRET_KEY_LEN} bytes, wrong password?"
            ))
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let key = <[u8; SECRET_KEY_LEN]>::try_from(bytes).map_err(|_| {
            LtpaError::InvalidArgument(format!(
                "secret key must be {SECRET_KEY_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self { key })
    }

    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LEN] {
        &self.key
    }

    /// The first 16 bytes, used as AES-128 key and as IV.
    pub fn aes_key(&self) -> [u8; AES_KEY_LEN] {
        let mut key = [0u8; AES_KEY_LEN];
        key.copy_from_slice(&self.key[..AES_KEY_LEN]);
        key
    }

    pub(crate) fn tdes_ecb(&self) -> Result<TDESEcb> {
        Ok(TDESEcb::new(TDES::new(self.key.as_slice())?))
    }

    // key and IV are the same bytes, existing LtpaToken2 issuers depend on it
    pub(crate) fn aes_cbc(&self) -> Result<AES128Cbc> {
        let key = self.aes_key();
        Ok(AES128Cbc::new(AES128::new(key.as_slice())?, key))
    }
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

#[cfg(feature = "sec-zeroize")]
impl Drop for SecretKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}
