//! AES-128, FIPS 197.

use crate::{BlockDecrypt, BlockEncrypt, CipherError};
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt as _, BlockEncrypt as _, KeyInit};
use aes::Aes128;

#[derive(Clone)]
pub struct AES128 {
    cipher: Aes128,
}

impl AES128 {
    pub const KEY_SIZE: usize = 16;
    pub const BLOCK_SIZE: usize = 16;

    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        Aes128::new_from_slice(key)
            .map(|cipher| Self { cipher })
            .map_err(|_| CipherError::InvalidKeySize {
                target: Self::KEY_SIZE,
                real: key.len(),
            })
    }
}

impl BlockEncrypt<16> for AES128 {
    fn encrypt_block(&self, plaintext: &[u8; 16]) -> [u8; 16] {
        let mut block = GenericArray::clone_from_slice(plaintext);
        self.cipher.encrypt_block(&mut block);
        let mut out = [0u8; 16];
        out.copy_from_slice(block.as_slice());
        out
    }
}

impl BlockDecrypt<16> for AES128 {
    fn decrypt_block(&self, ciphertext: &[u8; 16]) -> [u8; 16] {
        let mut block = GenericArray::clone_from_slice(ciphertext);
        self.cipher.decrypt_block(&mut block);
        let mut out = [0u8; 16];
        out.copy_from_slice(block.as_slice());
        out
    }
}
