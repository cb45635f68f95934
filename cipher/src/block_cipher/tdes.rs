//! Triple DES (DES-EDE3), keying option 1: three independent 8 bytes keys.
//!
//! [SP 800-67 Rev. 2](https://nvlpubs.nist.gov/nistpubs/SpecialPublications/NIST.SP.800-67r2.pdf)

use crate::{BlockDecrypt, BlockEncrypt, CipherError};
use des::cipher::generic_array::GenericArray;
use des::cipher::{BlockDecrypt as _, BlockEncrypt as _, KeyInit};
use des::TdesEde3;

#[derive(Clone)]
pub struct TDES {
    cipher: TdesEde3,
}

impl TDES {
    pub const KEY_SIZE: usize = 24;
    pub const BLOCK_SIZE: usize = 8;

    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        TdesEde3::new_from_slice(key)
            .map(|cipher| Self { cipher })
            .map_err(|_| CipherError::InvalidKeySize {
                target: Self::KEY_SIZE,
                real: key.len(),
            })
    }
}

impl BlockEncrypt<8> for TDES {
    fn encrypt_block(&self, plaintext: &[u8; 8]) -> [u8; 8] {
        let mut block = GenericArray::clone_from_slice(plaintext);
        self.cipher.encrypt_block(&mut block);
        let mut out = [0u8; 8];
        out.copy_from_slice(block.as_slice());
        out
    }
}

impl BlockDecrypt<8> for TDES {
    fn decrypt_block(&self, ciphertext: &[u8; 8]) -> [u8; 8] {
        let mut block = GenericArray::clone_from_slice(ciphertext);
        self.cipher.decrypt_block(&mut block);
        let mut out = [0u8; 8];
        out.copy_from_slice(block.as_slice());
        out
    }
}
