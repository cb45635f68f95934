//! Block cipher primitives behind fixed-size block traits.
//!
//! The primitives themselves come from the RustCrypto `des` and `aes` crates, the wrappers only adapt
//! them to the `[u8; N]` block interface that the cipher modes in this crate are written against.

pub trait BlockEncrypt<const BLOCK_SIZE: usize> {
    fn encrypt_block(&self, plaintext: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE];
}

pub trait BlockDecrypt<const BLOCK_SIZE: usize> {
    fn decrypt_block(&self, ciphertext: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE];
}

mod aes128;
pub use aes128::AES128;

mod tdes;
pub use tdes::TDES;
