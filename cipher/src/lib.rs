mod error;
pub use error::CipherError;

pub mod block_cipher;
pub use block_cipher::{BlockDecrypt, BlockEncrypt};

pub mod cipher_mode;
pub use cipher_mode::BlockPadding;

pub mod rsa;

pub trait Encrypt {
    // appends to `ciphertext`, never clears it first
    fn encrypt(&self, plaintext: &[u8], ciphertext: &mut Vec<u8>) -> Result<(), CipherError>;
}

pub trait Decrypt {
    // appends to `plaintext`, never clears it first
    fn decrypt(&self, ciphertext: &[u8], plaintext: &mut Vec<u8>) -> Result<(), CipherError>;
}

pub trait Sign {
    fn sign(&self, msg: &[u8], sign: &mut Vec<u8>) -> Result<(), CipherError>;
}

pub trait Verify {
    fn verify(&self, msg: &[u8], sign: &[u8]) -> Result<(), CipherError>;
}
