//! # Recommendation for Block Cipher Mode of Operation
//!
//! [NIST 800-38A, Recommendation for Block Cipher Modes of operation Methods and Techniques](https://nvlpubs.nist.gov/nistpubs/Legacy/SP/nistspecialpublication800-38a.pdf)
//!
//! ## The Electronic Codebook Mode(ECB)
//!
//! $$
//! C_j = Encrypt(P_j), j = 1...n
//!
//! P_j = Decrypt(C_j), j = 1...n
//! $$
//!
//! ## The Cipher Block Chaining Mode(CBC)
//!
//! $$
//! C_1 = Encrypt(P_1 \xor IV); C_j = Encrypt(P_j \xor C_{j-1}), j = 2...n
//!
//! P_1 = Decrypt(C_1) \xor IV; P_j = Decrypt(C_j) \xor C_{j-1}, j = 2...n
//! $$
//!
//! Both modes here are one-shot: every call pads, encrypts and returns, no state is kept between calls.

mod padding;
pub use padding::{BlockPadding, EmptyPadding, PKCS7Padding};

mod ecb;
pub use ecb::{TDESEcb, ECB};

mod cbc;
pub use cbc::{AES128Cbc, CBC};

use crate::CipherError;

fn check_ciphertext_len(ciphertext: &[u8], block_size: usize) -> Result<(), CipherError> {
    if ciphertext.is_empty() || ciphertext.len() % block_size != 0 {
        Err(CipherError::InvalidCiphertextLen {
            block_size,
            real: ciphertext.len(),
        })
    } else {
        Ok(())
    }
}

fn as_block<const N: usize>(chunk: &[u8]) -> Result<&[u8; N], CipherError> {
    chunk.try_into().map_err(|_| CipherError::InvalidBlockSize {
        target: N,
        real: chunk.len(),
    })
}

// unpads `buf` in place, wiping it if the padding is bad so no partial plaintext survives
fn unpad_or_wipe<P: BlockPadding>(padding: &P, buf: &mut Vec<u8>) -> Result<(), CipherError> {
    let r = padding.unpadding(buf);
    if r.is_err() {
        #[cfg(feature = "sec-zeroize")]
        zeroize::Zeroize::zeroize(buf);
        #[cfg(not(feature = "sec-zeroize"))]
        buf.clear();
    }
    r
}
