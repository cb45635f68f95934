use super::{as_block, check_ciphertext_len, unpad_or_wipe};
use crate::block_cipher::AES128;
use crate::cipher_mode::{BlockPadding, PKCS7Padding};
use crate::{BlockDecrypt, BlockEncrypt, CipherError, Decrypt, Encrypt};

/// Cipher Block Chaining Mode(CBC) <br>
///
/// The IV is fixed at construction and every `encrypt`/`decrypt` call starts again from it.
#[derive(Clone)]
pub struct CBC<P, E, const N: usize> {
    cipher: E,
    padding: P,
    iv: [u8; N],
}

pub type AES128Cbc = CBC<PKCS7Padding, AES128, 16>;

impl<P, E, const N: usize> CBC<P, E, N>
where
    P: BlockPadding,
{
    pub fn new(cipher: E, iv: [u8; N]) -> Self {
        Self {
            cipher,
            padding: P::new(N),
            iv,
        }
    }
}

impl<P, E, const N: usize> Encrypt for CBC<P, E, N>
where
    P: BlockPadding,
    E: BlockEncrypt<N>,
{
    fn encrypt(&self, plaintext: &[u8], ciphertext: &mut Vec<u8>) -> Result<(), CipherError> {
        let mut buf = plaintext.to_vec();
        self.padding.padding(&mut buf);
        if buf.len() % N != 0 {
            return Err(CipherError::InvalidBlockSize {
                target: N,
                real: buf.len() % N,
            });
        }

        let mut iv = self.iv;
        for chunk in buf.chunks_exact(N) {
            iv.iter_mut()
                .zip(as_block::<N>(chunk)?.iter())
                .for_each(|(a, b)| *a ^= b);
            iv = self.cipher.encrypt_block(&iv);
            ciphertext.extend_from_slice(iv.as_slice());
        }

        Ok(())
    }
}

impl<P, E, const N: usize> Decrypt for CBC<P, E, N>
where
    P: BlockPadding,
    E: BlockDecrypt<N>,
{
    fn decrypt(&self, ciphertext: &[u8], plaintext: &mut Vec<u8>) -> Result<(), CipherError> {
        check_ciphertext_len(ciphertext, N)?;

        let (mut iv, mut buf) = (self.iv, Vec::with_capacity(ciphertext.len()));
        for chunk in ciphertext.chunks_exact(N) {
            let block = as_block::<N>(chunk)?;
            let mut d = self.cipher.decrypt_block(block);
            d.iter_mut().zip(iv.iter()).for_each(|(a, b)| *a ^= b);
            buf.extend_from_slice(d.as_slice());
            iv = *block;
        }

        unpad_or_wipe(&self.padding, &mut buf)?;
        plaintext.extend_from_slice(buf.as_slice());
        Ok(())
    }
}
