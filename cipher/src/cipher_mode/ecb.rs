use super::{as_block, check_ciphertext_len, unpad_or_wipe};
use crate::block_cipher::TDES;
use crate::cipher_mode::{BlockPadding, PKCS7Padding};
use crate::{BlockDecrypt, BlockEncrypt, CipherError, Decrypt, Encrypt};

/// Electronic Codebook Mode <br>
///
/// `ECB<Padding, BlockCipher, BLOCK_SIZE>`
#[derive(Clone)]
pub struct ECB<P, E, const N: usize> {
    cipher: E,
    padding: P,
}

pub type TDESEcb = ECB<PKCS7Padding, TDES, 8>;

impl<P, E, const N: usize> ECB<P, E, N>
where
    P: BlockPadding,
{
    pub fn new(cipher: E) -> Self {
        Self {
            cipher,
            padding: P::new(N),
        }
    }
}

impl<P, E, const N: usize> Encrypt for ECB<P, E, N>
where
    P: BlockPadding,
    E: BlockEncrypt<N>,
{
    fn encrypt(&self, plaintext: &[u8], ciphertext: &mut Vec<u8>) -> Result<(), CipherError> {
        let mut buf = plaintext.to_vec();
        self.padding.padding(&mut buf);

        let mut itr = buf.chunks_exact(N);
        for chunk in &mut itr {
            ciphertext.extend(self.cipher.encrypt_block(as_block::<N>(chunk)?));
        }

        if itr.remainder().is_empty() {
            Ok(())
        } else {
            Err(CipherError::InvalidBlockSize {
                target: N,
                real: itr.remainder().len(),
            })
        }
    }
}

impl<P, E, const N: usize> Decrypt for ECB<P, E, N>
where
    P: BlockPadding,
    E: BlockDecrypt<N>,
{
    fn decrypt(&self, ciphertext: &[u8], plaintext: &mut Vec<u8>) -> Result<(), CipherError> {
        check_ciphertext_len(ciphertext, N)?;

        let mut buf = Vec::with_capacity(ciphertext.len());
        for chunk in ciphertext.chunks_exact(N) {
            buf.extend(self.cipher.decrypt_block(as_block::<N>(chunk)?));
        }

        unpad_or_wipe(&self.padding, &mut buf)?;
        plaintext.extend_from_slice(buf.as_slice());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::block_cipher::TDES;
    use crate::cipher_mode::{EmptyPadding, TDESEcb, ECB};
    use crate::{CipherError, Decrypt, Encrypt};

    fn hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    fn key() -> Vec<u8> {
        (0u8..24).collect()
    }

    #[test]
    fn ecb_tdes_empty_padding() {
        let tdes = TDES::new(&hex("0123456789ABCDEF23456789ABCDEF01456789ABCDEF0123")).unwrap();
        let ecb = ECB::<EmptyPadding, TDES, 8>::new(tdes);
        let (plaintext, ciphertext) = (
            b"The qufck brown fox jump".to_vec(),
            hex("a826fd8ce53b855fcce21c8112256fe668d5c05dd9b6b900"),
        );

        let mut buf = vec![];
        ecb.encrypt(plaintext.as_slice(), &mut buf).unwrap();
        assert_eq!(buf, ciphertext);

        buf.clear();
        ecb.decrypt(ciphertext.as_slice(), &mut buf).unwrap();
        assert_eq!(buf, plaintext);
    }

    #[test]
    fn ecb_tdes_pkcs7() {
        let ecb = TDESEcb::new(TDES::new(key().as_slice()).unwrap());

        let mut buf = vec![];
        ecb.encrypt(b"ltpa", &mut buf).unwrap();
        assert_eq!(buf, hex("4d4153c0a453ad56"));

        let mut plain = vec![];
        ecb.decrypt(buf.as_slice(), &mut plain).unwrap();
        assert_eq!(plain, b"ltpa");
    }

    #[test]
    fn ecb_tdes_invalid_ciphertext_len() {
        let ecb = TDESEcb::new(TDES::new(key().as_slice()).unwrap());
        let mut buf = vec![];
        assert_eq!(
            ecb.decrypt(&[0u8; 12], &mut buf),
            Err(CipherError::InvalidCiphertextLen {
                block_size: 8,
                real: 12
            })
        );
        assert!(ecb.decrypt(&[], &mut buf).is_err());
    }
}
