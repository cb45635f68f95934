use crate::{CipherError, Sign, Verify};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{Keypair, SignatureEncoding, Signer as _, Verifier as _};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;

/// RSASSA-PKCS1-v1_5 with SHA-1 (`sha1WithRSAEncryption`), RFC 8017 8.2.
#[derive(Clone)]
pub struct PKCS1Sign {
    key: SigningKey<Sha1>,
}

#[derive(Clone)]
pub struct PKCS1Verify {
    key: VerifyingKey<Sha1>,
}

impl PKCS1Sign {
    pub fn new(key: RsaPrivateKey) -> Self {
        Self {
            key: SigningKey::<Sha1>::new(key),
        }
    }

    pub fn verify_key(&self) -> PKCS1Verify {
        PKCS1Verify {
            key: self.key.verifying_key(),
        }
    }
}

impl PKCS1Verify {
    pub fn new(key: RsaPublicKey) -> Self {
        Self {
            key: VerifyingKey::<Sha1>::new(key),
        }
    }
}

impl Sign for PKCS1Sign {
    fn sign(&self, msg: &[u8], sign: &mut Vec<u8>) -> Result<(), CipherError> {
        let s = self
            .key
            .try_sign(msg)
            .map_err(|e| CipherError::SignFailed(e.to_string()))?;
        sign.extend_from_slice(&s.to_bytes());
        Ok(())
    }
}

impl Verify for PKCS1Sign {
    fn verify(&self, msg: &[u8], sign: &[u8]) -> Result<(), CipherError> {
        self.verify_key().verify(msg, sign)
    }
}

impl Verify for PKCS1Verify {
    fn verify(&self, msg: &[u8], sign: &[u8]) -> Result<(), CipherError> {
        let sig =
            Signature::try_from(sign).map_err(|e| CipherError::ValidateFailed(e.to_string()))?;
        self.key
            .verify(msg, &sig)
            .map_err(|e| CipherError::ValidateFailed(e.to_string()))
    }
}
