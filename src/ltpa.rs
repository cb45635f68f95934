use crate::error::{LtpaError, Result};
use crate::keyfile::{read_keyfile, Keyfile};
use crate::rsa_key::reconstruct_key;
use crate::secret::{decrypt_field, derive_key, SecretKey};
use crate::token::{
    decode_token, encode_v2, verify_v2_signature, RawTokenContent, TokenContent, TokenInput,
    TokenVariant,
};
use cipher::rsa::{private_key_to_pkcs1_pem, PKCS1Sign};
use std::fmt::{Debug, Formatter};
use std::path::Path;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// Token issuer and reader for one key file.
///
/// Unlocking the key file is done once in the constructor, every token operation afterwards only reads `self`.
pub struct Ltpa {
    keyfile: Keyfile,
    secret: SecretKey,
    signer: PKCS1Sign,
    private_key_pem: String,
}

impl Ltpa {
    pub fn from_keyfile<P: AsRef<Path>>(path: P, password: &str) -> Result<Self> {
        check_password(password)?;
        Self::new(read_keyfile(path)?, password)
    }

    pub fn new(keyfile: Keyfile, password: &str) -> Result<Self> {
        check_password(password)?;

        let secret = SecretKey::derive(keyfile.des3_key.as_str(), password)?;

        #[allow(unused_mut)]
        let mut key = derive_key(password);
        let blob = decrypt_field(keyfile.private_key.as_str(), key.as_slice());
        #[cfg(feature = "sec-zeroize")]
        key.zeroize();

        #[allow(unused_mut)]
        let mut blob = blob?;
        let components = reconstruct_key(blob.as_slice());
        #[cfg(feature = "sec-zeroize")]
        blob.zeroize();

        let private_key = components?.to_private_key()?;
        let private_key_pem = private_key_to_pkcs1_pem(&private_key)?;
        log::debug!(
            "key file unlocked, realm `{}`, host `{}`",
            keyfile.realm,
            keyfile.creation_host
        );

        Ok(Self {
            keyfile,
            secret,
            signer: PKCS1Sign::new(private_key),
            private_key_pem,
        })
    }

    pub fn keyfile(&self) -> &Keyfile {
        &self.keyfile
    }

    /// PKCS #1 PEM of the reconstructed private key.
    pub fn private_key_pem(&self) -> &str {
        self.private_key_pem.as_str()
    }

    /// Decodes an `LtpaToken2`.
    pub fn decode(&self, token: &str) -> Result<TokenContent> {
        decode_token(token, &self.secret, TokenVariant::V2)
    }

    /// Decodes an `LtpaToken`, its signature is not checked.
    pub fn decode_v1(&self, token: &str) -> Result<TokenContent> {
        decode_token(token, &self.secret, TokenVariant::V1)
    }

    pub fn decode_variant(&self, token: &str, variant: TokenVariant) -> Result<TokenContent> {
        decode_token(token, &self.secret, variant)
    }

    /// Issues an `LtpaToken2`.
    pub fn make_token(&self, content: &TokenInput) -> Result<String> {
        encode_v2(content, &self.signer, &self.secret)
    }

    /// Checks the signature of a decoded `LtpaToken2` against the key file's key pair.
    pub fn verify(&self, content: &TokenContent) -> Result<()> {
        verify_v2_signature(&RawTokenContent::from(content), &self.signer.verify_key())
    }
}

fn check_password(password: &str) -> Result<()> {
    if password.is_empty() {
        Err(LtpaError::InvalidArgument(
            "the key file password must not be empty".to_string(),
        ))
    } else {
        Ok(())
    }
}

impl Debug for Ltpa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ltpa")
            .field("keyfile", &self.keyfile)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "sec-zeroize")]
impl Drop for Ltpa {
    fn drop(&mut self) {
        self.private_key_pem.zeroize();
    }
}
