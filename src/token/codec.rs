use crate::error::{LtpaError, Result};
use crate::secret::SecretKey;
use crate::token::{RawTokenContent, TokenInput};
use base64::{engine::general_purpose::STANDARD, Engine};
use cipher::{Decrypt, Encrypt, Sign, Verify};
use sha1::{Digest, Sha1};

pub const PART_SEP: char = '%';

fn split_parts(plaintext: Vec<u8>) -> Result<RawTokenContent> {
    let plaintext = String::from_utf8(plaintext)
        .map_err(|_| LtpaError::MalformedToken("token content is not UTF-8".to_string()))?;

    let parts = plaintext.split(PART_SEP).collect::<Vec<_>>();
    match parts.as_slice() {
        [body, expires, signature]
            if !body.is_empty() && !expires.is_empty() && !signature.is_empty() =>
        {
            Ok(RawTokenContent {
                body: body.to_string(),
                expires: expires.to_string(),
                signature: signature.to_string(),
            })
        }
        [_, _, _] => Err(LtpaError::MalformedToken(
            "empty body, expiry or signature".to_string(),
        )),
        _ => Err(LtpaError::MalformedToken(format!(
            "expected 3 `{PART_SEP}` separated parts, got {}",
            parts.len()
        ))),
    }
}

/// `LtpaToken`, 3-key-DES in ECB mode. The signature is returned as is, it is never checked.
pub fn decode_v1(token: &str, secret: &SecretKey) -> Result<RawTokenContent> {
    let ciphertext = STANDARD.decode(token.trim())?;
    let mut plaintext = Vec::with_capacity(ciphertext.len());
    secret
        .tdes_ecb()?
        .decrypt(ciphertext.as_slice(), &mut plaintext)?;

    log::trace!("LtpaToken decrypted, {} bytes", plaintext.len());
    split_parts(plaintext)
}

/// `LtpaToken2`, AES-128-CBC with the secret's first 16 bytes as both key and IV.
pub fn decode_v2(token: &str, secret: &SecretKey) -> Result<RawTokenContent> {
    let ciphertext = STANDARD.decode(token.trim())?;
    let mut plaintext = Vec::with_capacity(ciphertext.len());
    secret
        .aes_cbc()?
        .decrypt(ciphertext.as_slice(), &mut plaintext)?;

    log::trace!("LtpaToken2 decrypted, {} bytes", plaintext.len());
    split_parts(plaintext)
}

/// `base64(sha1WithRSA(sha1(body)))`, the RSA signature covers the 20 bytes digest of the body, not the body.
fn sign_body<S: Sign>(body: &str, signer: &S) -> Result<String> {
    let digest = Sha1::digest(body.as_bytes());
    let mut signature = Vec::with_capacity(256);
    signer.sign(digest.as_slice(), &mut signature)?;
    Ok(STANDARD.encode(signature))
}

/// Issues an `LtpaToken2`: `base64(AES-128-CBC(body % expires % signature))`.
pub fn encode_v2<S: Sign>(content: &TokenInput, signer: &S, secret: &SecretKey) -> Result<String> {
    let body = content.body_string();
    let expires = content.expires.as_str();

    if body.is_empty() || expires.is_empty() {
        return Err(LtpaError::InvalidArgument(
            "token body and expiry must not be empty".to_string(),
        ));
    }
    if body.contains(PART_SEP) || expires.contains(PART_SEP) {
        return Err(LtpaError::InvalidArgument(format!(
            "token body and expiry must not contain `{PART_SEP}`"
        )));
    }

    let signature = sign_body(body.as_str(), signer)?;
    let plaintext = format!("{body}{PART_SEP}{expires}{PART_SEP}{signature}");

    let mut ciphertext = Vec::with_capacity(plaintext.len() + 16);
    secret
        .aes_cbc()?
        .encrypt(plaintext.as_bytes(), &mut ciphertext)?;

    log::debug!("LtpaToken2 issued, expires {expires}");
    Ok(STANDARD.encode(ciphertext))
}

/// Checks a decoded v2 signature with the public half of the signing key.
pub fn verify_v2_signature<V: Verify>(content: &RawTokenContent, verifier: &V) -> Result<()> {
    let signature = STANDARD
        .decode(content.signature.as_str())
        .map_err(|e| LtpaError::Signature(format!("signature is not base64, {e}")))?;
    let digest = Sha1::digest(content.body.as_bytes());
    verifier.verify(digest.as_slice(), signature.as_slice())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode_v1, decode_v2, encode_v2, split_parts, verify_v2_signature};
    use crate::error::LtpaError;
    use crate::secret::SecretKey;
    use crate::token::TokenInput;
    use base64::{engine::general_purpose::STANDARD, Engine};
    use cipher::rsa::{PKCS1Sign, RsaPrivateKey};
    use cipher::Encrypt;
    use std::sync::OnceLock;

    fn signer() -> &'static PKCS1Sign {
        static SIGNER: OnceLock<PKCS1Sign> = OnceLock::new();
        SIGNER.get_or_init(|| {
            PKCS1Sign::new(RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap())
        })
    }

    fn secret() -> SecretKey {
        SecretKey::from_bytes((0u8..24).collect::<Vec<_>>().as_slice()).unwrap()
    }

    #[test]
    fn three_parts() {
        let c = split_parts(b"expire:1$u:x%1%sig".to_vec()).unwrap();
        assert_eq!(c.body, "expire:1$u:x");
        assert_eq!(c.expires, "1");
        assert_eq!(c.signature, "sig");

        for bad in [
            &b"expire:1$u:x%1"[..],
            b"a%b%c%d",
            b"a%%c",
            b"no separator",
            b"\xff%1%2",
        ] {
            assert!(
                matches!(split_parts(bad.to_vec()), Err(LtpaError::MalformedToken(_))),
                "{}",
                String::from_utf8_lossy(bad)
            );
        }
    }

    #[test]
    fn v2_known_ciphertext() {
        // AES-128-CBC, key = iv = 00..0f
        let token = STANDARD.encode([
            0x5f, 0xf9, 0xf7, 0x18, 0x57, 0x23, 0xf1, 0x40, 0x65, 0xc9, 0x4e, 0xde, 0x54, 0x46,
            0x20, 0xe2, 0x3b, 0x11, 0xa8, 0x0e, 0x91, 0x66, 0x61, 0x18, 0x98, 0x5b, 0x2d, 0x60,
            0xfb, 0x0f, 0xbf, 0x91,
        ]);
        let c = decode_v2(token.as_str(), &secret()).unwrap();
        assert_eq!(c.body, "expire:1$u:x");
        assert_eq!(c.expires, "1");
        assert_eq!(c.signature, "sig");
    }

    #[test]
    fn v1_decode() {
        let key = secret();
        let mut buf = vec![];
        key.tdes_ecb()
            .unwrap()
            .encrypt(b"expire:42$u:user\\:host/CN=someone%42%c2lnbmF0dXJl", &mut buf)
            .unwrap();

        let c = decode_v1(STANDARD.encode(buf).as_str(), &key).unwrap();
        assert_eq!(c.body, "expire:42$u:user\\:host/CN=someone");
        assert_eq!(c.expires, "42");
        assert_eq!(c.signature, "c2lnbmF0dXJl");
    }

    #[test]
    fn variant_mismatch() {
        let token = encode_v2(&TokenInput::for_user("nobody", "1"), signer(), &secret()).unwrap();
        assert!(decode_v1(token.as_str(), &secret()).is_err());
    }

    #[test]
    fn v2_round_trip() {
        let input = TokenInput::for_user(r"user\:host\:389/CN=Someone", "1522965060000");
        let token = encode_v2(&input, signer(), &secret()).unwrap();

        let c = decode_v2(token.as_str(), &secret()).unwrap();
        assert_eq!(c.body, r"expire:1522965060000$u:user\:host\:389/CN=Someone");
        assert_eq!(c.expires, "1522965060000");
        verify_v2_signature(&c, &signer().verify_key()).unwrap();

        // deterministic: same input, same key and IV, same signature
        assert_eq!(token, encode_v2(&input, signer(), &secret()).unwrap());
    }

    #[test]
    fn raw_body_used_verbatim() {
        let input = TokenInput::raw("u:anyone$type:SOAP", "7");
        let token = encode_v2(&input, signer(), &secret()).unwrap();
        let c = decode_v2(token.as_str(), &secret()).unwrap();
        assert_eq!(c.body, "u:anyone$type:SOAP");
        assert_eq!(c.expires, "7");
    }

    #[test]
    fn tampered_signature() {
        let token = encode_v2(&TokenInput::for_user("a", "1"), signer(), &secret()).unwrap();
        let mut c = decode_v2(token.as_str(), &secret()).unwrap();
        c.body = "expire:1$u:b".to_string();
        assert!(matches!(
            verify_v2_signature(&c, &signer().verify_key()),
            Err(LtpaError::Signature(_))
        ));

        c.signature = "%%%".to_string();
        assert!(matches!(
            verify_v2_signature(&c, &signer().verify_key()),
            Err(LtpaError::Signature(_))
        ));
    }

    #[test]
    fn reject_separator_in_input() {
        for input in [
            TokenInput::raw("a%b", "1"),
            TokenInput::raw("a", "1%2"),
            TokenInput::raw("", "1"),
            TokenInput::for_user("x", ""),
        ] {
            assert!(matches!(
                encode_v2(&input, signer(), &secret()),
                Err(LtpaError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn not_base64() {
        assert!(matches!(
            decode_v2("@@@", &secret()),
            Err(LtpaError::Decryption(_))
        ));
    }
}
