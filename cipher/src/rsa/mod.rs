//! RSA key assembly and PKCS #1 v1.5 signatures on top of the RustCrypto `rsa` crate.
//!
//! - $n = p * q$, $d * e \equiv 1 \mod \lambda(n)$;
//! - sign: $s = EMSA\_PKCS1\_v1\_5(m)^d \mod n$, verify: $s^e \mod n$ compared to the encoded message.

mod key;
pub use key::{private_key_from_be_bytes, private_key_to_pkcs1_pem, PrivateKeyBytes};

mod pkcs1;
pub use pkcs1::{PKCS1Sign, PKCS1Verify};

pub use rsa::{RsaPrivateKey, RsaPublicKey};
