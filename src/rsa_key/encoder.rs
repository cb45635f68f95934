use crate::error::Result;
use crate::rsa_key::RsaComponents;
use cipher::rsa::{private_key_from_be_bytes, PrivateKeyBytes, RsaPrivateKey};

impl RsaComponents {
    /// Hands all eight components over to the `rsa` crate, which rejects inconsistent ones.
    pub fn to_private_key(&self) -> Result<RsaPrivateKey> {
        let [n, d, e, p, q, dp, dq, qinv] = self.to_be_bytes();
        let key = private_key_from_be_bytes(PrivateKeyBytes {
            n: &n,
            e: &e,
            d: &d,
            p: &p,
            q: &q,
            dp: &dp,
            dq: &dq,
            qinv: &qinv,
        })?;
        Ok(key)
    }
}
