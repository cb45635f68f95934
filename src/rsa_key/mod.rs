//! Rebuilds the RSA private key from the `com.ibm.websphere.ltpa.PrivateKey` blob.
//!
//! The blob only carries `e, p, q` and, in its long form, `d`. The remaining CRT values are derived:
//!
//! - $n = p * q$, with $p > q$;
//! - $d = e^{-1} \mod (p-1)(q-1)$;
//! - $d_p = d \mod (p-1)$, $d_q = d \mod (q-1)$, $q_{inv} = q^{-1} \mod p$.

mod layout;
pub use layout::{
    encode_layout, parse_layout, KeyLayout, PartialComponents, PRIME_LEN, PUBLIC_EXPONENT_LEN,
    SHORT_FORM_LEN,
};

mod components;
pub use components::{complete_components, RsaComponents};

mod encoder;

use crate::error::Result;

pub fn reconstruct_key(blob: &[u8]) -> Result<RsaComponents> {
    complete_components(parse_layout(blob)?)
}
