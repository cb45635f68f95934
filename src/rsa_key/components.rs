use crate::error::{LtpaError, Result};
use crate::rsa_key::layout::PartialComponents;
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt::{Debug, Formatter};
use utils::BigUintExt;

/// The eight CRT components of an RSA private key, `prime1 > prime2` and `coefficient = prime2^-1 mod prime1`.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaComponents {
    pub modulus: BigUint,
    pub private_exponent: BigUint,
    pub public_exponent: BigUint,
    pub prime1: BigUint,
    pub prime2: BigUint,
    pub exponent1: BigUint,
    pub exponent2: BigUint,
    pub coefficient: BigUint,
}

impl Debug for RsaComponents {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaComponents")
            .field("modulus_bits", &self.modulus.bits())
            .field("public_exponent", &self.public_exponent)
            .finish_non_exhaustive()
    }
}

impl RsaComponents {
    /// Big-endian magnitudes in the order `n, d, e, p, q, dp, dq, qinv`.
    pub fn to_be_bytes(&self) -> [Vec<u8>; 8] {
        [
            &self.modulus,
            &self.private_exponent,
            &self.public_exponent,
            &self.prime1,
            &self.prime2,
            &self.exponent1,
            &self.exponent2,
            &self.coefficient,
        ]
        .map(|x| x.to_bytes_be())
    }
}

fn minus_one(x: &BigUint, what: &'static str) -> Result<BigUint> {
    BigUintExt(x)
        .checked_dec()
        .filter(|x| !x.is_zero())
        .ok_or(LtpaError::Arithmetic(what))
}

fn inverse(x: &BigUint, modulus: &BigUint, what: &'static str) -> Result<BigUint> {
    BigUintExt(x).modinv(modulus).ok_or(LtpaError::Arithmetic(what))
}

/// Fills in every missing component from `e, p, q` (and `d` when present).
///
/// The primes are normalized first so that `prime1 > prime2`. Swapping them invalidates a given coefficient.
pub fn complete_components(partial: PartialComponents) -> Result<RsaComponents> {
    let PartialComponents {
        modulus,
        private_exponent,
        public_exponent,
        mut prime1,
        mut prime2,
        mut exponent1,
        mut exponent2,
        mut coefficient,
        ..
    } = partial;

    if prime1 < prime2 {
        log::debug!("prime1 < prime2, swapping the primes");
        std::mem::swap(&mut prime1, &mut prime2);
        std::mem::swap(&mut exponent1, &mut exponent2);
        coefficient = None;
    }

    let coefficient = match coefficient {
        Some(c) => c,
        None => inverse(&prime2, &prime1, "CRT coefficient")?,
    };

    let modulus = modulus.unwrap_or_else(|| &prime1 * &prime2);

    let private_exponent = match private_exponent {
        Some(d) => d,
        None => {
            let phi = minus_one(&prime1, "private exponent")? * minus_one(&prime2, "private exponent")?;
            inverse(&public_exponent, &phi, "private exponent")?
        }
    };

    let exponent1 = match exponent1 {
        Some(x) => x,
        None => &private_exponent % minus_one(&prime1, "exponent1")?,
    };
    let exponent2 = match exponent2 {
        Some(x) => x,
        None => &private_exponent % minus_one(&prime2, "exponent2")?,
    };

    log::debug!("RSA key completed, {} bits modulus", modulus.bits());

    Ok(RsaComponents {
        modulus,
        private_exponent,
        public_exponent,
        prime1,
        prime2,
        exponent1,
        exponent2,
        coefficient,
    })
}
