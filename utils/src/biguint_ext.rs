use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{Euclid, One, Zero};
use std::borrow::Borrow;
use std::ops::Deref;

pub struct BigUintExt<T: Borrow<BigUint>>(pub T);

impl<T: Borrow<BigUint>> Deref for BigUintExt<T> {
    type Target = BigUint;
    fn deref(&self) -> &Self::Target {
        self.0.borrow()
    }
}

impl<T: Borrow<BigUint>> BigUintExt<T> {
    /// Theorem 31.23 (CLRS): with d = gcd(a, n) = ax' + ny', the equation ax = 1 (mod n)
    /// is solvable only when d = 1, and then x = x' mod n.
    ///
    /// `self * inv = 1 mod modulus`, `None` if the inverse does not exist.
    pub fn modinv(&self, modulus: &BigUint) -> Option<BigUint> {
        if modulus.is_zero() {
            return None;
        }

        let (a, n) = (BigInt::from(self.deref() % modulus), BigInt::from(modulus.clone()));
        let g = a.extended_gcd(&n);
        if g.gcd.is_one() {
            g.x.rem_euclid(&n).to_biguint()
        } else {
            None
        }
    }

    /// `self - 1`, `None` for zero.
    pub fn checked_dec(&self) -> Option<BigUint> {
        if self.is_zero() {
            None
        } else {
            Some(self.deref() - 1u32)
        }
    }

    /// big-endian bytes left-padded with zeros to `width`, `None` if the value needs more bytes.
    pub fn to_be_bytes_padded(&self, width: usize) -> Option<Vec<u8>> {
        let bytes = if self.is_zero() {
            Vec::new()
        } else {
            self.to_bytes_be()
        };

        if bytes.len() > width {
            return None;
        }

        let mut out = vec![0u8; width - bytes.len()];
        out.extend_from_slice(bytes.as_slice());
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::BigUintExt;
    use num_bigint::BigUint;
    use num_traits::Num;

    #[test]
    fn modinv() {
        let cases = [
            ("53", "61", Some("38")),
            ("17", "3120", Some("2753")),
            ("3", "3120", None),
            ("61", "61", None),
            ("1", "7", Some("1")),
            (
                "65537",
                "1000000000000000000000000000000000000000",
                Some("598471092665212017638891008132810473473"),
            ),
        ];

        for (i, (a, n, inv)) in cases.into_iter().enumerate() {
            let a = BigUint::from_str_radix(a, 10).unwrap();
            let n = BigUint::from_str_radix(n, 10).unwrap();
            let inv = inv.map(|x| BigUint::from_str_radix(x, 10).unwrap());
            let r = BigUintExt(&a).modinv(&n);
            assert_eq!(r, inv, "case {i} failed");
            if let Some(r) = r {
                assert_eq!((a * r) % n, BigUint::from(1u8), "case {i} not an inverse");
            }
        }
    }

    #[test]
    fn modinv_zero_modulus() {
        assert_eq!(BigUintExt(BigUint::from(5u8)).modinv(&BigUint::from(0u8)), None);
    }

    #[test]
    fn checked_dec() {
        assert_eq!(BigUintExt(BigUint::from(0u8)).checked_dec(), None);
        assert_eq!(
            BigUintExt(BigUint::from(61u8)).checked_dec(),
            Some(BigUint::from(60u8))
        );
    }

    #[test]
    fn padded_bytes() {
        let x = BigUint::from(0x010001u32);
        assert_eq!(BigUintExt(&x).to_be_bytes_padded(3), Some(vec![1, 0, 1]));
        assert_eq!(
            BigUintExt(&x).to_be_bytes_padded(5),
            Some(vec![0, 0, 1, 0, 1])
        );
        assert_eq!(BigUintExt(&x).to_be_bytes_padded(2), None);
        assert_eq!(
            BigUintExt(BigUint::from(0u8)).to_be_bytes_padded(2),
            Some(vec![0, 0])
        );
    }
}
