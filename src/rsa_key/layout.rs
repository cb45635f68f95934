use crate::error::{LtpaError, Result};
use num_bigint::BigUint;
use utils::BigUintExt;

/// Fixed field widths of the exported private key, values are big-endian and left padded with zeros.
pub const PUBLIC_EXPONENT_LEN: usize = 3;
pub const PRIME_LEN: usize = 65;
/// `e || p || q`, the whole short form and the tail of the long form.
pub const SHORT_FORM_LEN: usize = PUBLIC_EXPONENT_LEN + 2 * PRIME_LEN;
const LENGTH_PREFIX_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLayout {
    /// `len(d) as u32 be || d || e || p || q`
    Long,
    /// `e || p || q`
    Short,
}

/// Raw components as decoded from the key blob, the optional ones are still to be computed.
#[derive(Clone, PartialEq, Eq)]
pub struct PartialComponents {
    pub layout: KeyLayout,
    pub modulus: Option<BigUint>,
    pub private_exponent: Option<BigUint>,
    pub public_exponent: BigUint,
    pub prime1: BigUint,
    pub prime2: BigUint,
    pub exponent1: Option<BigUint>,
    pub exponent2: Option<BigUint>,
    pub coefficient: Option<BigUint>,
}

impl std::fmt::Debug for PartialComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartialComponents")
            .field("layout", &self.layout)
            .field("public_exponent", &self.public_exponent)
            .field("has_private_exponent", &self.private_exponent.is_some())
            .finish_non_exhaustive()
    }
}

/// Splits a decrypted `com.ibm.websphere.ltpa.PrivateKey` blob into its fields.
///
/// Anything longer than the short form is read as the long form. Bytes after the last prime are ignored.
pub fn parse_layout(buf: &[u8]) -> Result<PartialComponents> {
    if buf.len() < SHORT_FORM_LEN {
        return Err(LtpaError::MalformedKeyBuffer {
            need: SHORT_FORM_LEN,
            real: buf.len(),
        });
    }

    let (layout, private_exponent, tail) = if buf.len() > SHORT_FORM_LEN {
        let mut len = [0u8; LENGTH_PREFIX_LEN];
        len.copy_from_slice(&buf[..LENGTH_PREFIX_LEN]);
        let d_len = u32::from_be_bytes(len) as usize;

        let need = d_len
            .checked_add(LENGTH_PREFIX_LEN + SHORT_FORM_LEN)
            .unwrap_or(usize::MAX);
        if buf.len() < need {
            return Err(LtpaError::MalformedKeyBuffer {
                need,
                real: buf.len(),
            });
        }

        let (d, tail) = buf[LENGTH_PREFIX_LEN..].split_at(d_len);
        (KeyLayout::Long, Some(BigUint::from_bytes_be(d)), tail)
    } else {
        (KeyLayout::Short, None, buf)
    };

    let (e, tail) = tail.split_at(PUBLIC_EXPONENT_LEN);
    let (p, tail) = tail.split_at(PRIME_LEN);
    let q = &tail[..PRIME_LEN];

    log::trace!("private key blob: {layout:?} form, {} bytes", buf.len());

    Ok(PartialComponents {
        layout,
        modulus: None,
        private_exponent,
        public_exponent: BigUint::from_bytes_be(e),
        prime1: BigUint::from_bytes_be(p),
        prime2: BigUint::from_bytes_be(q),
        exponent1: None,
        exponent2: None,
        coefficient: None,
    })
}

/// The inverse of [`parse_layout`], long form when the private exponent is given.
pub fn encode_layout(
    private_exponent: Option<&BigUint>,
    public_exponent: &BigUint,
    prime1: &BigUint,
    prime2: &BigUint,
) -> Result<Vec<u8>> {
    let field = |x: &BigUint, width: usize, name: &str| {
        BigUintExt(x).to_be_bytes_padded(width).ok_or_else(|| {
            LtpaError::InvalidArgument(format!("{name} does not fit in {width} bytes"))
        })
    };

    let mut buf = Vec::with_capacity(LENGTH_PREFIX_LEN + 2 * SHORT_FORM_LEN);
    if let Some(d) = private_exponent {
        let d = d.to_bytes_be();
        let len = u32::try_from(d.len())
            .map_err(|_| LtpaError::InvalidArgument("private exponent too long".to_string()))?;
        buf.extend_from_slice(&len.to_be_bytes());
        buf.extend(d);
    }

    buf.extend(field(public_exponent, PUBLIC_EXPONENT_LEN, "public exponent")?);
    buf.extend(field(prime1, PRIME_LEN, "prime1")?);
    buf.extend(field(prime2, PRIME_LEN, "prime2")?);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::{encode_layout, parse_layout, KeyLayout, PRIME_LEN, SHORT_FORM_LEN};
    use crate::error::LtpaError;
    use num_bigint::BigUint;

    fn short_form(e: u32, p: u32, q: u32) -> Vec<u8> {
        let mut buf = vec![0u8; SHORT_FORM_LEN];
        buf[..3].copy_from_slice(&e.to_be_bytes()[1..]);
        buf[3 + PRIME_LEN - 4..3 + PRIME_LEN].copy_from_slice(&p.to_be_bytes());
        buf[SHORT_FORM_LEN - 4..].copy_from_slice(&q.to_be_bytes());
        buf
    }

    #[test]
    fn short_form_fields() {
        let c = parse_layout(short_form(0x010001, 61, 53).as_slice()).unwrap();
        assert_eq!(c.layout, KeyLayout::Short);
        assert_eq!(c.public_exponent, BigUint::from(65537u32));
        assert_eq!(c.prime1, BigUint::from(61u32));
        assert_eq!(c.prime2, BigUint::from(53u32));
        assert_eq!(c.private_exponent, None);
        assert_eq!(c.modulus, None);
        assert_eq!(c.exponent1, None);
        assert_eq!(c.exponent2, None);
        assert_eq!(c.coefficient, None);
    }

    #[test]
    fn long_form_fields() {
        let mut buf = vec![0, 0, 0, 2, 0x0a, 0xc1];
        buf.extend(short_form(17, 61, 53));

        let c = parse_layout(buf.as_slice()).unwrap();
        assert_eq!(c.layout, KeyLayout::Long);
        assert_eq!(c.private_exponent, Some(BigUint::from(2753u32)));
        assert_eq!(c.public_exponent, BigUint::from(17u32));
        assert_eq!(c.prime1, BigUint::from(61u32));
        assert_eq!(c.prime2, BigUint::from(53u32));
    }

    #[test]
    fn long_form_ignores_trailing_bytes() {
        let mut buf = vec![0, 0, 0, 1, 7];
        buf.extend(short_form(17, 61, 53));
        buf.extend([0xff; 5]);

        let c = parse_layout(buf.as_slice()).unwrap();
        assert_eq!(c.private_exponent, Some(BigUint::from(7u32)));
        assert_eq!(c.prime2, BigUint::from(53u32));
    }

    #[test]
    fn too_short() {
        assert_eq!(
            parse_layout(&[0u8; 132]).unwrap_err(),
            LtpaError::MalformedKeyBuffer {
                need: 133,
                real: 132
            }
        );
        assert!(parse_layout(&[]).is_err());
    }

    #[test]
    fn long_form_truncated() {
        // announces a 128 bytes exponent but carries only the short form tail after it
        let mut buf = vec![0, 0, 0, 128];
        buf.extend(short_form(17, 61, 53));
        assert_eq!(
            parse_layout(buf.as_slice()).unwrap_err(),
            LtpaError::MalformedKeyBuffer {
                need: 265,
                real: 137
            }
        );

        let mut buf = vec![0xff, 0xff, 0xff, 0xff];
        buf.extend(short_form(17, 61, 53));
        assert!(matches!(
            parse_layout(buf.as_slice()),
            Err(LtpaError::MalformedKeyBuffer { .. })
        ));
    }

    #[test]
    fn encode_then_parse() {
        let (d, e, p, q) = (
            BigUint::from(2753u32),
            BigUint::from(17u32),
            BigUint::from(61u32),
            BigUint::from(53u32),
        );

        let short = encode_layout(None, &e, &p, &q).unwrap();
        assert_eq!(short, short_form(17, 61, 53));

        let long = encode_layout(Some(&d), &e, &p, &q).unwrap();
        assert_eq!(&long[..6], &[0, 0, 0, 2, 0x0a, 0xc1]);
        assert_eq!(parse_layout(long.as_slice()).unwrap().private_exponent, Some(d));

        let wide = BigUint::from(1u32) << (8 * 3);
        assert!(matches!(
            encode_layout(None, &wide, &p, &q),
            Err(LtpaError::InvalidArgument(_))
        ));
    }
}
