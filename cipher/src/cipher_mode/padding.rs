use crate::CipherError;

pub trait BlockPadding {
    /// pad to a multiple of `padding_len` bytes
    fn new(padding_len: usize) -> Self;

    fn padding(&self, buf: &mut Vec<u8>);

    fn unpadding(&self, buf: &mut Vec<u8>) -> Result<(), CipherError>;
}

/// PKCS #7 (RFC 5652 6.3), identical to PKCS #5 for 8 bytes blocks. <br>
///
/// Appends `k` bytes of value `k`, `1 <= k <= block_size`, so a full block is added when the data is already aligned.
#[derive(Copy, Clone, Debug)]
pub struct PKCS7Padding {
    block_size: usize,
}

impl BlockPadding for PKCS7Padding {
    fn new(block_size: usize) -> Self {
        Self { block_size }
    }

    fn padding(&self, buf: &mut Vec<u8>) {
        let k = self.block_size - (buf.len() % self.block_size);
        buf.resize(buf.len() + k, k as u8);
    }

    fn unpadding(&self, buf: &mut Vec<u8>) -> Result<(), CipherError> {
        let err = || CipherError::UnpaddingNotMatch("PKCS7Padding".to_string());

        if buf.is_empty() || buf.len() % self.block_size != 0 {
            return Err(err());
        }

        let k = buf[buf.len() - 1] as usize;
        if k == 0 || k > self.block_size || k > buf.len() {
            return Err(err());
        }

        if buf[buf.len() - k..].iter().any(|&x| x as usize != k) {
            return Err(err());
        }

        buf.truncate(buf.len() - k);
        Ok(())
    }
}

#[derive(Copy, Clone, Debug)]
pub struct EmptyPadding;

impl BlockPadding for EmptyPadding {
    fn new(_padding_len: usize) -> Self {
        Self
    }

    fn padding(&self, _buf: &mut Vec<u8>) {}

    fn unpadding(&self, _buf: &mut Vec<u8>) -> Result<(), CipherError> {
        Ok(())
    }
}
