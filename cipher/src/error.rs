use std::{error::Error, fmt::Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CipherError {
    /// invalid block size
    InvalidBlockSize { target: usize, real: usize },

    /// invalid key size
    InvalidKeySize { target: usize, real: usize },

    /// ciphertext is empty or not a whole number of blocks
    InvalidCiphertextLen { block_size: usize, real: usize },

    UnpaddingNotMatch(String),

    InvalidPrivateKey(String),

    InvalidPublicKey(String),

    SignFailed(String),

    ValidateFailed(String),
}

impl Display for CipherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBlockSize { target, real } => f.write_fmt(format_args!(
                "Invalid block data size `{real}` not match to target size `{target}`"
            )),
            Self::InvalidKeySize { target, real } => {
                f.write_fmt(format_args!("Invalid key size `{real}` not match to target size `{target}`"))
            }
            Self::InvalidCiphertextLen { block_size, real } => f.write_fmt(format_args!(
                "Invalid ciphertext length `{real}`, need a non-zero multiple of `{block_size}`"
            )),
            Self::UnpaddingNotMatch(s) => f.write_fmt(format_args!("unpadding failed for the {s}")),
            Self::InvalidPrivateKey(s) => f.write_fmt(format_args!("invalid private key: {s}")),
            Self::InvalidPublicKey(s) => f.write_fmt(format_args!("invalid public key: {s}")),
            Self::SignFailed(s) => f.write_fmt(format_args!("sign failed: {s}")),
            Self::ValidateFailed(s) => f.write_fmt(format_args!("signature validate failed: {s}")),
        }
    }
}

impl Error for CipherError {}
