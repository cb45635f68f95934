use cipher::CipherError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LtpaError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("malformed private key buffer: need at least `{need}` bytes, got `{real}`")]
    MalformedKeyBuffer { need: usize, real: usize },

    #[error("cannot compute the {0}, no modular inverse")]
    Arithmetic(&'static str),

    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("key file: {0}")]
    Keyfile(String),

    #[error("key encoding: {0}")]
    KeyEncoding(String),

    #[error("token signature: {0}")]
    Signature(String),
}

impl From<CipherError> for LtpaError {
    fn from(value: CipherError) -> Self {
        match value {
            CipherError::InvalidPrivateKey(s)
            | CipherError::InvalidPublicKey(s)
            | CipherError::SignFailed(s) => Self::KeyEncoding(s),
            CipherError::ValidateFailed(s) => Self::Signature(s),
            e => Self::Decryption(e.to_string()),
        }
    }
}

impl From<base64::DecodeError> for LtpaError {
    fn from(value: base64::DecodeError) -> Self {
        Self::Decryption(format!("invalid base64 payload, {value}"))
    }
}

pub type Result<T> = std::result::Result<T, LtpaError>;
