//! LTPA token codec.
//!
//! A token is `base64(encrypt(body % expires % signature))` where the body is a `$` separated list of
//! `name:value` attributes:
//!
//! | variant | cookie | cipher | issued here |
//! |---|---|---|---|
//! | v1 | `LtpaToken` | 3-key-DES, ECB, PKCS #5 | no |
//! | v2 | `LtpaToken2` | AES-128-CBC, key = IV = secret\[..16\], PKCS #7 | yes, `sha1WithRSA(sha1(body))` signature |

mod body;
pub use body::{make_body_string, parse_body, TokenBody};

mod codec;
pub use codec::{decode_v1, decode_v2, encode_v2, verify_v2_signature};

use crate::error::Result;
use crate::secret::SecretKey;
use serde::Serialize;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TokenVariant {
    V1,
    #[default]
    V2,
}

impl FromStr for TokenVariant {
    type Err = crate::error::LtpaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v1" | "1" | "ltpatoken" => Ok(Self::V1),
            "v2" | "2" | "ltpatoken2" => Ok(Self::V2),
            _ => Err(crate::error::LtpaError::InvalidArgument(format!(
                "unknown token variant `{s}`"
            ))),
        }
    }
}

/// The three decrypted parts, body not yet parsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RawTokenContent {
    pub body: String,
    /// epoch milliseconds
    pub expires: String,
    pub signature: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenContent {
    pub body: TokenBody,
    /// epoch milliseconds
    pub expires: String,
    pub signature: String,
}

impl From<RawTokenContent> for TokenContent {
    fn from(raw: RawTokenContent) -> Self {
        Self {
            body: parse_body(raw.body.as_str()),
            expires: raw.expires,
            signature: raw.signature,
        }
    }
}

impl From<&TokenContent> for RawTokenContent {
    fn from(content: &TokenContent) -> Self {
        Self {
            body: content.body.to_string(),
            expires: content.expires.clone(),
            signature: content.signature.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodyInput {
    /// put on the wire as is
    Raw(String),
    /// `expire:<expires>$u:<u>`
    User { u: String },
}

/// What a new token is issued for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenInput {
    pub body: BodyInput,
    pub expires: String,
}

impl TokenInput {
    pub fn for_user(u: impl Into<String>, expires: impl ToString) -> Self {
        Self {
            body: BodyInput::User { u: u.into() },
            expires: expires.to_string(),
        }
    }

    pub fn raw(body: impl Into<String>, expires: impl ToString) -> Self {
        Self {
            body: BodyInput::Raw(body.into()),
            expires: expires.to_string(),
        }
    }

    pub fn body_string(&self) -> String {
        match &self.body {
            BodyInput::Raw(body) => body.clone(),
            BodyInput::User { u } => make_body_string(self.expires.as_str(), u.as_str()),
        }
    }
}

pub fn decode_token(token: &str, secret: &SecretKey, variant: TokenVariant) -> Result<TokenContent> {
    log::debug!("decoding {variant:?} token");
    let raw = match variant {
        TokenVariant::V1 => decode_v1(token, secret)?,
        TokenVariant::V2 => decode_v2(token, secret)?,
    };
    Ok(raw.into())
}
