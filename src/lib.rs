//! WebSphere LTPA key files and `LtpaToken`/`LtpaToken2` tokens.
//!
//! ```no_run
//! use ltpa::{Ltpa, TokenInput};
//!
//! let ltpa = Ltpa::from_keyfile("ltpa.keys", "keyfile password")?;
//! let token = ltpa.make_token(&TokenInput::for_user("user:ldap.example.com:389/CN=someone", 1522965060000u64))?;
//! let content = ltpa.decode(token.as_str())?;
//! assert_eq!(content.expires, "1522965060000");
//! # Ok::<(), ltpa::LtpaError>(())
//! ```

pub mod cmd;
pub mod error;
pub mod keyfile;
pub mod rsa_key;
pub mod secret;
pub mod token;

mod ltpa;

pub use error::{LtpaError, Result};
pub use keyfile::{read_keyfile, Keyfile};
pub use ltpa::Ltpa;
pub use rsa_key::{reconstruct_key, RsaComponents};
pub use secret::SecretKey;
pub use token::{
    decode_token, encode_v2, BodyInput, RawTokenContent, TokenBody, TokenContent, TokenInput,
    TokenVariant,
};
