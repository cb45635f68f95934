//! WebSphere LTPA key export, a Java `.properties` file.

use crate::error::{LtpaError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

pub const VERSION: &str = "com.ibm.websphere.ltpa.version";
pub const CREATION_DATE: &str = "com.ibm.websphere.CreationDate";
pub const CREATION_HOST: &str = "com.ibm.websphere.CreationHost";
pub const REALM: &str = "com.ibm.websphere.ltpa.Realm";
pub const PUBLIC_KEY: &str = "com.ibm.websphere.ltpa.PublicKey";
pub const DES3_KEY: &str = "com.ibm.websphere.ltpa.3DESKey";
pub const PRIVATE_KEY: &str = "com.ibm.websphere.ltpa.PrivateKey";

/// The key file fields, `des3_key` and `private_key` are still encrypted with the export password.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyfile {
    pub version: String,
    pub creation_date: String,
    pub creation_host: String,
    pub realm: String,
    pub public_key: String,
    pub des3_key: String,
    pub private_key: String,
}

impl Keyfile {
    pub fn from_properties(props: &HashMap<String, String>) -> Result<Self> {
        let required = |name: &str| {
            props
                .get(name)
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or_else(|| LtpaError::InvalidArgument(format!("key file has no `{name}`")))
        };
        let optional = |name: &str| props.get(name).cloned().unwrap_or_default();

        Ok(Self {
            version: optional(VERSION),
            creation_date: optional(CREATION_DATE),
            creation_host: optional(CREATION_HOST),
            realm: optional(REALM),
            public_key: optional(PUBLIC_KEY),
            des3_key: required(DES3_KEY)?,
            private_key: required(PRIVATE_KEY)?,
        })
    }

    /// `com.ibm.websphere.ltpa.version` as a number, `None` when absent or not an integer.
    pub fn version_number(&self) -> Option<u32> {
        self.version.trim().parse().ok()
    }
}

impl std::str::FromStr for Keyfile {
    type Err = LtpaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_properties(&parse_properties(s)?)
    }
}

pub fn read_keyfile<P: AsRef<Path>>(path: P) -> Result<Keyfile> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| LtpaError::Keyfile(format!("read `{}` failed, {e}", path.display())))?;

    log::debug!("read key file `{}`", path.display());
    text.parse()
}

/// Java `.properties` syntax: `#`/`!` comments, `=`, `:` or blank as separator, `\` escapes and line
/// continuations.
pub fn parse_properties(text: &str) -> Result<HashMap<String, String>> {
    let mut props = HashMap::new();
    for (line_no, line) in logical_lines(text) {
        let (key, value) = split_entry(line.as_str());
        props.insert(unescape(key, line_no)?, unescape(value, line_no)?);
    }
    Ok(props)
}

fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_start();
        let (line_no, mut buf) = match pending.take() {
            Some(x) => x,
            None if line.is_empty() || line.starts_with('#') || line.starts_with('!') => continue,
            None => (i + 1, String::new()),
        };

        let continued = line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1;
        if continued {
            buf.push_str(&line[..line.len() - 1]);
            pending = Some((line_no, buf));
        } else {
            buf.push_str(line);
            lines.push((line_no, buf));
        }
    }

    lines.extend(pending);
    lines
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

// raw key and value, escapes still in place
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            end = i;
            break;
        }
    }

    let (key, rest) = line.split_at(end);
    let rest = rest.trim_start_matches(is_blank);
    let rest = rest
        .strip_prefix(|c: char| c == '=' || c == ':')
        .unwrap_or(rest)
        .trim_start_matches(is_blank);
    (key, rest)
}

fn unescape(s: &str, line_no: usize) -> Result<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex = chars.by_ref().take(4).collect::<String>();
                let c = u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        LtpaError::Keyfile(format!("line {line_no}: invalid `\\u{hex}` escape"))
                    })?;
                out.push(c);
            }
            Some(c) => out.push(c),
            None => {}
        }
    }
    Ok(out)
}
