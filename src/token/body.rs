use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

pub const FIELD_SEP: char = '$';
pub const NAME_SEP: char = ':';

/// The `$` separated `name:value` attributes of a token, in wire order.
///
/// Only the first `:` separates name from value, `u:user\:host\:389/CN=x` has the name `u`. A segment without
/// any `:` is kept as a field with no value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenBody {
    fields: Vec<(String, Option<String>)>,
}

pub fn parse_body(raw: &str) -> TokenBody {
    let fields = raw
        .split(FIELD_SEP)
        .map(|segment| match segment.split_once(NAME_SEP) {
            Some((name, value)) => (name.to_string(), Some(value.to_string())),
            None => (segment.to_string(), None),
        })
        .collect();

    TokenBody { fields }
}

/// `expire:<expires>$u:<user>`, the body issued for a plain user token.
pub fn make_body_string(expires: &str, user: &str) -> String {
    format!("expire{NAME_SEP}{expires}{FIELD_SEP}u{NAME_SEP}{user}")
}

impl TokenBody {
    /// Value of the field `name`, the last one wins when a name repeats.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `u`, the user the token was issued to.
    pub fn user(&self) -> Option<&str> {
        self.get("u")
    }

    pub fn expire(&self) -> Option<&str> {
        self.get("expire")
    }
}

// the wire text, `parse_body(&body.to_string()) == body`
impl Display for TokenBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "{FIELD_SEP}")?;
            }
            f.write_str(name)?;
            if let Some(v) = value {
                write!(f, "{NAME_SEP}{v}")?;
            }
        }
        Ok(())
    }
}

impl Serialize for TokenBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in self.fields.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
