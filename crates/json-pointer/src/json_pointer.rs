use std::{
    fmt::{self, Debug, Display, Formatter, Write},
    str::FromStr,
};

use serde::{Serialize, Serializer};

use crate::{parser::parse_json_pointer, ParseJsonPointerError};

/// An owned JSON Pointer, stored as its unescaped reference tokens.
///
/// The pointer with no tokens refers to the whole document and renders as the
/// empty string.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsonPointer(Vec<String>);

impl Display for JsonPointer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for token in &self.0 {
            f.write_char('/')?;
            write_escaped_token(f, token)?;
        }

        Ok(())
    }
}

impl Debug for JsonPointer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for JsonPointer {
    type Err = ParseJsonPointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_json_pointer(s).map(Self)
    }
}

impl Serialize for JsonPointer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<T: Into<String>> FromIterator<T> for JsonPointer {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl JsonPointer {
    #[inline]
    pub const fn root() -> JsonPointer {
        JsonPointer(Vec::new())
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// Iterates over the unescaped reference tokens.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.0.push(token.into());
    }

    /// Returns a new pointer referring to member `token` of this location.
    #[must_use]
    pub fn join(&self, token: impl Into<String>) -> JsonPointer {
        let mut pointer = self.clone();
        pointer.push(token);
        pointer
    }

    /// Returns a new pointer referring to element `index` of this location.
    #[must_use]
    pub fn join_index(&self, index: usize) -> JsonPointer {
        self.join(index.to_string())
    }
}

fn write_escaped_token(f: &mut Formatter<'_>, token: &str) -> fmt::Result {
    if memchr::memchr2(b'~', b'/', token.as_bytes()).is_none() {
        return f.write_str(token);
    }

    for ch in token.chars() {
        match ch {
            '~' => f.write_str("~0")?,
            '/' => f.write_str("~1")?,
            _ => f.write_char(ch)?,
        }
    }
    Ok(())
}
