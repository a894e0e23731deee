//! Newtype wrapper for operation names.
//!
//! Operation names key every dispatch table in the workspace. Using a
//! distinct type (rather than bare strings) keeps the logical operation
//! name, its preserved alias, and decorator/wrapper names from being mixed
//! up silently. `Borrow<str>` is implemented so tables can be queried with
//! plain string slices without allocating.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The name of an operation on a method table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpName(String);

impl OpName {
    /// Create an operation name from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Return the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this name is a plain identifier: `[A-Za-z_][A-Za-z0-9_]*`.
    pub fn is_identifier(&self) -> bool {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

impl fmt::Display for OpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for OpName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for OpName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OpName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for OpName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl FromStr for OpName {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl PartialEq<str> for OpName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for OpName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_check() {
        assert!(OpName::from("save").is_identifier());
        assert!(OpName::from("_audit_wrap2").is_identifier());
        assert!(!OpName::from("").is_identifier());
        assert!(!OpName::from("2fast").is_identifier());
        assert!(!OpName::from("save!").is_identifier());
    }

    #[test]
    fn compares_against_str() {
        let name = OpName::from("save");
        assert_eq!(name, "save");
        assert_eq!(name.to_string(), "save");
    }

    #[test]
    fn serde_is_transparent() {
        let name = OpName::from("save");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"save\"");
        let back: OpName = serde_json::from_str("\"save\"").unwrap();
        assert_eq!(back, name);
    }
}
