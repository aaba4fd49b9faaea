//! Case-insensitive level names.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A log level identifier such as `info` or an application-invented `audit`.
///
/// Equality, ordering and hashing use the lower-case name only. The
/// spelling the level was written with is kept for exact-case member lookup.
#[derive(Debug, Clone)]
pub struct LevelName {
    name: String,
    spelling: String,
}

impl LevelName {
    /// Create a level name, normalizing it to lower case.
    pub fn new(name: impl AsRef<str>) -> Self {
        let spelling = name.as_ref().trim().to_string();
        Self {
            name: spelling.to_lowercase(),
            spelling,
        }
    }

    /// The normalized (lower-case) spelling.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The trimmed spelling as originally written.
    pub fn spelling(&self) -> &str {
        &self.spelling
    }

    /// Upper-case spelling used in bracketed tags and severity lookups.
    pub fn upper(&self) -> String {
        self.name.to_uppercase()
    }

    /// `"[LEVEL]"`.
    pub fn tag(&self) -> String {
        format!("[{}]", self.upper())
    }

    /// Case-insensitive prefix match against a preference string.
    pub fn starts_with(&self, preference: &str) -> bool {
        self.name.starts_with(&preference.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

impl PartialEq for LevelName {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for LevelName {}

// Must agree with `Borrow<str>`: hash the normalized name alone.
impl Hash for LevelName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for LevelName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LevelName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for LevelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for LevelName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for LevelName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&String> for LevelName {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl From<&LevelName> for LevelName {
    fn from(name: &LevelName) -> Self {
        name.clone()
    }
}

impl AsRef<str> for LevelName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl Borrow<str> for LevelName {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl PartialEq<str> for LevelName {
    fn eq(&self, other: &str) -> bool {
        *self == LevelName::new(other)
    }
}

impl PartialEq<&str> for LevelName {
    fn eq(&self, other: &&str) -> bool {
        *self == LevelName::new(other)
    }
}

impl Serialize for LevelName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for LevelName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}
