//! Ordered, duplicate-free collections of levels.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::level::LevelName;

/// Insertion-ordered set of levels. The first occurrence of a name wins.
#[derive(Debug, Clone, Default)]
pub struct LevelSet {
    order: Vec<LevelName>,
    members: HashSet<LevelName>,
}

impl LevelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a level. Returns false if it was already present.
    pub fn insert(&mut self, level: impl Into<LevelName>) -> bool {
        let level = level.into();
        if level.is_empty() || self.members.contains(&level) {
            return false;
        }
        self.members.insert(level.clone());
        self.order.push(level);
        true
    }

    /// Append every level of `other` not already present.
    pub fn extend_from(&mut self, other: &LevelSet) {
        for level in other.iter() {
            self.insert(level);
        }
    }

    /// Union keeping `self`'s ordering first.
    pub fn union(&self, other: &LevelSet) -> LevelSet {
        let mut merged = self.clone();
        merged.extend_from(other);
        merged
    }

    /// Levels of `self` that are not in `other`, in `self`'s order.
    pub fn difference(&self, other: &LevelSet) -> LevelSet {
        self.iter().filter(|l| !other.contains(l.as_str())).collect()
    }

    pub fn contains(&self, level: &str) -> bool {
        self.members.contains(&LevelName::new(level))
    }

    pub fn first(&self) -> Option<&LevelName> {
        self.order.first()
    }

    /// First level starting with `preference` (case-insensitive), else the first level.
    pub fn preferred(&self, preference: &str) -> Option<&LevelName> {
        self.order
            .iter()
            .find(|l| l.starts_with(preference))
            .or_else(|| self.first())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LevelName> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[LevelName] {
        &self.order
    }

    /// Comma separated names, as used in diagnostics.
    pub fn joined(&self) -> String {
        self.order
            .iter()
            .map(LevelName::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl PartialEq for LevelSet {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for LevelSet {}

impl fmt::Display for LevelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl<L: Into<LevelName>> FromIterator<L> for LevelSet {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        let mut set = LevelSet::new();
        for level in iter {
            set.insert(level);
        }
        set
    }
}

impl<L: Into<LevelName>> Extend<L> for LevelSet {
    fn extend<I: IntoIterator<Item = L>>(&mut self, iter: I) {
        for level in iter {
            self.insert(level);
        }
    }
}

impl<'a> IntoIterator for &'a LevelSet {
    type Item = &'a LevelName;
    type IntoIter = std::slice::Iter<'a, LevelName>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

impl Serialize for LevelSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LevelSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<LevelName>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_wins() {
        let set: LevelSet = ["WARN", "info", "warn", "Info", "debug"].into_iter().collect();
        let names: Vec<&str> = set.iter().map(LevelName::as_str).collect();
        assert_eq!(names, vec!["warn", "info", "debug"]);
        assert!(set.contains("DEBUG"));
    }

    #[test]
    fn test_difference_and_union_keep_order() {
        let a: LevelSet = ["info", "debug", "invented"].into_iter().collect();
        let b: LevelSet = ["debug", "error"].into_iter().collect();
        assert_eq!(a.difference(&b).joined(), "info, invented");
        assert_eq!(a.union(&b).joined(), "info, debug, invented, error");
    }

    #[test]
    fn test_preferred_falls_back_to_first() {
        let set: LevelSet = ["warn", "information", "error"].into_iter().collect();
        assert_eq!(set.preferred("info").map(LevelName::as_str), Some("information"));
        assert_eq!(set.preferred("unknown").map(LevelName::as_str), Some("warn"));
        assert!(LevelSet::new().preferred("info").is_none());
    }

    #[test]
    fn test_contains_normalizes_like_insert() {
        let mut set = LevelSet::new();
        set.insert(" Info ");
        assert!(set.contains(" info"));
        assert!(set.contains("INFO "));
        assert_eq!(set.first().map(LevelName::spelling), Some("Info"));
    }

    #[test]
    fn test_empty_names_are_ignored() {
        let mut set = LevelSet::new();
        assert!(!set.insert(""));
        assert!(set.is_empty());
    }
}
