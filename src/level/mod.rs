//! Level vocabulary.
//!
//! # Responsibilities
//! - Normalize level names so spellings differing only in case compare equal
//! - Keep requested levels in insertion order without duplicates
//!
//! # Design Decisions
//! - Names are stored lower-cased; the upper-cased form is derived for tags
//! - `LevelSet` is a `Vec` plus a membership `HashSet` so "first occurrence
//!   wins" stays stable across merges

pub mod name;
pub mod set;

pub use name::LevelName;
pub use set::LevelSet;

/// Levels searched for when the caller does not say otherwise.
pub const COMMON_LEVELS: [&str; 9] = [
    "debug", "verbose", "notice", "info", "warn", "error", "critical", "fatal", "unknown",
];

/// Default fallback preference for non-native levels.
pub const DEFAULT_FALLBACK: &str = "unknown";

/// Level used for self-diagnostic messages when available.
pub const DIAGNOSTIC_LEVEL: &str = "info";

/// The common level vocabulary as a set.
pub fn common_levels() -> LevelSet {
    COMMON_LEVELS.iter().copied().collect()
}
