//! Summary of a reconciliation.

use serde::Serialize;

use crate::level::{LevelName, LevelSet};

/// How a requested level set maps onto a backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Levels the backend drives directly.
    pub native: LevelSet,
    /// Levels the backend cannot drive directly.
    pub nonnative: LevelSet,
    /// Native level emulating the non-native ones.
    pub fallback: Option<LevelName>,
    /// Callable levels: native plus redirected non-native.
    pub supported: LevelSet,
    /// Level usable for self-diagnostic messages.
    pub info: Option<LevelName>,
    /// Levels that were supported before this rebuild and no longer are.
    pub removed: LevelSet,
}

impl Classification {
    /// Requested levels left without any handler.
    pub fn unsupported(&self) -> LevelSet {
        self.nonnative.difference(&self.supported)
    }

    pub fn supports(&self, level: &str) -> bool {
        self.supported.contains(level)
    }

    /// Self-diagnostic text describing emulated or unsupported levels.
    /// `None` when every level is native.
    pub fn diagnostic(&self) -> Option<String> {
        if self.nonnative.is_empty() {
            return None;
        }
        match &self.fallback {
            Some(fallback) => Some(format!(
                "non-native log levels {} emulated using {} severity",
                self.nonnative,
                fallback.upper()
            )),
            None => Some(format!("unsupported log levels {}", self.nonnative)),
        }
    }
}
