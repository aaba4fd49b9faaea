//! Bind-time options.

use crate::config::LoggerConfig;
use crate::level::{common_levels, LevelName, LevelSet, DEFAULT_FALLBACK};

/// Requested levels, fallback preference and prefix for a bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindOptions {
    pub levels: LevelSet,
    pub fallback: Option<String>,
    pub prefix: Option<String>,
    /// Emit a self-diagnostic through the `info` level after each rebuild.
    pub announce: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            levels: common_levels(),
            fallback: Some(DEFAULT_FALLBACK.to_string()),
            prefix: None,
            announce: true,
        }
    }
}

impl BindOptions {
    pub fn levels<I, L>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LevelName>,
    {
        self.levels = levels.into_iter().collect();
        self
    }

    pub fn fallback(mut self, preference: impl Into<String>) -> Self {
        self.fallback = Some(preference.into());
        self
    }

    pub fn no_fallback(mut self) -> Self {
        self.fallback = None;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn announce(mut self, announce: bool) -> Self {
        self.announce = announce;
        self
    }

    /// Append `required` to the requested levels.
    pub fn require(mut self, required: &LevelSet) -> Self {
        self.levels.extend_from(required);
        self
    }
}

impl From<&LoggerConfig> for BindOptions {
    fn from(config: &LoggerConfig) -> Self {
        Self {
            levels: config.levels.iter().collect(),
            fallback: config.fallback_preference().map(str::to_string),
            prefix: config.prefix.clone().filter(|p| !p.is_empty()),
            announce: config.announce,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = BindOptions::default();
        assert_eq!(opts.levels.len(), 9);
        assert_eq!(opts.fallback.as_deref(), Some("unknown"));
        assert!(opts.prefix.is_none());
        assert!(opts.announce);
    }

    #[test]
    fn test_require_appends_without_duplicates() {
        let required: LevelSet = ["invented", "info"].into_iter().collect();
        let opts = BindOptions::default().levels(["info", "debug"]).require(&required);
        assert_eq!(opts.levels.joined(), "info, debug, invented");
    }
}
