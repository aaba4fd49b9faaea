//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::level::{COMMON_LEVELS, DEFAULT_FALLBACK};

/// Which built-in backend the CLI binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Events through the `tracing` macros.
    #[default]
    Tracing,
    /// `log(message)` lines on stderr.
    Writer,
    /// `log(severity, message)` lines on stderr.
    SeverityWriter,
}

/// Root configuration for a logger.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Levels the consumer wants to call.
    pub levels: Vec<String>,

    /// Fallback preference for non-native levels. Empty disables emulation.
    pub fallback: String,

    /// Text placed before every message.
    pub prefix: Option<String>,

    /// Announce emulated or unsupported levels after each rebuild.
    pub announce: bool,

    /// Built-in backend selection.
    pub backend: BackendKind,

    /// `tracing` field value identifying this logger.
    pub target: String,

    /// Severity vocabulary for `severity-writer`.
    pub severities: Vec<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            levels: COMMON_LEVELS.iter().map(|l| l.to_string()).collect(),
            fallback: DEFAULT_FALLBACK.to_string(),
            prefix: None,
            announce: true,
            backend: BackendKind::default(),
            target: "injected_logger".to_string(),
            severities: ["debug", "info", "warn", "error", "fatal", "unknown"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl LoggerConfig {
    /// The fallback preference, `None` when disabled.
    pub fn fallback_preference(&self) -> Option<&str> {
        let trimmed = self.fallback.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: LoggerConfig = toml::from_str("prefix = \"[app]\"").unwrap();
        assert_eq!(config.prefix.as_deref(), Some("[app]"));
        assert_eq!(config.levels.len(), COMMON_LEVELS.len());
        assert_eq!(config.fallback_preference(), Some("unknown"));
        assert_eq!(config.backend, BackendKind::Tracing);
    }

    #[test]
    fn test_backend_kind_kebab_case() {
        let config: LoggerConfig = toml::from_str("backend = \"severity-writer\"\nfallback = \"\"").unwrap();
        assert_eq!(config.backend, BackendKind::SeverityWriter);
        assert_eq!(config.fallback_preference(), None);
    }
}
