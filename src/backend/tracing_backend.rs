//! Backend that forwards levels to the `tracing` macros.

use crate::backend::{Backend, Message};

/// Most severe first, so a fallback that matches nothing lands on `error`.
const MEMBERS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Drives `tracing` events, one member per `tracing::Level`.
///
/// Levels outside these five are non-native and need a fallback.
#[derive(Debug, Clone)]
pub struct TracingBackend {
    target: String,
}

impl TracingBackend {
    /// `target` is attached to every event as the `logger` field.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl Default for TracingBackend {
    fn default() -> Self {
        Self::new("injected_logger")
    }
}

impl Backend for TracingBackend {
    fn name(&self) -> &str {
        "tracing"
    }

    fn levels(&self) -> Option<Vec<String>> {
        Some(MEMBERS.iter().map(|m| m.to_string()).collect())
    }

    fn responds_to(&self, member: &str) -> bool {
        MEMBERS.contains(&member)
    }

    fn invoke(&self, member: &str, message: Message) {
        let text = message.render();
        match member {
            "trace" => tracing::trace!(logger = %self.target, "{}", text),
            "debug" => tracing::debug!(logger = %self.target, "{}", text),
            "info" => tracing::info!(logger = %self.target, "{}", text),
            "warn" => tracing::warn!(logger = %self.target, "{}", text),
            "error" => tracing::error!(logger = %self.target, "{}", text),
            _ => {}
        }
    }

    fn fingerprint(&self) -> Option<String> {
        Some(format!("tracing:{}", self.target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities() {
        let backend = TracingBackend::default();
        assert!(backend.responds_to("warn"));
        assert!(!backend.responds_to("WARN"));
        assert!(!backend.responds_to("fatal"));
        assert_eq!(backend.levels().map(|l| l.len()), Some(5));
        assert!(backend.log_entry().is_none());
    }

    #[test]
    fn test_default_fallback_is_error() {
        use crate::backend::BackendHandle;
        use crate::facade::{BindOptions, Facade};

        let facade = Facade::new("app");
        let class = facade
            .bind(BackendHandle::new(TracingBackend::default()), BindOptions::default().announce(false))
            .unwrap();
        assert_eq!(class.fallback.as_ref().map(|l| l.as_str()), Some("error"));
        assert!(class.nonnative.contains("fatal"));
        assert!(class.supports("critical"));
        assert_eq!(class.info.as_ref().map(|l| l.as_str()), Some("info"));
    }

    #[test]
    fn test_same_target_same_fingerprint() {
        let a = TracingBackend::new("app");
        let b = TracingBackend::new("app");
        assert_eq!(a.fingerprint(), b.fingerprint());
    }
}
