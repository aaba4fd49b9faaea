//! Backend capability contract.
//!
//! # Data Flow
//! ```text
//! concrete logger (tracing, writer, anything implementing Backend)
//!     → BackendHandle (shared, comparable by identity or fingerprint)
//!     → reconcile::prober asks which capabilities exist
//!     → reconcile::dispatch builds handlers that call back into it
//! ```
//!
//! # Design Decisions
//! - Every capability is optional; the trait's default methods describe a
//!   backend that supports nothing
//! - Members are addressed by name so levels unknown at compile time can be
//!   discovered and driven
//! - Backend I/O is fire-and-forget; retries and timeouts belong to the backend

pub mod handle;
pub mod message;
pub mod tracing_backend;
pub mod writer;

pub use handle::BackendHandle;
pub use message::Message;
pub use tracing_backend::TracingBackend;
pub use writer::WriterBackend;

use std::fmt;

/// Shape of a backend's generic `log` entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEntry {
    /// `log(message)`: no severity, levels are expressed as tags.
    MessageOnly,
    /// `log(severity, message)`: the first parameter selects a severity.
    WithSeverity,
}

impl LogEntry {
    /// Classify an entry point by its parameter count.
    pub fn from_arity(arity: usize) -> Option<Self> {
        match arity {
            0 => None,
            1 => Some(LogEntry::MessageOnly),
            _ => Some(LogEntry::WithSeverity),
        }
    }
}

/// A value from the backend's own severity vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Severity(pub i64);

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An underlying logging implementation that levels are reconciled against.
pub trait Backend: Send + Sync {
    /// Human readable name for diagnostics.
    fn name(&self) -> &str {
        "backend"
    }

    /// Statically declared level names (a `LEVELS`-style constant).
    fn level_constants(&self) -> Option<Vec<String>> {
        None
    }

    /// Levels the backend reports when asked at runtime.
    fn levels(&self) -> Option<Vec<String>> {
        None
    }

    /// Whether a callable member with exactly this name exists.
    fn responds_to(&self, _member: &str) -> bool {
        false
    }

    /// Call the named member. Only invoked after `responds_to` returned true.
    fn invoke(&self, _member: &str, _message: Message) {}

    /// The generic `log` entry point, if any.
    fn log_entry(&self) -> Option<LogEntry> {
        None
    }

    /// Resolve an upper-case severity name against the backend's vocabulary.
    fn severity(&self, _name: &str) -> Option<Severity> {
        None
    }

    /// Generic log call. `severity` is `None` for `LogEntry::MessageOnly`.
    fn log(&self, _severity: Option<Severity>, _message: String) {}

    /// Configuration fingerprint; two backends with equal fingerprints are
    /// treated as the same backend.
    fn fingerprint(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_arity() {
        assert_eq!(LogEntry::from_arity(0), None);
        assert_eq!(LogEntry::from_arity(1), Some(LogEntry::MessageOnly));
        assert_eq!(LogEntry::from_arity(2), Some(LogEntry::WithSeverity));
        assert_eq!(LogEntry::from_arity(3), Some(LogEntry::WithSeverity));
    }
}
