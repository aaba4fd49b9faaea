//! Generic-`log` backends writing lines to an `io::Write`.
//!
//! # Design Decisions
//! - `message_only` exposes `log(message)`; levels reach it as tags
//! - `with_severities` exposes `log(severity, message)` plus a `LEVELS`
//!   constant and one upper-case constant per severity, the way stdlib-style
//!   loggers do

use std::io::{self, Write};
use std::sync::Mutex;

use crate::backend::{Backend, LogEntry, Severity};

/// Line-oriented backend without per-level members.
pub struct WriterBackend {
    out: Mutex<Box<dyn Write + Send>>,
    entry: LogEntry,
    severities: Vec<String>,
}

impl WriterBackend {
    /// Backend with a single-parameter `log(message)`.
    pub fn message_only<W: Write + Send + 'static>(out: W) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
            entry: LogEntry::MessageOnly,
            severities: Vec::new(),
        }
    }

    /// Backend with `log(severity, message)` and the given severity names.
    /// A severity's value is its position in `names`.
    pub fn with_severities<W, I, S>(out: W, names: I) -> Self
    where
        W: Write + Send + 'static,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            out: Mutex::new(Box::new(out)),
            entry: LogEntry::WithSeverity,
            severities: names
                .into_iter()
                .map(|n| n.as_ref().to_uppercase())
                .collect(),
        }
    }

    pub fn stderr() -> Self {
        Self::message_only(io::stderr())
    }

    fn severity_name(&self, severity: Severity) -> Option<&str> {
        usize::try_from(severity.0)
            .ok()
            .and_then(|i| self.severities.get(i))
            .map(String::as_str)
    }

    fn write_line(&self, line: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(out, "{line}") {
            tracing::debug!(error = %e, "writer backend failed to write");
        }
    }
}

impl Backend for WriterBackend {
    fn name(&self) -> &str {
        match self.entry {
            LogEntry::MessageOnly => "writer",
            LogEntry::WithSeverity => "severity-writer",
        }
    }

    fn level_constants(&self) -> Option<Vec<String>> {
        match self.entry {
            LogEntry::MessageOnly => None,
            LogEntry::WithSeverity => Some(self.severities.clone()),
        }
    }

    fn log_entry(&self) -> Option<LogEntry> {
        Some(self.entry)
    }

    fn severity(&self, name: &str) -> Option<Severity> {
        self.severities
            .iter()
            .position(|s| s == name)
            .and_then(|i| i64::try_from(i).ok())
            .map(Severity)
    }

    fn log(&self, severity: Option<Severity>, message: String) {
        match severity.and_then(|s| self.severity_name(s)) {
            Some(name) => self.write_line(&format!("{name} {message}")),
            None => self.write_line(&message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Shared {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_message_only_writes_raw_line() {
        let out = Shared::default();
        let backend = WriterBackend::message_only(out.clone());
        backend.log(None, "[INFO] hi".into());
        assert_eq!(out.contents(), "[INFO] hi\n");
        assert!(backend.level_constants().is_none());
    }

    #[test]
    fn test_severity_vocabulary() {
        let out = Shared::default();
        let backend = WriterBackend::with_severities(out.clone(), ["debug", "info", "warn"]);
        assert_eq!(backend.severity("WARN"), Some(Severity(2)));
        assert_eq!(backend.severity("FATAL"), None);
        backend.log(backend.severity("INFO"), "ready".into());
        assert_eq!(out.contents(), "INFO ready\n");
    }
}
