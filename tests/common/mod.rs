//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use injected_logger::{Backend, BackendHandle, LogEntry, Message, Severity};

/// One call the backend received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Member name, or `log` for the generic entry point.
    pub target: String,
    pub severity: Option<Severity>,
    pub message: String,
}

/// A programmable backend that records every call.
#[derive(Default)]
pub struct RecordingBackend {
    members: Vec<String>,
    constants: Option<Vec<String>>,
    levels: Option<Vec<String>>,
    entry: Option<LogEntry>,
    severities: Vec<String>,
    fingerprint: Option<String>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingBackend {
    /// Backend with one callable member per name.
    pub fn with_members(members: &[&str]) -> Self {
        Self {
            members: members.iter().map(|m| m.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Backend exposing only `log(message)`.
    pub fn message_log() -> Self {
        Self {
            entry: Some(LogEntry::MessageOnly),
            ..Self::default()
        }
    }

    /// Backend exposing only `log(severity, message)` over `severities`.
    pub fn severity_log(severities: &[&str]) -> Self {
        Self {
            entry: Some(LogEntry::WithSeverity),
            severities: severities.iter().map(|s| s.to_uppercase()).collect(),
            ..Self::default()
        }
    }

    pub fn constants(mut self, constants: &[&str]) -> Self {
        self.constants = Some(constants.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn advertised(mut self, levels: &[&str]) -> Self {
        self.levels = Some(levels.iter().map(|l| l.to_string()).collect());
        self
    }

    pub fn fingerprint(mut self, fingerprint: &str) -> Self {
        self.fingerprint = Some(fingerprint.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.message).collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, target: &str, severity: Option<Severity>, message: String) {
        self.calls.lock().unwrap().push(Call {
            target: target.to_string(),
            severity,
            message,
        });
    }
}

impl Backend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    fn level_constants(&self) -> Option<Vec<String>> {
        self.constants.clone()
    }

    fn levels(&self) -> Option<Vec<String>> {
        self.levels.clone()
    }

    fn responds_to(&self, member: &str) -> bool {
        self.members.iter().any(|m| m == member)
    }

    fn invoke(&self, member: &str, message: Message) {
        self.record(member, None, message.render());
    }

    fn log_entry(&self) -> Option<LogEntry> {
        self.entry
    }

    fn severity(&self, name: &str) -> Option<Severity> {
        self.severities
            .iter()
            .position(|s| s == name)
            .map(|i| Severity(i as i64))
    }

    fn log(&self, severity: Option<Severity>, message: String) {
        self.record("log", severity, message);
    }

    fn fingerprint(&self) -> Option<String> {
        self.fingerprint.clone()
    }
}

/// A recording backend and a handle to it.
pub fn recording(backend: RecordingBackend) -> (Arc<RecordingBackend>, BackendHandle) {
    let backend = Arc::new(backend);
    let handle = BackendHandle::from(backend.clone());
    (backend, handle)
}
