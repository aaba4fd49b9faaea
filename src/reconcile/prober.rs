//! Capability discovery.
//!
//! # Responsibilities
//! - Assemble the candidate pool: backend level constants, then the
//!   backend's `levels()` answer, then the requested levels
//! - Decide for every candidate how (and whether) the backend can be driven
//!
//! # Design Decisions
//! - A member named after the level beats the generic `log` entry point
//! - Member lookup tries the spelling as given, then lower case
//! - `log(severity, message)` only covers levels whose upper-case name
//!   resolves in the backend's severity vocabulary

use std::collections::HashMap;

use crate::backend::{Backend, LogEntry, Severity};
use crate::level::{LevelName, LevelSet};

/// How a native level reaches the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Call the backend member with this exact name.
    Member(String),
    /// `log(message)` with the level expressed as a bracketed tag.
    TaggedLog,
    /// `log(severity, message)`.
    SeverityLog(Severity),
}

/// Result of probing a backend.
#[derive(Debug, Clone, Default)]
pub struct Probe {
    pub native: LevelSet,
    pub nonnative: LevelSet,
    pub routes: HashMap<LevelName, Route>,
}

impl Probe {
    pub fn route(&self, level: &LevelName) -> Option<&Route> {
        self.routes.get(level)
    }
}

/// One candidate, remembering the spelling it was discovered with.
#[derive(Debug, Clone)]
struct Candidate {
    level: LevelName,
    spelling: String,
}

fn candidate_pool(backend: &dyn Backend, requested: &LevelSet) -> Vec<Candidate> {
    let mut seen = LevelSet::new();
    let mut pool = Vec::new();

    let advertised = backend
        .level_constants()
        .into_iter()
        .flatten()
        .chain(backend.levels().into_iter().flatten());
    let requested = requested.iter().map(|l| l.spelling().to_string());

    for spelling in advertised.chain(requested) {
        let level = LevelName::new(&spelling);
        if seen.insert(level.clone()) {
            pool.push(Candidate { level, spelling });
        }
    }
    pool
}

fn member_route(backend: &dyn Backend, spelling: &str) -> Option<Route> {
    if backend.responds_to(spelling) {
        return Some(Route::Member(spelling.to_string()));
    }
    let lower = spelling.to_lowercase();
    if lower != spelling && backend.responds_to(&lower) {
        return Some(Route::Member(lower));
    }
    None
}

fn generic_route(backend: &dyn Backend, level: &LevelName) -> Option<Route> {
    match backend.log_entry()? {
        LogEntry::MessageOnly => Some(Route::TaggedLog),
        LogEntry::WithSeverity => backend.severity(&level.upper()).map(Route::SeverityLog),
    }
}

/// Partition the candidate pool into levels the backend can and cannot drive.
pub fn probe(backend: &dyn Backend, requested: &LevelSet) -> Probe {
    let mut result = Probe::default();

    for candidate in candidate_pool(backend, requested) {
        let route = member_route(backend, &candidate.spelling)
            .or_else(|| generic_route(backend, &candidate.level));
        match route {
            Some(route) => {
                result.routes.insert(candidate.level.clone(), route);
                result.native.insert(candidate.level);
            }
            None => {
                result.nonnative.insert(candidate.level);
            }
        }
    }

    tracing::trace!(
        backend = backend.name(),
        native = %result.native,
        nonnative = %result.nonnative,
        "Probed backend capabilities"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Message;

    struct Members(&'static [&'static str]);
    impl Backend for Members {
        fn responds_to(&self, member: &str) -> bool {
            self.0.contains(&member)
        }
    }

    struct Constants;
    impl Backend for Constants {
        fn level_constants(&self) -> Option<Vec<String>> {
            Some(vec!["WARN".into(), "ERROR".into()])
        }
        fn levels(&self) -> Option<Vec<String>> {
            Some(vec!["warn".into(), "audit".into()])
        }
        fn responds_to(&self, member: &str) -> bool {
            matches!(member, "warn" | "error" | "audit")
        }
        fn invoke(&self, _member: &str, _message: Message) {}
    }

    struct SeverityLog;
    impl Backend for SeverityLog {
        fn responds_to(&self, member: &str) -> bool {
            member == "debug"
        }
        fn log_entry(&self) -> Option<LogEntry> {
            Some(LogEntry::WithSeverity)
        }
        fn severity(&self, name: &str) -> Option<Severity> {
            match name {
                "INFO" => Some(Severity(1)),
                "DEBUG" => Some(Severity(0)),
                _ => None,
            }
        }
    }

    fn set(levels: &[&str]) -> LevelSet {
        levels.iter().copied().collect()
    }

    #[test]
    fn test_member_route_partition() {
        let probe = probe(&Members(&["info", "warn"]), &set(&["info", "invented", "warn"]));
        assert_eq!(probe.native, set(&["info", "warn"]));
        assert_eq!(probe.nonnative, set(&["invented"]));
        assert_eq!(probe.route(&"info".into()), Some(&Route::Member("info".into())));
    }

    #[test]
    fn test_pool_order_constants_then_levels_then_requested() {
        let probe = probe(&Constants, &set(&["info"]));
        assert_eq!(probe.native, set(&["warn", "error", "audit"]));
        assert_eq!(probe.nonnative, set(&["info"]));
        // "WARN" is not a member, the lower-cased spelling is.
        assert_eq!(probe.route(&"warn".into()), Some(&Route::Member("warn".into())));
    }

    #[test]
    fn test_member_beats_generic_and_unknown_severity_is_skipped() {
        let probe = probe(&SeverityLog, &set(&["debug", "info", "ghost"]));
        assert_eq!(probe.route(&"debug".into()), Some(&Route::Member("debug".into())));
        assert_eq!(probe.route(&"info".into()), Some(&Route::SeverityLog(Severity(1))));
        assert_eq!(probe.nonnative, set(&["ghost"]));
    }

    #[test]
    fn test_requested_spelling_reaches_exact_case_member() {
        let probe = probe(&Members(&["WARN"]), &set(&["WARN", "Error"]));
        assert_eq!(probe.native, set(&["warn"]));
        assert_eq!(probe.nonnative, set(&["error"]));
        assert_eq!(probe.route(&"warn".into()), Some(&Route::Member("WARN".into())));
    }

    #[test]
    fn test_nothing_supported() {
        let probe = probe(&Members(&[]), &set(&["info", "debug"]));
        assert!(probe.native.is_empty());
        assert_eq!(probe.nonnative, set(&["info", "debug"]));
    }
}
