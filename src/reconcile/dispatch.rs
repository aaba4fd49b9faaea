//! Dispatch table construction.
//!
//! # Responsibilities
//! - Run the prober and the fallback synthesizer for one configuration
//! - Build a direct handler per native level according to its route
//! - Pick the diagnostic level and record levels that stopped being supported
//!
//! # Message Formats
//! - member route: `"<prefix> <message>"`
//! - `log(severity, message)`: `"<prefix> <message>"`
//! - `log(message)`: `"[LEVEL] <prefix> <message>"`
//! - redirected level: `"[LEVEL] <message>"` handed to the fallback's handler
//!
//! The prefix segment is dropped when the prefix is absent or empty.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::backend::{BackendHandle, Message, Severity};
use crate::level::{LevelName, LevelSet, DIAGNOSTIC_LEVEL};
use crate::reconcile::classification::Classification;
use crate::reconcile::fallback::{synthesize, tagging_handler};
use crate::reconcile::prober::{probe, Route};

/// A callable level.
pub type Handler = Arc<dyn Fn(Message) + Send + Sync>;

/// Level name to handler. Keys are exactly the supported levels.
#[derive(Clone, Default)]
pub struct DispatchTable {
    handlers: HashMap<LevelName, Handler>,
}

impl DispatchTable {
    pub fn get(&self, level: &str) -> Option<&Handler> {
        self.handlers.get(level.to_lowercase().as_str())
    }

    pub fn contains(&self, level: &str) -> bool {
        self.get(level).is_some()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn levels(&self) -> impl Iterator<Item = &LevelName> {
        self.handlers.keys()
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut levels: Vec<&str> = self.handlers.keys().map(LevelName::as_str).collect();
        levels.sort_unstable();
        f.debug_struct("DispatchTable").field("levels", &levels).finish()
    }
}

fn normalize_prefix(prefix: Option<&str>) -> Option<String> {
    prefix.filter(|p| !p.is_empty()).map(str::to_string)
}

fn with_prefix(message: Message, prefix: &Option<String>) -> Message {
    match prefix {
        Some(p) => message.prepend(p.clone()),
        None => message,
    }
}

fn member_handler(backend: BackendHandle, member: String, prefix: Option<String>) -> Handler {
    Arc::new(move |message: Message| {
        backend.invoke(&member, with_prefix(message, &prefix));
    })
}

fn tagged_log_handler(backend: BackendHandle, level: &LevelName, prefix: Option<String>) -> Handler {
    let head = match prefix {
        Some(p) => format!("{} {}", level.tag(), p),
        None => level.tag(),
    };
    Arc::new(move |message: Message| {
        backend.log(None, format!("{} {}", head, message.render()));
    })
}

fn severity_log_handler(backend: BackendHandle, severity: Severity, prefix: Option<String>) -> Handler {
    Arc::new(move |message: Message| {
        backend.log(Some(severity), with_prefix(message, &prefix).render());
    })
}

fn direct_handler(backend: &BackendHandle, level: &LevelName, route: &Route, prefix: &Option<String>) -> Handler {
    match route {
        Route::Member(member) => member_handler(backend.clone(), member.clone(), prefix.clone()),
        Route::TaggedLog => tagged_log_handler(backend.clone(), level, prefix.clone()),
        Route::SeverityLog(severity) => severity_log_handler(backend.clone(), *severity, prefix.clone()),
    }
}

/// Reconcile `requested` against `backend` and build the handlers.
///
/// `previous_supported` is the supported set of the table being replaced;
/// levels in it that are not supported any more are reported in
/// `Classification::removed`.
pub fn build(
    backend: &BackendHandle,
    requested: &LevelSet,
    prefix: Option<&str>,
    fallback_preference: Option<&str>,
    previous_supported: &LevelSet,
) -> (DispatchTable, Classification) {
    let prefix = normalize_prefix(prefix);
    let probed = probe(&**backend, requested);
    let synthesis = synthesize(&probed.native, &probed.nonnative, fallback_preference);

    let mut handlers: HashMap<LevelName, Handler> = HashMap::with_capacity(synthesis.supported.len());
    for level in probed.native.iter() {
        if let Some(route) = probed.route(level) {
            handlers.insert(level.clone(), direct_handler(backend, level, route, &prefix));
        }
    }

    if let Some(fallback) = &synthesis.fallback {
        if let Some(target) = handlers.get(fallback).cloned() {
            for level in synthesis.redirected.iter() {
                handlers.insert(level.clone(), tagging_handler(level, target.clone()));
            }
        }
    }

    let removed = previous_supported.difference(&synthesis.supported);
    if !removed.is_empty() {
        tracing::debug!(removed = %removed, "Dropping handlers for levels no longer supported");
    }

    let info = synthesis.supported.preferred(DIAGNOSTIC_LEVEL).cloned();
    let classification = Classification {
        native: probed.native,
        nonnative: probed.nonnative,
        fallback: synthesis.fallback,
        supported: synthesis.supported,
        info,
        removed,
    };

    tracing::debug!(
        backend = backend.name(),
        native = %classification.native,
        nonnative = %classification.nonnative,
        fallback = ?classification.fallback.as_ref().map(LevelName::as_str),
        "Dispatch table rebuilt"
    );

    (DispatchTable { handlers }, classification)
}
