//! Emulation of non-native levels through a native one.
//!
//! # Responsibilities
//! - Choose the fallback level among the native ones
//! - Build tagging handlers that redirect a non-native level to it
//!
//! # Design Decisions
//! - No preference configured means non-native levels stay unsupported
//! - The tag wraps the rendered message, so lazy producers stay lazy
//! - Redirected messages go through the fallback's own handler and pick up
//!   whatever prefix handling that level has

use std::sync::Arc;

use crate::backend::Message;
use crate::level::{LevelName, LevelSet};
use crate::reconcile::dispatch::Handler;

/// Outcome of fallback selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    /// Native level used to emulate the others.
    pub fallback: Option<LevelName>,
    /// Non-native levels that get a tagging handler.
    pub redirected: LevelSet,
    /// `native` plus `redirected`.
    pub supported: LevelSet,
}

/// Decide which native level, if any, non-native levels are redirected to.
pub fn synthesize(native: &LevelSet, nonnative: &LevelSet, preference: Option<&str>) -> Synthesis {
    let unchanged = || Synthesis {
        fallback: None,
        redirected: LevelSet::new(),
        supported: native.clone(),
    };

    if nonnative.is_empty() {
        return unchanged();
    }
    let Some(preference) = preference else {
        return unchanged();
    };
    let Some(fallback) = native.preferred(preference).cloned() else {
        return unchanged();
    };

    Synthesis {
        fallback: Some(fallback),
        redirected: nonnative.clone(),
        supported: native.union(nonnative),
    }
}

/// Handler for `level` that tags the message and hands it to `target`.
pub fn tagging_handler(level: &LevelName, target: Handler) -> Handler {
    let tag = level.tag();
    Arc::new(move |message: Message| target(message.prepend(tag.clone())))
}
