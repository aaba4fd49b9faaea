//! Logging facade.
//!
//! # Data Flow
//! ```text
//! bind(backend, options)
//!     → writer lock (single writer, first bind is check-and-set)
//!     → reconcile::build (fresh table + classification)
//!     → ArcSwap store of the new snapshot
//!     → self-diagnostic through the `info` level
//!     → ready hooks
//!
//! call(level, message)
//!     → lock-free snapshot load
//!     → table handler, else direct forward to the backend member
//! ```
//!
//! # Design Decisions
//! - Readers never see a table under construction: snapshots are swapped whole
//! - Setters rebuild from the full current state, never patch
//! - Hooks and diagnostics run after the writer lock is released

pub mod error;
pub mod logger;
pub mod options;

pub use error::FacadeError;
pub use logger::{Facade, ReadyHook};
pub use options::BindOptions;
