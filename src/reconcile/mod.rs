//! Level reconciliation engine.
//!
//! # Data Flow
//! ```text
//! (backend, requested levels, prefix, fallback preference)
//!     → prober.rs (candidate pool, native / non-native split, call routes)
//!     → fallback.rs (pick a native fallback, tag redirected levels)
//!     → dispatch.rs (one handler per supported level)
//!     → (DispatchTable, Classification)
//! ```
//!
//! # Design Decisions
//! - Pure functions over a `BackendHandle`; no shared mutable state
//! - Unsupported levels are reported in the classification, never raised
//! - Every rebuild starts from scratch; tables are never patched

pub mod classification;
pub mod dispatch;
pub mod fallback;
pub mod prober;

pub use classification::Classification;
pub use dispatch::{build, DispatchTable, Handler};
pub use fallback::{synthesize, Synthesis};
pub use prober::{probe, Probe, Route};
