//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! reconcile / facade / registry / config
//!     → tracing events (structured fields: logger, backend, levels)
//!     → logging.rs subscriber (fmt layer on stderr, EnvFilter)
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber is the
//!   binary's job
//! - Rebuilds log at debug, dispatches at trace, conflicts at warn

pub mod logging;
