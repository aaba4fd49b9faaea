//! Injected logger: reconcile the log levels a consumer wants with whatever
//! a backend actually supports.
//!
//! ```text
//! Facade::bind(backend, options)
//!     → reconcile::prober    (which levels can the backend drive, and how)
//!     → reconcile::fallback  (emulate the rest through a native level)
//!     → reconcile::dispatch  (level → handler table + classification)
//!     → Facade::call(level, message)
//! ```

pub mod backend;
pub mod config;
pub mod facade;
pub mod level;
pub mod observability;
pub mod reconcile;
pub mod registry;

pub use backend::{Backend, BackendHandle, LogEntry, Message, Severity};
pub use config::LoggerConfig;
pub use facade::{BindOptions, Facade, FacadeError};
pub use level::{LevelName, LevelSet};
pub use reconcile::Classification;
pub use registry::Registry;
