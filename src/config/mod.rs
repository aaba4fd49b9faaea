//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LoggerConfig (validated)
//!     → BindOptions for the first bind
//!
//! On change:
//!     watcher.rs detects modification
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → Facade::apply_config rebuilds the dispatch table
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - An invalid reload is logged and ignored; the running table stays

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{BackendKind, LoggerConfig};
pub use validation::{validate_config, ValidationError};
pub use watcher::{apply_updates, ConfigWatcher};
