//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject level names that cannot be members or tags
//! - Check the backend-specific settings that are actually used
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: LoggerConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::{BackendKind, LoggerConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("level #{0} is empty")]
    EmptyLevel(usize),

    #[error("level {0:?} contains whitespace")]
    InvalidLevel(String),

    #[error("fallback {0:?} contains whitespace")]
    InvalidFallback(String),

    #[error("prefix must be a single line")]
    MultilinePrefix,

    #[error("target must not be empty")]
    EmptyTarget,

    #[error("severity-writer backend needs at least one severity")]
    NoSeverities,
}

pub fn validate_config(config: &LoggerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (i, level) in config.levels.iter().enumerate() {
        let trimmed = level.trim();
        if trimmed.is_empty() {
            errors.push(ValidationError::EmptyLevel(i));
        } else if trimmed.contains(char::is_whitespace) {
            errors.push(ValidationError::InvalidLevel(level.clone()));
        }
    }

    if config.fallback.trim().contains(char::is_whitespace) {
        errors.push(ValidationError::InvalidFallback(config.fallback.clone()));
    }

    if config.prefix.as_deref().is_some_and(|p| p.contains('\n')) {
        errors.push(ValidationError::MultilinePrefix);
    }

    if config.target.trim().is_empty() {
        errors.push(ValidationError::EmptyTarget);
    }

    if config.backend == BackendKind::SeverityWriter && config.severities.is_empty() {
        errors.push(ValidationError::NoSeverities);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
