//! Facade error definitions.

use thiserror::Error;

use crate::level::LevelSet;

/// Errors surfaced by the facade and the registry. None are retried.
#[derive(Debug, Error)]
pub enum FacadeError {
    /// A different backend is already bound and the bind was not forced.
    #[error("logger {name} was already using backend {current}")]
    AlreadyInUse { name: String, current: String },

    /// Required levels are still unsupported after reconciliation.
    #[error("logger does not support required levels {0}")]
    UnsupportedLevels(LevelSet),

    /// Neither the dispatch table nor the backend knows this operation.
    #[error("backend has no operation named {0}")]
    NoSuchOperation(String),

    /// A bind was needed but nothing can supply a backend.
    #[error("no backend or backend factory available for logger {0}")]
    MissingBackendFactory(String),

    /// Reconfiguration attempted before any backend was bound.
    #[error("logger {0} has no backend bound yet")]
    NotBound(String),
}

/// Result type for facade operations.
pub type FacadeResult<T> = Result<T, FacadeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_levels_message() {
        let levels: LevelSet = ["ghost", "spirit"].into_iter().collect();
        let err = FacadeError::UnsupportedLevels(levels);
        assert_eq!(err.to_string(), "logger does not support required levels ghost, spirit");
    }
}
