//! Shared, comparable backend references.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::backend::Backend;

/// Reference-counted handle to a backend.
///
/// Two handles are equal when they point at the same instance, or when both
/// backends report the same configuration fingerprint.
#[derive(Clone)]
pub struct BackendHandle {
    inner: Arc<dyn Backend>,
}

impl BackendHandle {
    pub fn new<B: Backend + 'static>(backend: B) -> Self {
        Self {
            inner: Arc::new(backend),
        }
    }

    pub fn from_arc(inner: Arc<dyn Backend>) -> Self {
        Self { inner }
    }

    /// Identity or same-configuration equivalence.
    pub fn same_as(&self, other: &BackendHandle) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        match (self.inner.fingerprint(), other.inner.fingerprint()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl<B: Backend + 'static> From<Arc<B>> for BackendHandle {
    fn from(inner: Arc<B>) -> Self {
        Self { inner }
    }
}

impl Deref for BackendHandle {
    type Target = dyn Backend;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl PartialEq for BackendHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl fmt::Debug for BackendHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendHandle")
            .field("name", &self.inner.name())
            .field("fingerprint", &self.inner.fingerprint())
            .finish()
    }
}
