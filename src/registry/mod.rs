//! Caller-owned registry of named facades.
//!
//! # Responsibilities
//! - Hold one facade per name, with the levels its consumers require
//! - Bind lazily on first access through a per-name backend factory
//! - Check required levels once a backend is known
//!
//! # Design Decisions
//! - The registry is an ordinary value; whoever needs loggers owns it
//! - Each slot has its own mutex so a factory runs at most once, and
//!   concurrent first accesses wait for the winner's bind
//! - A registry-wide default factory stands in when a slot has none or
//!   its factory declines
//! - Ready hooks run after the slot lock is released, so a hook may call
//!   back into the registry for its own name

use std::sync::{Arc, Mutex, MutexGuard};

use dashmap::DashMap;

use crate::backend::BackendHandle;
use crate::facade::{BindOptions, Facade, FacadeError};
use crate::facade::error::FacadeResult;
use crate::level::{LevelName, LevelSet};

/// Produces a backend and its options on first use. Returning `None`
/// defers to the registry's default factory.
pub type BackendFactory = Arc<dyn Fn() -> Option<(BackendHandle, BindOptions)> + Send + Sync>;

#[derive(Default)]
struct SlotConfig {
    required: LevelSet,
    factory: Option<BackendFactory>,
}

struct Slot {
    facade: Arc<Facade>,
    config: Mutex<SlotConfig>,
}

impl Slot {
    fn new(name: &str) -> Self {
        Self {
            facade: Arc::new(Facade::new(name)),
            config: Mutex::new(SlotConfig::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotConfig> {
        self.config.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Named facades with lazy backend binding.
#[derive(Default)]
pub struct Registry {
    slots: DashMap<String, Arc<Slot>>,
    default_factory: Option<BackendFactory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose slots fall back to `factory` when they cannot bind otherwise.
    pub fn with_default<F>(factory: F) -> Self
    where
        F: Fn() -> Option<(BackendHandle, BindOptions)> + Send + Sync + 'static,
    {
        Self {
            slots: DashMap::new(),
            default_factory: Some(Arc::new(factory)),
        }
    }

    fn slot(&self, name: &str) -> Arc<Slot> {
        self.slots
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Slot::new(name)))
            .clone()
    }

    /// Declare that `name` needs `required` levels, optionally with a
    /// factory used on first access. Repeated declarations accumulate
    /// required levels; a later factory replaces an earlier one.
    pub fn declare<I, L>(&self, name: &str, required: I, factory: Option<BackendFactory>) -> Arc<Facade>
    where
        I: IntoIterator<Item = L>,
        L: Into<LevelName>,
    {
        let slot = self.slot(name);
        let mut config = slot.lock();
        config.required.extend(required);
        if factory.is_some() {
            config.factory = factory;
        }
        tracing::debug!(logger = %name, required = %config.required, "Logger declared");
        slot.facade.clone()
    }

    /// Bind `backend` to `name` now. Declared required levels are added to
    /// the requested ones.
    pub fn inject(&self, name: &str, backend: BackendHandle, options: BindOptions) -> FacadeResult<Arc<Facade>> {
        self.inject_with(name, backend, options, false)
    }

    /// Like [`Registry::inject`] but replaces a bound backend.
    pub fn inject_forced(&self, name: &str, backend: BackendHandle, options: BindOptions) -> FacadeResult<Arc<Facade>> {
        self.inject_with(name, backend, options, true)
    }

    fn inject_with(&self, name: &str, backend: BackendHandle, options: BindOptions, force: bool) -> FacadeResult<Arc<Facade>> {
        let slot = self.slot(name);
        let pending = {
            let config = slot.lock();
            slot.facade.attach(backend, options.require(&config.required), force)?
        };
        pending.complete();
        Ok(slot.facade.clone())
    }

    /// Register a ready hook on `name`'s facade.
    pub fn after_injection<F>(&self, name: &str, hook: F)
    where
        F: Fn(&Facade) + Send + Sync + 'static,
    {
        self.slot(name).facade.on_ready(hook);
    }

    /// The bound facade for `name`, binding it through its factory on first access.
    ///
    /// Fails with `MissingBackendFactory` if nothing can supply a backend and
    /// with `UnsupportedLevels` if required levels are not supported.
    pub fn logger(&self, name: &str) -> FacadeResult<Arc<Facade>> {
        let slot = self
            .slots
            .get(name)
            .map(|s| s.value().clone())
            .ok_or_else(|| FacadeError::MissingBackendFactory(name.to_string()))?;

        let (pending, required) = {
            let config = slot.lock();
            let pending = if slot.facade.is_bound() {
                None
            } else {
                let produced = config
                    .factory
                    .as_ref()
                    .and_then(|factory| factory())
                    .or_else(|| self.default_factory.as_ref().and_then(|factory| factory()));
                let (backend, options) =
                    produced.ok_or_else(|| FacadeError::MissingBackendFactory(name.to_string()))?;
                tracing::debug!(logger = %name, backend = backend.name(), "Binding logger on first use");
                Some(slot.facade.attach(backend, options.require(&config.required), false)?)
            };
            (pending, config.required.clone())
        };
        if let Some(pending) = pending {
            pending.complete();
        }
        slot.facade.ensure_supported(&required)?;
        Ok(slot.facade.clone())
    }

    /// The facade for `name` without binding it.
    pub fn get(&self, name: &str) -> Option<Arc<Facade>> {
        self.slots.get(name).map(|s| s.facade.clone())
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.iter().map(|s| s.key().clone()).collect();
        names.sort();
        names
    }

    pub fn remove(&self, name: &str) -> Option<Arc<Facade>> {
        self.slots.remove(name).map(|(_, slot)| slot.facade.clone())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
