//! The reconfigurable facade consumers log through.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use arc_swap::ArcSwap;

use crate::backend::{BackendHandle, Message};
use crate::config::LoggerConfig;
use crate::facade::error::{FacadeError, FacadeResult};
use crate::facade::options::BindOptions;
use crate::level::{LevelName, LevelSet};
use crate::reconcile::{build, Classification, DispatchTable};

/// Callback run after every successful bind or forced rebind.
pub type ReadyHook = Arc<dyn Fn(&Facade) + Send + Sync>;

/// Writer-side state. Only touched under the writer lock.
#[derive(Debug, Default)]
struct FacadeState {
    backend: Option<BackendHandle>,
    options: BindOptions,
}

/// Everything a reader needs, published atomically.
#[derive(Debug, Default)]
struct Snapshot {
    backend: Option<BackendHandle>,
    options: BindOptions,
    table: DispatchTable,
    classification: Classification,
}

/// A named logger reconciling requested levels against its backend.
pub struct Facade {
    name: String,
    writer: Mutex<FacadeState>,
    current: ArcSwap<Snapshot>,
    hooks: Mutex<Vec<ReadyHook>>,
}

impl Facade {
    /// Create an unbound facade.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(FacadeState::default()),
            current: ArcSwap::from_pointee(Snapshot::default()),
            hooks: Mutex::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a callback run once per successful bind or forced rebind,
    /// after the dispatch table is installed.
    pub fn on_ready<F>(&self, hook: F)
    where
        F: Fn(&Facade) + Send + Sync + 'static,
    {
        lock(&self.hooks).push(Arc::new(hook));
    }

    /// Bind a backend.
    ///
    /// Binding the backend that is already bound is a no-op. Binding a
    /// different one fails with `AlreadyInUse`; see [`Facade::bind_forced`].
    pub fn bind(&self, backend: BackendHandle, options: BindOptions) -> FacadeResult<Classification> {
        Ok(self.attach(backend, options, false)?.complete())
    }

    /// Bind `backend` unconditionally, replacing any current one.
    pub fn bind_forced(&self, backend: BackendHandle, options: BindOptions) -> FacadeResult<Classification> {
        Ok(self.attach(backend, options, true)?.complete())
    }

    /// Install `backend` without running the announcement or ready hooks.
    /// They run when the returned [`PendingBind`] is completed, which lets
    /// callers release their own locks first.
    pub(crate) fn attach(&self, backend: BackendHandle, options: BindOptions, force: bool) -> FacadeResult<PendingBind<'_>> {
        let mut state = lock(&self.writer);
        if let (false, Some(current)) = (force, &state.backend) {
            if current.same_as(&backend) {
                return Ok(PendingBind {
                    facade: self,
                    snapshot: None,
                    classification: self.classification(),
                });
            }
            tracing::warn!(
                logger = %self.name,
                current = current.name(),
                requested = backend.name(),
                "Refusing to replace bound backend"
            );
            return Err(FacadeError::AlreadyInUse {
                name: self.name.clone(),
                current: current.name().to_string(),
            });
        }
        state.backend = Some(backend);
        state.options = options;
        let snapshot = self.install(&state)?;
        drop(state);

        tracing::info!(
            logger = %self.name,
            backend = snapshot.backend.as_ref().map(|b| b.name()).unwrap_or_default(),
            supported = %snapshot.classification.supported,
            "Backend bound"
        );
        Ok(PendingBind {
            facade: self,
            classification: snapshot.classification.clone(),
            snapshot: Some(snapshot),
        })
    }

    /// Rebuild the table from `state` and publish it.
    fn install(&self, state: &FacadeState) -> FacadeResult<Arc<Snapshot>> {
        let backend = state
            .backend
            .clone()
            .ok_or_else(|| FacadeError::NotBound(self.name.clone()))?;
        let previous = self.current.load();
        let (table, classification) = build(
            &backend,
            &state.options.levels,
            state.options.prefix.as_deref(),
            state.options.fallback.as_deref(),
            &previous.classification.supported,
        );
        let snapshot = Arc::new(Snapshot {
            backend: Some(backend),
            options: state.options.clone(),
            table,
            classification,
        });
        self.current.store(snapshot.clone());
        Ok(snapshot)
    }

    fn announce(&self, snapshot: &Snapshot) {
        if !snapshot.options.announce {
            return;
        }
        let classification = &snapshot.classification;
        let (Some(info), Some(text)) = (&classification.info, classification.diagnostic()) else {
            return;
        };
        if let Some(handler) = snapshot.table.get(info.as_str()) {
            handler(Message::text(text));
        }
    }

    fn run_hooks(&self) {
        let hooks: Vec<ReadyHook> = lock(&self.hooks).clone();
        for hook in hooks {
            hook(self);
        }
    }

    /// Apply `change` to the bound state and rebuild.
    fn reconfigure<F>(&self, change: F) -> FacadeResult<Classification>
    where
        F: FnOnce(&mut BindOptions),
    {
        let mut state = lock(&self.writer);
        if state.backend.is_none() {
            return Err(FacadeError::NotBound(self.name.clone()));
        }
        change(&mut state.options);
        let snapshot = self.install(&state)?;
        drop(state);

        self.announce(&snapshot);
        Ok(snapshot.classification.clone())
    }

    pub fn set_prefix(&self, prefix: Option<&str>) -> FacadeResult<Classification> {
        let prefix = prefix.map(str::to_string);
        self.reconfigure(move |opts| opts.prefix = prefix)
    }

    pub fn set_levels<I, L>(&self, levels: I) -> FacadeResult<Classification>
    where
        I: IntoIterator<Item = L>,
        L: Into<LevelName>,
    {
        let levels: LevelSet = levels.into_iter().collect();
        self.reconfigure(move |opts| opts.levels = levels)
    }

    pub fn set_fallback(&self, preference: Option<&str>) -> FacadeResult<Classification> {
        let preference = preference.map(str::to_string);
        self.reconfigure(move |opts| opts.fallback = preference)
    }

    /// Merge `extra` into the requested levels and rebuild. Fails with
    /// `UnsupportedLevels` if any of `extra` is still unsupported; the merge
    /// is kept either way.
    pub fn add_levels<I, L>(&self, extra: I) -> FacadeResult<Classification>
    where
        I: IntoIterator<Item = L>,
        L: Into<LevelName>,
    {
        let extra: LevelSet = extra.into_iter().collect();
        let merged = extra.clone();
        let classification = self.reconfigure(move |opts| opts.levels.extend_from(&merged))?;
        check_supported(&classification, &extra)?;
        Ok(classification)
    }

    /// Replace levels, fallback, prefix and announcement from a config in
    /// a single rebuild.
    pub fn apply_config(&self, config: &LoggerConfig) -> FacadeResult<Classification> {
        let options = BindOptions::from(config);
        self.reconfigure(move |opts| *opts = options)
    }

    /// Fail with `UnsupportedLevels` unless every level of `required` is supported.
    pub fn ensure_supported(&self, required: &LevelSet) -> FacadeResult<()> {
        check_supported(&self.current.load().classification, required)
    }

    /// Dispatch `message` at `level`.
    ///
    /// Levels outside the dispatch table are forwarded to a backend member
    /// of the same name, which lets callers reach backend operations beyond
    /// the level vocabulary.
    pub fn call(&self, level: &str, message: impl Into<Message>) -> FacadeResult<()> {
        let snapshot = self.current.load();
        if let Some(handler) = snapshot.table.get(level) {
            tracing::trace!(logger = %self.name, level = %level, "Dispatching");
            handler(message.into());
            return Ok(());
        }

        let backend = snapshot
            .backend
            .as_ref()
            .ok_or_else(|| FacadeError::NotBound(self.name.clone()))?;
        let lower = level.to_lowercase();
        let member = [level, lower.as_str()]
            .into_iter()
            .find(|m| backend.responds_to(m))
            .ok_or_else(|| FacadeError::NoSuchOperation(level.to_string()))?;

        tracing::trace!(logger = %self.name, member = %member, "Forwarding to backend");
        backend.invoke(member, message.into());
        Ok(())
    }

    /// Like [`Facade::call`] with a lazily built message.
    pub fn call_with<F>(&self, level: &str, producer: F) -> FacadeResult<()>
    where
        F: FnOnce() -> String + Send + 'static,
    {
        self.call(level, Message::lazy(producer))
    }

    pub fn debug(&self, message: impl Into<Message>) -> FacadeResult<()> {
        self.call("debug", message)
    }

    pub fn info(&self, message: impl Into<Message>) -> FacadeResult<()> {
        self.call("info", message)
    }

    pub fn warn(&self, message: impl Into<Message>) -> FacadeResult<()> {
        self.call("warn", message)
    }

    pub fn error(&self, message: impl Into<Message>) -> FacadeResult<()> {
        self.call("error", message)
    }

    // --- Queries ---

    pub fn is_bound(&self) -> bool {
        self.current.load().backend.is_some()
    }

    pub fn backend(&self) -> Option<BackendHandle> {
        self.current.load().backend.clone()
    }

    pub fn classification(&self) -> Classification {
        self.current.load().classification.clone()
    }

    /// Requested levels.
    pub fn levels(&self) -> LevelSet {
        self.current.load().options.levels.clone()
    }

    pub fn prefix(&self) -> Option<String> {
        self.current.load().options.prefix.clone()
    }

    pub fn fallback(&self) -> Option<String> {
        self.current.load().options.fallback.clone()
    }

    pub fn supports(&self, level: &str) -> bool {
        self.current.load().table.contains(level)
    }
}

impl fmt::Debug for Facade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.current.load();
        f.debug_struct("Facade")
            .field("name", &self.name)
            .field("backend", &snapshot.backend)
            .field("classification", &snapshot.classification)
            .finish()
    }
}

/// An installed bind whose announcement and ready hooks are still due.
#[must_use]
pub(crate) struct PendingBind<'a> {
    facade: &'a Facade,
    snapshot: Option<Arc<Snapshot>>,
    classification: Classification,
}

impl PendingBind<'_> {
    /// Announce and run ready hooks, unless the bind was a no-op.
    pub(crate) fn complete(self) -> Classification {
        if let Some(snapshot) = &self.snapshot {
            self.facade.announce(snapshot);
            self.facade.run_hooks();
        }
        self.classification
    }
}

fn check_supported(classification: &Classification, required: &LevelSet) -> FacadeResult<()> {
    let missing = required.difference(&classification.supported);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FacadeError::UnsupportedLevels(missing))
    }
}

/// Lock, recovering the guard from a poisoned mutex.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
