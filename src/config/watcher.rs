//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::LoggerConfig;
use crate::facade::Facade;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<LoggerConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<LoggerConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Config file change detected, reloading...");
                        match load_config(&path) {
                            Ok(new_config) => {
                                let _ = tx.send(new_config);
                            }
                            Err(e) => {
                                tracing::error!("Failed to reload config: {}. Keeping current levels.", e);
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

/// Apply every received configuration to `facade` until the channel closes.
pub async fn apply_updates(facade: Arc<Facade>, mut updates: mpsc::UnboundedReceiver<LoggerConfig>) {
    while let Some(config) = updates.recv().await {
        match facade.apply_config(&config) {
            Ok(classification) => tracing::info!(
                logger = %facade.name(),
                supported = %classification.supported,
                "Configuration applied"
            ),
            Err(e) => tracing::warn!(logger = %facade.name(), error = %e, "Configuration not applied"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendHandle, TracingBackend};
    use crate::facade::BindOptions;

    #[tokio::test]
    async fn test_apply_updates_rebuilds_facade() {
        let facade = Arc::new(Facade::new("watched"));
        facade
            .bind(
                BackendHandle::new(TracingBackend::default()),
                BindOptions::default().levels(["info"]).announce(false),
            )
            .unwrap();

        let (tx, rx) = mpsc::unbounded_channel();
        let config = LoggerConfig {
            levels: vec!["info".into(), "audit".into()],
            fallback: "info".into(),
            prefix: Some("[reloaded]".into()),
            announce: false,
            ..LoggerConfig::default()
        };
        tx.send(config).unwrap();
        drop(tx);

        apply_updates(facade.clone(), rx).await;

        assert_eq!(facade.prefix().as_deref(), Some("[reloaded]"));
        assert!(facade.supports("audit"));
        assert_eq!(facade.classification().fallback, Some("info".into()));
    }

    #[tokio::test]
    async fn test_watch_existing_file() {
        let path = std::env::temp_dir().join(format!("injected_logger_watch_{}.toml", std::process::id()));
        std::fs::write(&path, "prefix = \"[a]\"").unwrap();

        let (watcher, _rx) = ConfigWatcher::new(&path);
        let handle = watcher.run();
        assert!(handle.is_ok());

        drop(handle);
        std::fs::remove_file(&path).unwrap_or_default();
    }
}
