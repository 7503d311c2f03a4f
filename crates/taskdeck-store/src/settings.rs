//! Observable store for locally persisted UI preferences.
//!
//! State lives in a watch channel: readers either take a snapshot with
//! [`SettingsStore::get`] or subscribe for change notifications.
//! Persistence is a single JSON document under the platform config
//! directory. A missing or corrupt file falls back to defaults; losing
//! UI preferences is not worth failing startup over, so load errors are
//! logged rather than returned.

use std::path::{Path, PathBuf};

use tokio::sync::watch;
use tracing::{debug, warn};

use taskdeck_core::settings::UiSettings;
use taskdeck_core::{TaskdeckError, TaskdeckResult};

const SETTINGS_FILE: &str = "settings.json";

/// Owned container for UI settings with subscribe/notify semantics.
pub struct SettingsStore {
    path: PathBuf,
    state: watch::Sender<UiSettings>,
}

impl SettingsStore {
    /// Create a store persisting under the platform config directory.
    pub fn new() -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("taskdeck");
        Self::with_path(dir.join(SETTINGS_FILE))
    }

    /// Create a store persisting at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let (state, _) = watch::channel(UiSettings::default());
        Self {
            path: path.into(),
            state,
        }
    }

    /// Where this store persists its settings.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the current settings.
    pub fn get(&self) -> UiSettings {
        self.state.borrow().clone()
    }

    /// Subscribe to settings changes.
    pub fn subscribe(&self) -> watch::Receiver<UiSettings> {
        self.state.subscribe()
    }

    /// Apply a change and notify subscribers.
    pub fn update(&self, change: impl FnOnce(&mut UiSettings)) {
        self.state.send_modify(change);
    }

    /// Load persisted settings, falling back to defaults on any failure.
    pub fn load(&self) {
        let loaded = match std::fs::read_to_string(&self.path) {
            Ok(text) => match serde_json::from_str::<UiSettings>(&text) {
                Ok(settings) => settings,
                Err(error) => {
                    warn!(path = %self.path.display(), error = %error, "corrupt settings file, using defaults");
                    UiSettings::default()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file yet, using defaults");
                UiSettings::default()
            }
            Err(error) => {
                warn!(path = %self.path.display(), error = %error, "failed to read settings, using defaults");
                UiSettings::default()
            }
        };
        self.state.send_replace(loaded);
    }

    /// Persist the current settings.
    pub fn save(&self) -> TaskdeckResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TaskdeckError::storage(format!(
                    "failed to create {}: {e}",
                    parent.display()
                ))
            })?;
        }
        let snapshot = self.get();
        let text = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| TaskdeckError::storage(format!("failed to encode settings: {e}")))?;
        std::fs::write(&self.path, text).map_err(|e| {
            TaskdeckError::storage(format!(
                "failed to write {}: {e}",
                self.path.display()
            ))
        })
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}
