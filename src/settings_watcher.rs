//! Hot reload of the settings file.
//!
//! Watches the directory holding the settings file rather than the file
//! itself: atomic saves replace the file, which would orphan a watch on the
//! old inode. Events for other files in the directory are dropped.

use crate::settings::EditorSettings;
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use tracing::{debug, warn};

pub use crate::settings::default_settings_path;

#[derive(Clone, Debug, PartialEq)]
pub enum SettingsEvent {
    /// The file was created or modified and parsed cleanly
    Changed(EditorSettings),
    Removed,
    /// The file changed but could not be read or parsed
    Error(String),
}

pub struct SettingsWatcher {
    path: PathBuf,
    rx: Receiver<notify::Result<Event>>,
    // Dropping the watcher stops the OS watch
    _watcher: RecommendedWatcher,
}

impl std::fmt::Debug for SettingsWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsWatcher")
            .field("path", &self.path)
            .finish()
    }
}

impl SettingsWatcher {
    pub fn new(path: PathBuf) -> Result<Self> {
        let dir = path
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            // Receiver gone means the watcher is being dropped
            let _ = tx.send(res);
        })
        .context("Failed to create settings file watcher")?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;

        debug!(path = %path.display(), "Watching settings file");
        Ok(Self {
            path,
            rx,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain pending file events and report the latest relevant one.
    /// Never blocks.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        let mut latest = None;
        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => {
                    if let Some(kind) = self.classify(&event) {
                        latest = Some(kind);
                    }
                }
                Ok(Err(e)) => latest = Some(Change::Failed(e.to_string())),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("Settings watcher channel closed");
                    break;
                }
            }
        }

        latest.map(|change| match change {
            Change::Written => match EditorSettings::load_from(&self.path) {
                Ok(settings) => SettingsEvent::Changed(settings),
                Err(e) => SettingsEvent::Error(e.to_string()),
            },
            Change::Removed => SettingsEvent::Removed,
            Change::Failed(e) => SettingsEvent::Error(e),
        })
    }

    fn classify(&self, event: &Event) -> Option<Change> {
        if !event.paths.iter().any(|p| p.file_name() == self.path.file_name()) {
            return None;
        }
        match event.kind {
            EventKind::Create(_) | EventKind::Modify(_) => {
                // A rename away from the path shows up as a modify; treat a
                // vanished file as removed.
                if self.path.exists() {
                    Some(Change::Written)
                } else {
                    Some(Change::Removed)
                }
            }
            EventKind::Remove(_) => Some(Change::Removed),
            _ => None,
        }
    }
}

enum Change {
    Written,
    Removed,
    Failed(String),
}
