//! Editor settings persisted as JSON in the user's config directory.
//!
//! Every field is optional on disk; missing keys take their defaults so an
//! older or hand-edited file still loads.

use crate::constants::{GRID_SIZE, ZOOM_EAGERNESS_FACTOR, ZOOM_FACTOR};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

const APP_DIR: &str = "schemacanvas";
const SETTINGS_FILE: &str = "settings.json";

/// Errors from reading or writing the settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The temp file could not be moved over the settings file
    #[error("Failed to persist settings: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("No config directory available")]
    NoConfigDir,
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Round dragged table positions to the grid
    pub snap_to_grid: bool,
    pub grid_size: f64,
    /// Multiplier applied per ctrl+wheel step and per toolbar zoom
    pub zoom_factor: f64,
    /// How far ctrl+wheel zoom pulls the pan toward the cursor
    pub zoom_eagerness: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            snap_to_grid: true,
            grid_size: GRID_SIZE,
            zoom_factor: ZOOM_FACTOR,
            zoom_eagerness: ZOOM_EAGERNESS_FACTOR,
        }
    }
}

/// `<config_dir>/schemacanvas/settings.json`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
}

impl EditorSettings {
    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        match default_settings_path() {
            Some(path) => Self::load_or_default(&path),
            None => {
                warn!("No config directory, using default settings");
                Self::default()
            }
        }
    }

    /// Load from `path`, falling back to defaults if the file is missing or
    /// malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> SettingsResult<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save to the default location.
    pub fn save(&self) -> SettingsResult<()> {
        let path = default_settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Write atomically: serialize into a temp file beside `path`, then
    /// rename it over the target.
    pub fn save_to(&self, path: &Path) -> SettingsResult<()> {
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(self)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)?;

        debug!(path = %path.display(), "Settings saved");
        Ok(())
    }

    /// Grid spacing to snap to, or `None` when snapping is off or the grid
    /// is unusable.
    pub fn snap_grid(&self) -> Option<f64> {
        (self.snap_to_grid && self.grid_size.is_finite() && self.grid_size > 0.0)
            .then_some(self.grid_size)
    }
}
