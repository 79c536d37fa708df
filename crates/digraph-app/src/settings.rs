//! Editor settings stored as JSON under the user's config directory.

use crate::error::AppError;
use digraph_graph::GridLayout;
use digraph_storage::OutputStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_DIR_NAME: &str = "digraph";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Where auto-placed nodes go.
    pub layout: GridLayout,
    /// Formatting of saved `.diag` files.
    pub output_style: OutputStyle,
}

impl EditorSettings {
    /// `<config dir>/digraph/settings.json`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|source| AppError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| AppError::SettingsFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An explicit path must exist; the default location may be absent, in
    /// which case the built-in defaults apply.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, AppError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                tracing::debug!("No settings file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let io_error = |source| AppError::SettingsIo {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|source| {
            AppError::SettingsFormat {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, content).map_err(io_error)
    }
}
