/// Gallery configuration
///
/// All fields have defaults, so an empty JSON object (or no file at all)
/// yields a working configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Application identifier, used as the data directory name
    pub app_id: String,
    /// Preferences key holding the serialized photo list
    pub storage_key: String,
    /// Preferences namespace
    pub storage_group: String,
    /// Extension appended to generated photo filenames
    pub file_extension: String,
    /// Capture quality (0-100)
    pub quality: u8,
    /// Origin that serves native files to the web view
    pub server_url: String,
    /// Overrides the per-user data directory
    pub data_dir: Option<PathBuf>,
    /// Forces hybrid (`true`) or browser (`false`) behavior instead of detecting it
    pub hybrid: Option<bool>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            app_id: "io.ionic.starter".to_string(),
            storage_key: "photos".to_string(),
            storage_group: "CapacitorStorage".to_string(),
            file_extension: "jpeg".to_string(),
            quality: 100,
            server_url: "http://localhost".to_string(),
            data_dir: None,
            hybrid: None,
        }
    }
}

impl GalleryConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Root of the app-private storage area.
    ///
    /// Unless `data_dir` is set, this is the user's data directory joined
    /// with the app id:
    /// - Linux: ~/.local/share/<app_id>
    /// - macOS: ~/Library/Application Support/<app_id>
    /// - Windows: %APPDATA%\<app_id>
    pub fn data_root(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or(ConfigError::NoDataDir)?;
        path.push(&self.app_id);
        Ok(path)
    }

    /// Path of the preferences database inside the data root.
    pub fn preferences_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.data_root()?.join("preferences.db"))
    }

    /// Quality clamped to the 0-100 range accepted by the camera.
    pub fn capture_quality(&self) -> u8 {
        self.quality.min(100)
    }
}
