//! Application configuration.
//!
//! Read from a JSON file; every field is optional and missing ones take the
//! defaults below.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{CROP_JPEG_QUALITY, CROP_STAGE_HEIGHT, DEFAULT_DRIVE_URL};

const CONFIG_DIR_NAME: &str = "media-attach";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Opened by the "Open Google Drive" button
    pub drive_url: String,
    /// Height of the crop stage in CSS pixels
    pub crop_container_height: f64,
    /// 1..=100
    pub jpeg_quality: u8,
    pub window_width: f64,
    pub window_height: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            drive_url: DEFAULT_DRIVE_URL.to_string(),
            crop_container_height: CROP_STAGE_HEIGHT,
            jpeg_quality: CROP_JPEG_QUALITY,
            window_width: 1100.0,
            window_height: 820.0,
        }
    }
}

impl AppConfig {
    /// `<config_dir>/media-attach/config.json`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from an explicit path (which must exist) or from the default
    /// location (which may not).
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let config = match explicit {
            Some(path) => Self::load_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path)?,
                _ => Self::default(),
            },
        };
        Ok(config.sanitized())
    }

    fn load_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn sanitized(mut self) -> Self {
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        if !(self.crop_container_height > 0.0) {
            self.crop_container_height = CROP_STAGE_HEIGHT;
        }
        if self.drive_url.trim().is_empty() {
            self.drive_url = DEFAULT_DRIVE_URL.to_string();
        }
        self
    }
}
