use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::PrepVistaError;
use crate::devices::DevicePermissions;

const CONFIG_DIR_NAME: &str = "prepvista";
const CONFIG_FILE_NAME: &str = "config.json";

pub const AUTH_DELAY_MS: u64 = 1000;
pub const ANALYSIS_DELAY_MS: u64 = 3000;
pub const MAX_RECORDING_S: u64 = 300;
pub const METRICS_REFRESH_MS: u64 = 2000;

/// Durations of every simulated wait in the application.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Timings {
    pub auth_delay_ms: u64,
    pub resume_analysis_ms: u64,
    pub video_analysis_ms: u64,
    pub max_recording_s: u64,
    pub metrics_refresh_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            auth_delay_ms: AUTH_DELAY_MS,
            resume_analysis_ms: ANALYSIS_DELAY_MS,
            video_analysis_ms: ANALYSIS_DELAY_MS,
            max_recording_s: MAX_RECORDING_S,
            metrics_refresh_ms: METRICS_REFRESH_MS,
        }
    }
}

impl Timings {
    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth_delay_ms)
    }

    pub fn resume_analysis(&self) -> Duration {
        Duration::from_millis(self.resume_analysis_ms)
    }

    pub fn video_analysis(&self) -> Duration {
        Duration::from_millis(self.video_analysis_ms)
    }

    pub fn metrics_refresh(&self) -> Duration {
        Duration::from_millis(self.metrics_refresh_ms)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1280.,
            height: 800.,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub window_size: WindowSize,
    pub sidebar_collapsed: bool,
    pub timings: Timings,
    pub device_permissions: DevicePermissions,
    /// Seed for the metric jitter. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_size: WindowSize::default(),
            sidebar_collapsed: false,
            timings: Timings::default(),
            device_permissions: DevicePermissions::default(),
            rng_seed: None,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Result<PathBuf, PrepVistaError> {
        Ok(dirs::config_dir()
            .ok_or(PrepVistaError::NoConfigDir)?
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    }

    pub fn from_local_file() -> Option<Self> {
        let config_path = Self::default_path().ok()?;
        Self::from_path(&config_path)
    }

    /// Reads a config file. A missing or unreadable file yields `None`, the caller
    /// falls back to defaults.
    pub fn from_path(config_path: &Path) -> Option<Self> {
        if !config_path.exists() {
            debug!("No config file at {}", config_path.display());
            return None;
        }
        let file = std::fs::File::open(config_path)
            .map_err(|e| error!("Could not open config file: {}", e))
            .ok()?;
        serde_json::from_reader(file)
            .map_err(|e| error!("Could not parse config file: {}", e))
            .ok()
    }

    /// Copy with command line overrides applied. The overrides last for one run
    /// and are never written back.
    pub fn with_overrides(
        &self,
        seed: Option<u64>,
        deny_camera: bool,
        deny_microphone: bool,
    ) -> AppConfig {
        let mut config = self.clone();
        if seed.is_some() {
            config.rng_seed = seed;
        }
        if deny_camera {
            config.device_permissions.camera = false;
        }
        if deny_microphone {
            config.device_permissions.microphone = false;
        }
        config
    }

    pub fn save(&self) -> Result<(), PrepVistaError> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), PrepVistaError> {
        if let Some(parent) = config_path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| PrepVistaError::ConfigIOError { source: e })?;
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| PrepVistaError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| PrepVistaError::ConfigSerializeError { source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let config = AppConfig {
            sidebar_collapsed: true,
            rng_seed: Some(7),
            device_permissions: DevicePermissions {
                camera: false,
                microphone: true,
            },
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::from_path(&path), Some(config));
    }

    #[test]
    fn test_overrides_are_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let stored = AppConfig {
            rng_seed: Some(3),
            ..Default::default()
        };

        let launched = stored.with_overrides(Some(99), true, true);
        assert_eq!(launched.rng_seed, Some(99));
        assert!(!launched.device_permissions.camera);
        assert!(!launched.device_permissions.microphone);

        stored.save_to(&path).unwrap();
        let reloaded = AppConfig::from_path(&path).unwrap();
        assert_eq!(reloaded.rng_seed, Some(3));
        assert_eq!(reloaded.device_permissions, DevicePermissions::default());
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let stored = AppConfig {
            rng_seed: Some(3),
            ..Default::default()
        };
        assert_eq!(stored.with_overrides(None, false, false), stored);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"sidebar_collapsed": true, "timings": {"auth_delay_ms": 5}}"#)
            .unwrap();

        let config = AppConfig::from_path(&path).unwrap();
        assert!(config.sidebar_collapsed);
        assert_eq!(config.timings.auth_delay_ms, 5);
        assert_eq!(config.timings.resume_analysis_ms, ANALYSIS_DELAY_MS);
        assert_eq!(config.device_permissions, DevicePermissions::default());
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "not json").unwrap();
        assert!(AppConfig::from_path(&path).is_none());
    }
}
