use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::clump::DEFAULT_WINDOW_MINUTES;
use crate::error::{ChartError, Result};
use crate::markers::DateMarkerGroup;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Largest gap, in minutes, between consecutive readings of one clump.
    pub window_minutes: i64,
    /// Extension of the export files to load.
    pub extension: String,
    pub systolic_baseline: f64,
    pub diastolic_baseline: f64,
    pub markers: Vec<DateMarkerGroup>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_minutes: DEFAULT_WINDOW_MINUTES,
            extension: "csv".to_string(),
            systolic_baseline: 120.0,
            diastolic_baseline: 70.0,
            markers: Vec::new(),
        }
    }
}

impl Config {
    /// The clumping window; fails for values chrono cannot represent.
    pub fn window(&self) -> Result<Duration> {
        Duration::try_minutes(self.window_minutes).ok_or_else(|| {
            ChartError::Config(format!(
                "window_minutes out of range, got {}",
                self.window_minutes
            ))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_minutes <= 0 {
            return Err(ChartError::Config(format!(
                "window_minutes must be positive, got {}",
                self.window_minutes
            )));
        }
        self.window()?;
        if self.extension.is_empty() {
            return Err(ChartError::Config("extension must not be empty".into()));
        }
        Ok(())
    }
}

pub trait ConfigStore {
    fn load(&self) -> Result<Config>;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// A missing file means defaults; an unreadable or malformed one is an error.
    fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let bytes = fs::read(&self.path).map_err(|source| ChartError::FileRead {
            path: self.path.clone(),
            source,
        })?;
        let cfg: Config = serde_json::from_slice(&bytes)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        assert_eq!(store.load().unwrap(), Config::default());
    }

    #[test]
    fn roundtrip_custom_config() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nested").join("config.json"));
        let cfg = Config {
            window_minutes: 90,
            extension: "txt".into(),
            systolic_baseline: 130.0,
            diastolic_baseline: 80.0,
            markers: vec![DateMarkerGroup::new(
                "Started Medication X",
                "purple",
                vec![NaiveDate::from_ymd_opt(2022, 6, 1).unwrap()],
            )],
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load().unwrap(), cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"window_minutes": 30}"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load().unwrap();
        assert_eq!(cfg.window_minutes, 30);
        assert_eq!(cfg.window().unwrap(), Duration::minutes(30));
        assert_eq!(cfg.extension, "csv");
        assert!(cfg.markers.is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert_matches!(
            FileConfigStore::with_path(&path).load(),
            Err(ChartError::ConfigParse(_))
        );
    }

    #[test]
    fn huge_window_rejected_instead_of_panicking() {
        let cfg = Config {
            window_minutes: i64::MAX,
            ..Config::default()
        };
        assert_matches!(cfg.window(), Err(ChartError::Config(_)));
        assert_matches!(cfg.validate(), Err(ChartError::Config(msg)) if msg.contains("out of range"));

        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"window_minutes": 200000000000000}"#).unwrap();
        assert_matches!(
            FileConfigStore::with_path(&path).load(),
            Err(ChartError::Config(_))
        );
    }

    #[test]
    fn non_positive_window_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"window_minutes": 0}"#).unwrap();
        assert_matches!(
            FileConfigStore::with_path(&path).load(),
            Err(ChartError::Config(_))
        );
    }
}
