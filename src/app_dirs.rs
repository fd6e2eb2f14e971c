use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "bpchart")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("bpchart_config.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("bpchart");
            Some(state_dir.join("bpchart.log"))
        } else {
            ProjectDirs::from("", "", "bpchart")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("bpchart.log"))
        }
    }
}
