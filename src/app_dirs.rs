use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", "tock") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("tock_config.json")
        }
    }
}
