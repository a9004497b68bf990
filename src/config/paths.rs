//! Platform-specific configuration and model paths.

use crate::constants::APP_NAME;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME).ok_or(Error::ConfigDirNotFound)
}

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/runview/`
/// - macOS: `~/Library/Application Support/runview/`
/// - Windows: `%APPDATA%\runview\`
pub fn config_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Get the full path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Directory where `config init` points the CLIP model files.
///
/// Linux: `~/.local/share/runview/models/clip/`
pub fn model_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().join("models").join("clip"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_path_is_under_app_dir() {
        let path = config_file_path().unwrap();
        assert!(path.to_string_lossy().contains("runview"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_model_dir_is_separate_from_config() {
        let models = model_dir().unwrap();
        assert!(models.ends_with("models/clip"));
    }
}
