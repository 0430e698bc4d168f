// std imports
use std::path::PathBuf;

/// Configuration directories of the application.
pub struct AppDirs {
    /// Directory for user configuration files.
    pub config_dir: PathBuf,
    /// Directories for system-wide configuration files.
    pub system_config_dirs: Vec<PathBuf>,
}

impl AppDirs {
    /// Returns `None` if the user configuration directory cannot be determined.
    pub fn new(name: &str) -> Option<Self> {
        let config_dir = sys::config_dir()?.join(name);
        let system_config_dirs = sys::system_config_dirs()
            .into_iter()
            .map(|d| d.join(name))
            .collect();
        Some(Self {
            config_dir,
            system_config_dirs,
        })
    }
}

#[cfg(target_os = "macos")]
mod sys {
    use super::*;
    use std::env;

    // XDG layout is preferred over ~/Library for a terminal tool.
    pub(crate) fn config_dir() -> Option<PathBuf> {
        env::var_os("XDG_CONFIG_HOME")
            .and_then(dirs_sys::is_absolute_path)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
    }

    pub(crate) fn system_config_dirs() -> Vec<PathBuf> {
        vec![PathBuf::from("/etc")]
    }
}

#[cfg(not(target_os = "macos"))]
mod sys {
    use super::*;

    pub(crate) fn config_dir() -> Option<PathBuf> {
        dirs::config_dir()
    }

    #[cfg(not(target_os = "windows"))]
    pub(crate) fn system_config_dirs() -> Vec<PathBuf> {
        vec![PathBuf::from("/etc")]
    }

    #[cfg(target_os = "windows")]
    pub(crate) fn system_config_dirs() -> Vec<PathBuf> {
        use known_folders::{KnownFolder, get_known_folder_path};

        get_known_folder_path(KnownFolder::ProgramData)
            .into_iter()
            .collect()
    }
}
