//! Guard configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::GuardError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// File whose first line names the directory to start in
    pub lastdir_file: Option<PathBuf>,
    /// Read `lastdir_file` and change into its directory at startup
    pub relocate_on_startup: bool,
    /// Create the guarded session when started without file arguments
    pub open_on_startup: bool,
}

impl GuardConfig {
    pub fn new(cache_dir: Option<PathBuf>) -> Self {
        Self {
            lastdir_file: cache_dir.map(|d| d.join("lastdir")),
            relocate_on_startup: true,
            open_on_startup: true,
        }
    }

    pub fn cache_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|d| d.join("mainterm"))
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.lastdir_file {
            if path.as_os_str().is_empty() {
                return Err(GuardError::Config("lastdir file path is empty".to_string()));
            }
            if path.is_dir() {
                return Err(GuardError::Config(format!(
                    "lastdir file {} is a directory",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self::new(Self::cache_dir())
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn cache_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Caches"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_CACHE_HOME")
                .ok()
                .filter(|d| !d.is_empty())
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".cache"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_places_lastdir_in_cache_dir() {
        let config = GuardConfig::new(Some(PathBuf::from("/tmp/cache/mainterm")));
        assert_eq!(
            config.lastdir_file,
            Some(PathBuf::from("/tmp/cache/mainterm/lastdir"))
        );
        assert!(config.relocate_on_startup);
        assert!(config.open_on_startup);

        assert_eq!(GuardConfig::new(None).lastdir_file, None);
    }

    #[test]
    fn test_validate_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GuardConfig::new(None);
        assert!(config.validate().is_ok());

        config.lastdir_file = Some(dir.path().to_path_buf());
        assert!(matches!(config.validate(), Err(GuardError::Config(_))));

        config.lastdir_file = Some(dir.path().join("lastdir"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serde() {
        let config = GuardConfig::new(Some(PathBuf::from("/c")));
        let json = serde_json::to_string(&config).unwrap();
        let back: GuardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
