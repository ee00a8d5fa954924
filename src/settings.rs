// src/settings.rs

//! Run-time settings layered over the resolved pacman.conf

use crate::config::{DEFAULT_CONFIG_FILE, PacmanConfig};
use crate::error::Result;
use std::path::PathBuf;
use tracing::debug;

/// Where to read the configuration from, and what to override afterwards
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_file: PathBuf,
    pub verbose: bool,
    /// Replaces `RootDir` from the file when set
    pub root_dir: Option<PathBuf>,
    /// Replaces `DBPath` from the file when set
    pub db_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            verbose: false,
            root_dir: None,
            db_path: None,
        }
    }
}

impl Settings {
    /// Default log filter when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }

    /// Resolve the configuration file, then apply the overrides
    pub fn load(&self) -> Result<PacmanConfig> {
        let mut config = PacmanConfig::parse_from_file(&self.config_file)?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut PacmanConfig) {
        if let Some(root) = &self.root_dir {
            debug!("Overriding RootDir with {}", root.display());
            config.root_dir = root.clone();
        }
        if let Some(db_path) = &self.db_path {
            debug!("Overriding DBPath with {}", db_path.display());
            config.db_path = db_path.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_points_at_system_config() {
        let settings = Settings::default();
        assert_eq!(settings.config_file, PathBuf::from("/etc/pacman.conf"));
        assert!(!settings.verbose);
    }

    #[test]
    fn test_log_filter_follows_verbose() {
        assert_eq!(Settings::default().log_filter(), "warn");

        let settings = Settings {
            verbose: true,
            ..Settings::default()
        };
        assert_eq!(settings.log_filter(), "debug");
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[options]\nRootDir = /mnt\nDBPath = /mnt/db\nColor").unwrap();

        let settings = Settings {
            config_file: file.path().to_path_buf(),
            root_dir: Some(PathBuf::from("/chroot")),
            ..Settings::default()
        };
        let config = settings.load().unwrap();

        assert_eq!(config.root_dir, PathBuf::from("/chroot"));
        assert_eq!(config.db_path, PathBuf::from("/mnt/db"));
        assert!(config.color);
    }

    #[test]
    fn test_missing_config_file() {
        let settings = Settings {
            config_file: PathBuf::from("/nonexistent/pacman.conf"),
            ..Settings::default()
        };
        assert!(matches!(settings.load(), Err(Error::FileOpen { .. })));
    }
}
