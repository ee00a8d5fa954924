// src/config/mod.rs

//! pacman.conf resolution
//!
//! This module turns a pacman-style configuration file into a
//! [`PacmanConfig`]:
//! - Global settings from the `[options]` section
//! - One [`Repository`] per other section, in file order
//! - `Include` directives expanded through glob patterns
//! - Signature levels decoded into [`SigLevel`] bitmasks

mod expand;
mod parser;
mod reader;
mod siglevel;
mod text;
mod usage;

pub use expand::expand_include;
pub use parser::{AUTO_ARCHITECTURE, OPTIONS_SECTION};
pub use reader::LineReader;
pub use siglevel::SigLevel;
pub use usage::DbUsage;

use crate::error::Result;
use parser::ParseState;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Location of the system configuration file
pub const DEFAULT_CONFIG_FILE: &str = "/etc/pacman.conf";

/// A sync repository declared by a `[name]` section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Repository {
    pub name: String,
    /// Every `Server` line, including those reached through `Include`
    pub servers: Vec<String>,
    pub sig_level: SigLevel,
    /// Words of the last `Usage` line, empty if there was none
    pub usage: Vec<String>,
}

impl Repository {
    /// Create an empty repository with the given signature level
    pub fn new(name: &str, sig_level: SigLevel) -> Self {
        Self {
            name: name.to_string(),
            servers: Vec::new(),
            sig_level,
            usage: Vec::new(),
        }
    }

    pub fn usage_flags(&self) -> DbUsage {
        DbUsage::from_words(&self.usage)
    }
}

/// Fully resolved pacman configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PacmanConfig {
    pub root_dir: PathBuf,
    pub db_path: PathBuf,
    pub cache_dirs: Vec<String>,
    pub hook_dirs: Vec<String>,
    pub gpg_dir: PathBuf,
    pub log_file: PathBuf,
    pub hold_pkg: Vec<String>,
    pub ignore_pkg: Vec<String>,
    pub ignore_group: Vec<String>,
    pub architecture: Vec<String>,
    pub xfer_command: String,
    pub no_upgrade: Vec<String>,
    pub no_extract: Vec<String>,
    pub clean_method: Vec<String>,
    pub sig_level: SigLevel,
    pub local_file_sig_level: SigLevel,
    pub remote_file_sig_level: SigLevel,
    pub download_user: Option<String>,
    pub use_syslog: bool,
    pub color: bool,
    pub use_delta: f64,
    pub total_download: bool,
    pub check_space: bool,
    pub verbose_pkg_lists: bool,
    pub disable_download_timeout: bool,
    pub parallel_downloads: u32,
    pub disable_sandbox: bool,
    /// `ILoveCandy`
    pub chomp: bool,
    pub repos: Vec<Repository>,
}

impl Default for PacmanConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("/"),
            db_path: PathBuf::from("/var/lib/pacman/"),
            cache_dirs: vec!["/var/cache/pacman/pkg/".to_string()],
            hook_dirs: vec![
                "/usr/share/libalpm/hooks/".to_string(),
                "/etc/pacman.d/hooks/".to_string(),
            ],
            gpg_dir: PathBuf::from("/etc/pacman.d/gnupg/"),
            log_file: PathBuf::from("/var/log/pacman.log"),
            hold_pkg: Vec::new(),
            ignore_pkg: Vec::new(),
            ignore_group: Vec::new(),
            architecture: Vec::new(),
            xfer_command: String::new(),
            no_upgrade: Vec::new(),
            no_extract: Vec::new(),
            clean_method: Vec::new(),
            sig_level: SigLevel::USE_DEFAULT,
            local_file_sig_level: SigLevel::USE_DEFAULT,
            remote_file_sig_level: SigLevel::USE_DEFAULT,
            download_user: None,
            use_syslog: false,
            color: false,
            use_delta: 0.0,
            total_download: false,
            check_space: false,
            verbose_pkg_lists: false,
            disable_download_timeout: false,
            parallel_downloads: 1,
            disable_sandbox: false,
            chomp: false,
            repos: Vec::new(),
        }
    }
}

impl PacmanConfig {
    /// Resolve a configuration file and everything it includes
    ///
    /// Every call reads the filesystem afresh. On failure no configuration is
    /// returned at all.
    pub fn parse_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = PacmanConfig::default();
        let mut state = ParseState::new();

        parser::parse_file(&mut config, path, &mut state)?;

        info!(
            "Resolved {} with {} repositories",
            path.display(),
            config.repos.len()
        );
        Ok(config)
    }

    /// Look up a repository by section name
    pub fn repo(&self, name: &str) -> Option<&Repository> {
        self.repos.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PacmanConfig::default();
        assert_eq!(config.root_dir, PathBuf::from("/"));
        assert_eq!(config.db_path, PathBuf::from("/var/lib/pacman/"));
        assert_eq!(config.cache_dirs, vec!["/var/cache/pacman/pkg/"]);
        assert_eq!(config.hook_dirs.len(), 2);
        assert_eq!(config.parallel_downloads, 1);
        assert_eq!(config.sig_level, SigLevel::USE_DEFAULT);
        assert!(config.download_user.is_none());
        assert!(config.repos.is_empty());
    }

    #[test]
    fn test_repository_usage_flags() {
        let mut repo = Repository::new("core", SigLevel::USE_DEFAULT);
        assert_eq!(repo.usage_flags(), DbUsage::ALL);

        repo.usage = vec!["Sync".to_string(), "Upgrade".to_string()];
        assert_eq!(repo.usage_flags(), DbUsage::SYNC | DbUsage::UPGRADE);
    }

    #[test]
    fn test_repo_lookup() {
        let mut config = PacmanConfig::default();
        config.repos.push(Repository::new("extra", SigLevel::empty()));
        assert!(config.repo("extra").is_some());
        assert!(config.repo("core").is_none());
    }
}
