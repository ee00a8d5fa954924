// src/config/parser.rs

//! Section parser for pacman.conf
//!
//! Lines are scanned in order. A `[section]` header switches between the
//! global `[options]` table and repository sections. `Include` inside a
//! repository re-enters the parser on every file the pattern expands to,
//! sharing the same state, so servers listed in a mirrorlist land in the
//! repository that was open when the `Include` was read.

use super::expand::expand_include;
use super::reader::LineReader;
use super::text::{section_name, split_key_value, split_words, strip_comment};
use super::{PacmanConfig, Repository, SigLevel};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Name of the section holding global settings
pub const OPTIONS_SECTION: &str = "options";

/// Value used for `Architecture = auto`
pub const AUTO_ARCHITECTURE: &str = "x86_64";

/// State threaded through a parse and every file it includes
#[derive(Debug, Default)]
pub struct ParseState {
    /// Name of the most recent section header, if any
    section: Option<String>,
    /// Index into `PacmanConfig::repos` of the open repository section
    current_repo: Option<usize>,
    /// Canonical paths of the files currently being parsed, outermost first
    include_stack: Vec<PathBuf>,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    fn enter_section(&mut self, config: &mut PacmanConfig, name: &str) {
        debug!("Entering section [{}]", name);
        self.section = Some(name.to_string());

        if name == OPTIONS_SECTION {
            self.current_repo = None;
        } else {
            // Snapshot of the global level as configured so far
            config.repos.push(Repository::new(name, config.sig_level));
            self.current_repo = Some(config.repos.len() - 1);
        }
    }
}

/// Where a key was read, for error messages
#[derive(Debug, Clone, Copy)]
struct Location<'a> {
    path: &'a Path,
    line: usize,
}

/// Parse one file into `config`, recursing into its includes
pub fn parse_file(config: &mut PacmanConfig, path: &Path, state: &mut ParseState) -> Result<()> {
    // The whole file is read and closed before any include is followed
    let lines = LineReader::open(path)?.read_to_end()?;

    let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if state.include_stack.contains(&canonical) {
        return Err(Error::IncludeCycle { path: canonical });
    }

    state.include_stack.push(canonical);
    let result = parse_lines(config, path, &lines, state);
    state.include_stack.pop();
    result
}

fn parse_lines(
    config: &mut PacmanConfig,
    path: &Path,
    lines: &[String],
    state: &mut ParseState,
) -> Result<()> {
    for (index, raw) in lines.iter().enumerate() {
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }

        if let Some(name) = section_name(line) {
            state.enter_section(config, name);
            continue;
        }

        let (key, value) = split_key_value(line);
        let location = Location {
            path,
            line: index + 1,
        };

        if state.section.as_deref() == Some(OPTIONS_SECTION) {
            apply_option(config, key, value, location)?;
        } else if let Some(repo) = state.current_repo {
            apply_repo_option(config, state, repo, key, value)?;
        } else {
            debug!(
                "{}:{}: ignoring '{}' outside of any section",
                path.display(),
                location.line,
                key
            );
        }
    }

    Ok(())
}

/// Handle a key from the `[options]` section
fn apply_option(config: &mut PacmanConfig, key: &str, value: &str, at: Location<'_>) -> Result<()> {
    match key {
        "RootDir" => config.root_dir = PathBuf::from(value),
        "DBPath" => config.db_path = PathBuf::from(value),
        "LogFile" => config.log_file = PathBuf::from(value),
        "GPGDir" => config.gpg_dir = PathBuf::from(value),
        // Search paths extend the built-in defaults instead of replacing them
        "CacheDir" => config.cache_dirs.extend(split_words(value)),
        "HookDir" => config.hook_dirs.extend(split_words(value)),
        "HoldPkg" => config.hold_pkg = split_words(value),
        "IgnorePkg" => config.ignore_pkg = split_words(value),
        "IgnoreGroup" => config.ignore_group = split_words(value),
        "Architecture" => {
            config.architecture = if value == "auto" {
                vec![AUTO_ARCHITECTURE.to_string()]
            } else {
                split_words(value)
            }
        }
        "XferCommand" => config.xfer_command = value.to_string(),
        "NoUpgrade" => config.no_upgrade = split_words(value),
        "NoExtract" => config.no_extract = split_words(value),
        "CleanMethod" => config.clean_method = split_words(value),
        "SigLevel" => config.sig_level = SigLevel::decode(value),
        "LocalFileSigLevel" => config.local_file_sig_level = SigLevel::decode(value),
        "RemoteFileSigLevel" => config.remote_file_sig_level = SigLevel::decode(value),
        "DownloadUser" => config.download_user = Some(value.to_string()),
        "UseSyslog" => config.use_syslog = true,
        "Color" => config.color = true,
        "TotalDownload" => config.total_download = true,
        "CheckSpace" => config.check_space = true,
        "VerbosePkgLists" => config.verbose_pkg_lists = true,
        "DisableDownloadTimeout" => config.disable_download_timeout = true,
        "DisableSandbox" => config.disable_sandbox = true,
        "ILoveCandy" => config.chomp = true,
        "UseDelta" if !value.is_empty() => config.use_delta = parse_number(key, value, at)?,
        "ParallelDownloads" if !value.is_empty() => {
            config.parallel_downloads = parse_number(key, value, at)?
        }
        "UseDelta" | "ParallelDownloads" => {}
        _ => debug!(
            "{}:{}: ignoring unknown option '{}'",
            at.path.display(),
            at.line,
            key
        ),
    }

    Ok(())
}

/// Handle a key from a repository section
fn apply_repo_option(
    config: &mut PacmanConfig,
    state: &mut ParseState,
    repo: usize,
    key: &str,
    value: &str,
) -> Result<()> {
    match key {
        "Server" => config.repos[repo].servers.push(value.to_string()),
        "Include" => {
            for path in expand_include(value)? {
                debug!("Including {} into [{}]", path.display(), config.repos[repo].name);
                parse_file(config, &path, state)?;
            }
        }
        "SigLevel" => config.repos[repo].sig_level = SigLevel::decode(value),
        "Usage" => config.repos[repo].usage = split_words(value),
        _ => debug!("Ignoring unknown key '{}' in [{}]", key, config.repos[repo].name),
    }

    Ok(())
}

fn parse_number<T: FromStr>(key: &str, value: &str, at: Location<'_>) -> Result<T> {
    value.parse().map_err(|_| Error::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
        path: at.path.to_path_buf(),
        line: at.line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(content: &str) -> Result<PacmanConfig> {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let mut config = PacmanConfig::default();
        let mut state = ParseState::new();
        parse_file(&mut config, file.path(), &mut state)?;
        Ok(config)
    }

    #[test]
    fn test_padded_header_is_a_repository() {
        let config = parse("[ options ]\nColor\n").unwrap();
        assert!(!config.color);
        assert_eq!(config.repos.len(), 1);
        assert_eq!(config.repos[0].name, " options ");
    }

    #[test]
    fn test_lines_before_any_section_are_ignored() {
        let config = parse("RootDir = /mnt\nServer = http://x\n").unwrap();
        assert_eq!(config.root_dir, PathBuf::from("/"));
        assert!(config.repos.is_empty());
    }

    #[test]
    fn test_repository_snapshots_global_siglevel() {
        let config = parse(
            "[options]\nSigLevel = Required\n[core]\n[options]\nSigLevel = Never\n[extra]\n",
        )
        .unwrap();

        assert_eq!(config.repos[0].sig_level, SigLevel::decode("Required"));
        assert_eq!(config.repos[1].sig_level, SigLevel::empty());
        assert_eq!(config.sig_level, SigLevel::empty());
    }

    #[test]
    fn test_repository_before_any_siglevel_uses_default() {
        let config = parse("[core]\nServer = http://x\n").unwrap();
        assert_eq!(config.repos[0].sig_level, SigLevel::USE_DEFAULT);
    }

    #[test]
    fn test_usage_is_replaced() {
        let config = parse("[core]\nUsage = Sync\nUsage = Search Install\n").unwrap();
        assert_eq!(config.repos[0].usage, vec!["Search", "Install"]);
    }

    #[test]
    fn test_empty_numeric_value_is_ignored() {
        let config = parse("[options]\nParallelDownloads\nUseDelta =\n").unwrap();
        assert_eq!(config.parallel_downloads, 1);
        assert_eq!(config.use_delta, 0.0);
    }

    #[test]
    fn test_invalid_number_reports_location() {
        let err = parse("[options]\n\nParallelDownloads = many\n").unwrap_err();
        match err {
            Error::InvalidNumber { key, value, line, .. } => {
                assert_eq!(key, "ParallelDownloads");
                assert_eq!(value, "many");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_float() {
        let err = parse("[options]\nUseDelta = 0.7x\n").unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { .. }));
    }
}
