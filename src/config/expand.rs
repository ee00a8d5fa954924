// src/config/expand.rs

//! Glob expansion for `Include` directives

use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

/// Expand an `Include` pattern into the paths it names
///
/// Matches come back in the glob engine's sorted order. A pattern that matches
/// nothing is returned as-is, so a plain path that does not exist still
/// surfaces as an open failure when it is parsed instead of vanishing.
pub fn expand_include(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| Error::GlobPattern {
        pattern: pattern.to_string(),
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::GlobRead {
            pattern: pattern.to_string(),
            source: e,
        })?;
        paths.push(path);
    }

    if paths.is_empty() {
        debug!("Include pattern {} matched nothing, using it literally", pattern);
        paths.push(PathBuf::from(pattern));
    }

    Ok(paths)
}
