// src/config/reader.rs

//! Sequential line reading over a single configuration file

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// An open configuration file, read one line at a time
pub struct LineReader {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
}

impl LineReader {
    /// Open `path` for reading
    pub fn open(path: &Path) -> Result<Self> {
        debug!("Opening config file: {}", path.display());

        let file = File::open(path).map_err(|e| Error::FileOpen {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            buf: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next line without its terminator, or `None` at end of file
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
    /// failing the read.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|e| Error::FileRead {
                path: self.path.clone(),
                source: e,
            })?;
        if read == 0 {
            return Ok(None);
        }

        let mut line = self.buf.as_slice();
        if let Some(rest) = line.strip_suffix(b"\n") {
            line = rest;
        }
        if let Some(rest) = line.strip_suffix(b"\r") {
            line = rest;
        }
        Ok(Some(String::from_utf8_lossy(line).into_owned()))
    }

    /// Read the remaining lines and close the file
    pub fn read_to_end(mut self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        while let Some(line) = self.next_line()? {
            lines.push(line);
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_lines_in_order() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[options]\r\nColor\n\nCheckSpace").unwrap();

        let mut reader = LineReader::open(file.path()).unwrap();
        assert_eq!(reader.path(), file.path());
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("[options]"));

        let rest = reader.read_to_end().unwrap();
        assert_eq!(rest, vec!["Color", "", "CheckSpace"]);
    }

    #[test]
    fn test_open_missing_file() {
        let result = LineReader::open(Path::new("/nonexistent/pacman.conf"));
        assert!(matches!(result, Err(Error::FileOpen { .. })));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"# Mirror in M\xfcnchen\nColor\n").unwrap();

        let lines = LineReader::open(file.path()).unwrap().read_to_end().unwrap();
        assert_eq!(lines, vec!["# Mirror in M\u{FFFD}nchen", "Color"]);
    }
}
