//! Startup errors
//!
//! Gameplay itself never fails; only loading tuning/level data can.

use std::fmt;
use std::path::PathBuf;

/// Failure to load tuning or level data
#[derive(Debug)]
pub enum LoadError {
    /// File could not be read
    Io { path: PathBuf, source: std::io::Error },
    /// JSON did not parse into the expected shape
    Parse(serde_json::Error),
    /// Parsed fine but describes an unusable layout
    Invalid(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => write!(f, "failed to read {}: {}", path.display(), source),
            LoadError::Parse(e) => write!(f, "failed to parse: {}", e),
            LoadError::Invalid(msg) => write!(f, "invalid data: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse(e) => Some(e),
            LoadError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Parse(e)
    }
}

/// Read a whole file, tagging failures with the path
pub(crate) fn read_file(path: &std::path::Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
