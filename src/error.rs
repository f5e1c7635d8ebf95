//! Startup failures. Everything that can go wrong inside the frame loop is a
//! normal outcome, so this is the only error type the library exposes.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ResourceError {
    /// The file does not exist.
    Missing { path: PathBuf, source: io::Error },
    /// The file exists but could not be read.
    Unreadable { path: PathBuf, source: io::Error },
    /// The word list contained nothing but blank lines.
    EmptyWordList { path: PathBuf },
    /// The config file is not valid RON for `GameConfig`.
    InvalidConfig { path: PathBuf, message: String },
}

impl ResourceError {
    pub(crate) fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            ResourceError::Missing { path, source }
        } else {
            ResourceError::Unreadable { path, source }
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            ResourceError::Missing { path, .. }
            | ResourceError::Unreadable { path, .. }
            | ResourceError::EmptyWordList { path }
            | ResourceError::InvalidConfig { path, .. } => path,
        }
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Missing { path, .. } => {
                write!(f, "resource not found: {}", path.display())
            }
            ResourceError::Unreadable { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            ResourceError::EmptyWordList { path } => {
                write!(f, "word list {} has no words", path.display())
            }
            ResourceError::InvalidConfig { path, message } => {
                write!(f, "invalid config {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::Missing { source, .. } | ResourceError::Unreadable { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}
