//! Error types for chunksim.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, DigestError>;

/// Errors that can occur while digesting or dispatching files.
///
/// Checksums and comparison are total, so the only runtime failure of the
/// core is I/O. Everything else is configuration or a worker that died.
#[derive(Debug, Error)]
pub enum DigestError {
    /// An I/O error occurred while opening or reading input data.
    #[error("{}", io_message(.path.as_deref(), .source))]
    Io {
        /// The file being read, when known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// A worker thread panicked before reporting its result.
    #[error("worker thread panicked while digesting {}", .path.display())]
    WorkerPanicked {
        /// The file the worker was processing.
        path: PathBuf,
    },
}

fn io_message(path: Option<&Path>, source: &std::io::Error) -> String {
    match path {
        Some(path) => format!("io error on {}: {}", path.display(), source),
        None => format!("io error: {}", source),
    }
}

impl DigestError {
    /// Attaches a file path to an I/O error that does not carry one yet.
    pub fn with_path(self, path: impl AsRef<Path>) -> Self {
        match self {
            DigestError::Io { path: None, source } => DigestError::Io {
                path: Some(path.as_ref().to_path_buf()),
                source,
            },
            other => other,
        }
    }

    /// Returns the path this error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            DigestError::Io { path, .. } => path.as_deref(),
            DigestError::WorkerPanicked { path } => Some(path),
            DigestError::InvalidConfig { .. } => None,
        }
    }
}

impl From<std::io::Error> for DigestError {
    fn from(source: std::io::Error) -> Self {
        DigestError::Io { path: None, source }
    }
}
