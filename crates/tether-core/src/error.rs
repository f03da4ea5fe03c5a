//! Error types for config generation and merging.
//!
//! Every failure the core can produce is one variant of [`Error`]. Callers
//! processing a batch of apps decide per variant whether to skip the app or
//! abort; the core never retries and never swallows an error.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::client_config::ConfigFormat;

/// Result alias used throughout `tether-core`.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A config document exists and is non-empty but does not parse under its format.
    ///
    /// `path` is `None` when the text did not come from a file (e.g. a preview).
    #[error("Failed to parse {format} config{}: {message}", display_path(.path))]
    Parse {
        path: Option<PathBuf>,
        format: ConfigFormat,
        message: String,
    },

    /// A canonical server config is missing `command`/`url` or carries invalid values.
    #[error("Invalid server config: {reason}")]
    InvalidConfig { reason: String },

    /// A document could not be rendered in the requested format.
    #[error("Failed to serialize {format} config: {message}")]
    Serialize {
        format: ConfigFormat,
        message: String,
    },

    /// Reading or writing a config file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No generator is registered under the requested app id.
    #[error("Unknown app '{id}'")]
    UnknownApp { id: String },
}

impl Error {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Attach a file path to a parse error raised on in-memory text.
    pub(crate) fn with_path(self, file: &Path) -> Self {
        match self {
            Error::Parse {
                path: None,
                format,
                message,
            } => Error::Parse {
                path: Some(file.to_path_buf()),
                format,
                message,
            },
            other => other,
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Error::InvalidConfig { .. })
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" at {}", path.display()),
        None => String::new(),
    }
}
