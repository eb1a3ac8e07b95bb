use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Errors produced while loading maps, tilesets and config files.
#[derive(Debug, Error)]
pub enum Error {
    /// The input did not match what the decoder expects. The description
    /// names the offending field, value or structural expectation.
    #[error("{0}")]
    InvalidArgument(String),
    /// A file could not be read.
    #[error("{context}I/O error on {}: {source}", .path.display())]
    Io {
        /// Prefixes added while the error travelled up, empty at the origin.
        context: String,
        /// File that failed to open or read.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InvalidArgument`].
    InvalidArgument,
    /// See [`Error::Io`].
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidArgument => write!(f, "invalid argument"),
            ErrorKind::Io => write!(f, "i/o"),
        }
    }
}

/// Shorthand used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_argument(description: impl Into<String>) -> Self {
        Error::InvalidArgument(description.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            context: String::new(),
            path: path.into(),
            source,
        }
    }

    /// Kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    /// Prepends `prefix` to the description while keeping the kind.
    pub fn with_prefix(self, prefix: &str) -> Self {
        match self {
            Error::InvalidArgument(description) => {
                Error::InvalidArgument(format!("{prefix}{description}"))
            }
            Error::Io {
                context,
                path,
                source,
            } => Error::Io {
                context: format!("{prefix}{context}"),
                path,
                source,
            },
        }
    }
}
