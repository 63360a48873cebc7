//! Error types for kinetika-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for kinetika-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or saving Kinetika configuration.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Configuration is missing, malformed, or cannot be located.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error, optionally tied to the file that caused it.
    #[error("I/O error{}: {source}", path_suffix(.path))]
    Io {
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
        /// File the operation was acting on, if known
        path: Option<PathBuf>,
    },

    /// A value failed validation.
    #[error("Validation error: {message}")]
    Validation {
        /// Field or aspect that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error together with the path being accessed.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            source,
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" at {}", p.display()))
        .unwrap_or_default()
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source, path: None }
    }
}
