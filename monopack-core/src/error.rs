//! Error types and result aliases.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read manifest {location}: {message}")]
    Read { location: PathBuf, message: String },

    #[error("No package.json found in {0} or any parent directory")]
    ManifestNotFound(PathBuf),

    #[error("Invalid version '{0}': expected a semver-like version such as 1.2.3")]
    InvalidVersion(String),

    #[error("TOML parse error in {context}: {error}")]
    Toml {
        error: toml::de::Error,
        context: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::Toml {
            error,
            context: "monopack.toml".to_string(),
        }
    }
}

impl Error {
    pub(crate) fn read(location: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Read {
            location: location.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
