#![deny(unsafe_code)]

use std::path::PathBuf;

use ledger_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported catalog {origin}: {message}")]
    UnsupportedSchema { origin: String, message: String },

    #[error("invalid catalog {origin}: {source}")]
    Invalid {
        origin: String,
        #[source]
        source: ModelError,
    },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
