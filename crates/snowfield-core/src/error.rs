use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preferences I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML preferences: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to encode preferences as TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("invalid JSON preferences: {0}")]
    Json(#[from] serde_json::Error),
}

impl PrefsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
