use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("diff error: {0}")]
    Diff(#[from] nd_diff::DiffError),

    #[error("invalid key: {0}")]
    Key(#[from] nd_types::TypeError),

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
