use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures outside of delivery: reading inputs and resolving settings.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read `{}`: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse run report `{}`: {source}", path.display())]
    ParseReport {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse config file `{}`: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing required setting `{0}`")]
    MissingSetting(&'static str),

    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),
}
