//! Error types for seed loading, configuration and submissions

use std::path::PathBuf;

use thiserror::Error;

use crate::model::Id;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate {collection} id `{id}` in seed data")]
    DuplicateId { collection: &'static str, id: Id },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Outcome of a remote submission that did not go through
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("submission cancelled")]
    Cancelled,

    #[error("submission rejected: {0}")]
    Rejected(String),
}
