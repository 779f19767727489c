//! Error types for provisioning runs.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the provisioner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProvisionError {
    /// The table listing failed. Fatal for the run: nothing gets created.
    #[error("backing store unavailable: {0}")]
    BackendUnavailable(String),

    /// A single `CreateTable` request failed. Siblings are unaffected.
    #[error("failed to create table '{table_name}': {cause}")]
    CreateFailed { table_name: String, cause: String },
}

/// Errors raised while loading the credentials file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
