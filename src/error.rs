use polars::prelude::PolarsError;
use std::path::PathBuf;

/// Failures that abort an import or report run.
///
/// Per-cell cast problems never show up here: the normalizer recovers those
/// locally with sentinel values.
#[derive(Debug, thiserror::Error)]
pub enum EtlError {
    #[error("unsupported store driver '{0}' (only sqlite is available)")]
    UnsupportedDriver(String),

    #[error("store connection string '{0}' names no database")]
    MissingDatabase(String),

    #[error("failed to connect to the store at {uri}")]
    Connection {
        uri: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to create table {table}")]
    Schema {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("circular dependency detected at table {0}")]
    CircularDependency(String),

    #[error("failed to read {}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("{table} input is missing required column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("{table} dimension has duplicate key {key}")]
    DuplicateKey { table: &'static str, key: String },

    #[error("failed to insert into {table}")]
    Insert {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error(transparent)]
    Frame(#[from] PolarsError),

    #[error("report query failed")]
    Query(#[source] rusqlite::Error),

    #[error("failed to render chart to {}: {message}", path.display())]
    Chart { path: PathBuf, message: String },
}

pub type Result<T, E = EtlError> = std::result::Result<T, E>;
