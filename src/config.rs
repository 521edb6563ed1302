//! Run configuration for the import and report commands

use std::path::PathBuf;

use crate::error::{EtlError, Result};

pub const DEFAULT_DB_URI: &str = "sqlite://fifa.db";
pub const PLAYERS_FILE: &str = "male_players.csv";
pub const TEAMS_FILE: &str = "male_teams.csv";
pub const IMPORT_LOG_FILE: &str = "data_import.log";
pub const CHART_FILE: &str = "nationality_distribution.svg";
/// Only the first 1000 player rows are imported unless told otherwise
pub const DEFAULT_PLAYER_LIMIT: usize = 1000;
pub const DEFAULT_TOP_N: usize = 20;

/// Where the store lives, parsed from a connection string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

impl StoreLocation {
    /// Parse `sqlite://<path>`, `sqlite:///<abs path>`, `sqlite::memory:` or a bare path
    pub fn parse(uri: &str) -> Result<Self> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(EtlError::MissingDatabase(uri.to_string()));
        }

        if uri == "sqlite::memory:" || uri == "sqlite://:memory:" || uri == ":memory:" {
            return Ok(StoreLocation::Memory);
        }

        match uri.split_once("://") {
            Some(("sqlite", "")) => Err(EtlError::MissingDatabase(uri.to_string())),
            Some(("sqlite", path)) => Ok(StoreLocation::File(PathBuf::from(path))),
            Some((scheme, _)) => Err(EtlError::UnsupportedDriver(scheme.to_string())),
            None => Ok(StoreLocation::File(PathBuf::from(uri))),
        }
    }
}

/// Settings for one import run
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub db_uri: String,
    pub players_path: PathBuf,
    pub teams_path: PathBuf,
    /// Cap on player rows read; `None` reads everything
    pub player_limit: Option<usize>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            db_uri: DEFAULT_DB_URI.to_string(),
            players_path: PathBuf::from(PLAYERS_FILE),
            teams_path: PathBuf::from(TEAMS_FILE),
            player_limit: Some(DEFAULT_PLAYER_LIMIT),
        }
    }
}

/// Settings for one report run
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub db_uri: String,
    pub chart_path: PathBuf,
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            db_uri: DEFAULT_DB_URI.to_string(),
            chart_path: PathBuf::from(CHART_FILE),
            top_n: DEFAULT_TOP_N,
        }
    }
}
