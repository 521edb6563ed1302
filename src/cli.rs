use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{
    ImportConfig, ReportConfig, CHART_FILE, DEFAULT_DB_URI, DEFAULT_PLAYER_LIMIT, DEFAULT_TOP_N, IMPORT_LOG_FILE,
    PLAYERS_FILE, TEAMS_FILE,
};

#[derive(Parser, Debug)]
#[command(name = "fifa-etl")]
#[command(version, about = "Load FIFA player and team exports into SQLite and chart them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the schema (if absent) and import the players and teams files
    Import {
        /// Store connection string, e.g. sqlite://fifa.db
        #[arg(long, env = "FIFA_DB_URI", default_value = DEFAULT_DB_URI)]
        db_uri: String,

        /// Players CSV
        #[arg(long, default_value = PLAYERS_FILE)]
        players: PathBuf,

        /// Teams CSV
        #[arg(long, default_value = TEAMS_FILE)]
        teams: PathBuf,

        /// Import only the first N player rows
        #[arg(long, default_value_t = DEFAULT_PLAYER_LIMIT, conflicts_with = "all_players")]
        player_limit: usize,

        /// Import every player row
        #[arg(long)]
        all_players: bool,

        /// File import log records are appended to
        #[arg(long, default_value = IMPORT_LOG_FILE)]
        log_file: PathBuf,

        /// Show a full-screen progress view
        #[arg(long)]
        tui: bool,

        /// Print the import summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Chart the nationality distribution of imported players
    Report {
        /// Store connection string, e.g. sqlite://fifa.db
        #[arg(long, env = "FIFA_DB_URI", default_value = DEFAULT_DB_URI)]
        db_uri: String,

        /// Chart output path (SVG)
        #[arg(short, long, default_value = CHART_FILE)]
        output: PathBuf,

        /// Number of nationalities to chart
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Print the report summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create the schema without importing anything
    CreateSchema {
        /// Store connection string, e.g. sqlite://fifa.db
        #[arg(long, env = "FIFA_DB_URI", default_value = DEFAULT_DB_URI)]
        db_uri: String,

        /// File import log records are appended to
        #[arg(long, default_value = IMPORT_LOG_FILE)]
        log_file: PathBuf,
    },

    /// List tables in load order
    ListTables,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

impl Commands {
    /// Log file for the commands that write to the store
    pub fn log_file(&self) -> Option<&Path> {
        match self {
            Commands::Import { log_file, .. } | Commands::CreateSchema { log_file, .. } => Some(log_file.as_path()),
            _ => None,
        }
    }

    /// Import settings, if this is the import command
    pub fn import_config(&self) -> Option<ImportConfig> {
        match self {
            Commands::Import {
                db_uri,
                players,
                teams,
                player_limit,
                all_players,
                ..
            } => Some(ImportConfig {
                db_uri: db_uri.clone(),
                players_path: players.clone(),
                teams_path: teams.clone(),
                player_limit: (!all_players).then_some(*player_limit),
            }),
            _ => None,
        }
    }

    /// Report settings, if this is the report command
    pub fn report_config(&self) -> Option<ReportConfig> {
        match self {
            Commands::Report { db_uri, output, top, .. } => Some(ReportConfig {
                db_uri: db_uri.clone(),
                chart_path: output.clone(),
                top_n: *top,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_defaults() {
        let cli = Cli::try_parse_from(["fifa-etl", "import", "--db-uri", "sqlite://test.db"]).unwrap();
        let config = cli.command.import_config().unwrap();
        assert_eq!(config.db_uri, "sqlite://test.db");
        assert_eq!(config.players_path, PathBuf::from("male_players.csv"));
        assert_eq!(config.player_limit, Some(1000));
    }

    #[test]
    fn test_all_players_lifts_cap() {
        let cli = Cli::try_parse_from(["fifa-etl", "import", "--all-players"]).unwrap();
        assert_eq!(cli.command.import_config().unwrap().player_limit, None);
    }

    #[test]
    fn test_report_options() {
        let cli = Cli::try_parse_from(["fifa-etl", "report", "-o", "out.svg", "--top", "5"]).unwrap();
        let config = cli.command.report_config().unwrap();
        assert_eq!(config.chart_path, PathBuf::from("out.svg"));
        assert_eq!(config.top_n, 5);
        assert!(cli.command.import_config().is_none());
        assert!(cli.command.log_file().is_none());
    }

    #[test]
    fn test_store_commands_log_to_import_log() {
        let cli = Cli::try_parse_from(["fifa-etl", "create-schema"]).unwrap();
        assert_eq!(cli.command.log_file(), Some(Path::new("data_import.log")));

        let cli = Cli::try_parse_from(["fifa-etl", "import", "--log-file", "run.log"]).unwrap();
        assert_eq!(cli.command.log_file(), Some(Path::new("run.log")));
    }
}
