//! The import path: connect, create schema, read, normalize, extract, resolve, load

use serde::Serialize;
use std::time::Instant;
use tracing::{error, info};

use crate::config::ImportConfig;
use crate::error::Result;
use crate::frame::column_names;
use crate::schema::DependencyResolver;
use crate::source::read_table;
use crate::transform::{extract_dimensions, normalize, resolve_facts, NormalizeStats, TablePolicy};
use crate::ui::{Phase, Ui};
use crate::writer::SqliteStore;

/// Outcome of one import run
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub players: NormalizeStats,
    pub teams: NormalizeStats,
    /// Rows appended per table, in load order
    pub loaded: Vec<(&'static str, u64)>,
    pub elapsed_secs: f64,
}

impl ImportSummary {
    pub fn total_rows(&self) -> u64 {
        self.loaded.iter().map(|(_, n)| n).sum()
    }
}

/// Connect to the store and create the schema if absent
pub fn prepare_store(db_uri: &str, ui: &mut impl Ui) -> Result<SqliteStore> {
    ui.set_phase(Phase::Connecting);
    let store = SqliteStore::connect(db_uri).inspect_err(|e| error!("Error connecting to the database: {}", e))?;
    info!("Connected to the database successfully");

    ui.set_phase(Phase::CreatingSchema);
    DependencyResolver::new()
        .load_order()
        .and_then(|tables| store.create_tables(&tables))
        .inspect_err(|e| error!("Error creating tables: {}", e))?;
    info!("Tables created successfully");

    Ok(store)
}

/// Run a full import as configured.
///
/// Any failure is logged and returned; rows already appended stay in the store.
pub fn run_import(config: &ImportConfig, ui: &mut impl Ui) -> Result<ImportSummary> {
    let start = Instant::now();
    let mut store = prepare_store(&config.db_uri, ui)?;

    let summary = import_into(&mut store, config, ui).inspect_err(|e| error!("Error importing data: {}", e))?;

    info!(
        rows = summary.total_rows(),
        elapsed_secs = start.elapsed().as_secs_f64(),
        "Data imported successfully"
    );
    Ok(ImportSummary {
        elapsed_secs: start.elapsed().as_secs_f64(),
        ..summary
    })
}

/// Read, transform and load into an already prepared store
pub fn import_into(store: &mut SqliteStore, config: &ImportConfig, ui: &mut impl Ui) -> Result<ImportSummary> {
    ui.set_phase(Phase::Reading);
    let raw_players = read_table(&config.players_path, config.player_limit)?;
    let raw_teams = read_table(&config.teams_path, None)?;
    ui.log(format!("Player columns: {}", column_names(&raw_players).join(", ")));
    ui.log(format!("Team columns: {}", column_names(&raw_teams).join(", ")));
    if config.player_limit.is_some_and(|max| raw_players.height() == max) {
        ui.log(format!("Player input capped at {} rows", raw_players.height()));
    }

    ui.set_phase(Phase::Normalizing);
    let (players, player_stats) = normalize(raw_players, &TablePolicy::players())?;
    let (teams, team_stats) = normalize(raw_teams, &TablePolicy::teams())?;
    ui.log(format!(
        "players: {} kept, {} dropped; teams: {} kept, {} duplicate ids removed",
        player_stats.rows_out(),
        player_stats.rows_dropped,
        team_stats.rows_out(),
        team_stats.duplicates_removed
    ));

    ui.set_phase(Phase::Extracting);
    let dims = extract_dimensions(&players, &teams)?;
    ui.log(format!(
        "{} teams, {} nationalities, {} positions",
        dims.teams.height(),
        dims.nationalities.height(),
        dims.positions.len()
    ));

    ui.set_phase(Phase::Resolving);
    let facts = resolve_facts(&players, &dims)?;

    ui.set_phase(Phase::Loading);
    let loaded = store.load(&dims, &facts, ui)?;

    Ok(ImportSummary {
        players: player_stats,
        teams: team_stats,
        loaded,
        elapsed_secs: 0.0,
    })
}
