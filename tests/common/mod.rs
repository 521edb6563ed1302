//! Shared fixtures: small players/teams exports and a store imported from them

#![allow(dead_code)]

use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use fifa_etl::config::ImportConfig;
use fifa_etl::pipeline::{run_import, ImportSummary};
use fifa_etl::SilentUi;

pub const PLAYERS_CSV: &str = "\
player_id,short_name,long_name,player_positions,overall,potential,value_eur,age,dob,nationality_id,nationality_name,club_team_id,team_jersey_number,loaned_from,joined,contract_valid_until
1,L. Messi,Lionel Andrés Messi Cuccittini,\"RW, ST, CF\",93,93,78000000.0,34,1987-06-24,52,Argentina,73,30,,2021-08-10,2023.0
2,K. Mbappé,Kylian Mbappé Lottin,\"ST, LW\",91,95,194000000.0,22,1998-12-20,18,France,73,7,,2018-07-01,2022.0
3,K. Benzema,Karim Benzema,\"CF, ST\",89,89,66000000.0,33,1987-12-19,18,France,243,9,,2009-07-09,2023.0
4,M. Neuer,Manuel Peter Neuer,GK,90,90,13500000.0,35,1986-03-27,21,Germany,21,1,,2011-07-01,2023.0
5,J. Doe,John Doe,\"ST, LW\",60,62,,29,,99,,,,,,
6,T. Müller,Thomas Müller,CB,70,75,500000.0,24,1997-01-02,21,Germany,999,4,FC Bayern München,not-a-date,2024.0
";

pub const TEAMS_CSV: &str = "\
team_id,team_name,league_name,nationality_name,overall,attack,midfield,defence,transfer_budget_eur,club_worth_eur
73,Paris Saint-Germain,Ligue 1,France,85,88,83,83,160000000,
243,Real Madrid CF,La Liga,Spain,85,86,86,83,,
21,FC Bayern München,Bundesliga,Germany,84,86,82,81,100000000,
73,Paris SG (duplicate),Ligue 1,France,80,80,80,80,0,0
";

/// A temp directory holding the two exports and a store path
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new(players_csv: &str, teams_csv: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("male_players.csv"), players_csv).expect("Failed to write players");
        fs::write(dir.path().join("male_teams.csv"), teams_csv).expect("Failed to write teams");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn db_path(&self) -> PathBuf {
        self.path().join("fifa.db")
    }

    pub fn db_uri(&self) -> String {
        format!("sqlite://{}", self.db_path().display())
    }

    pub fn import_config(&self) -> ImportConfig {
        ImportConfig {
            db_uri: self.db_uri(),
            players_path: self.path().join("male_players.csv"),
            teams_path: self.path().join("male_teams.csv"),
            player_limit: Some(1000),
        }
    }

    pub fn connection(&self) -> Connection {
        Connection::open(self.db_path()).expect("Failed to open test database")
    }
}

pub struct ImportedStore {
    pub workspace: Workspace,
    pub summary: ImportSummary,
}

/// The fixture exports imported once and shared by all tests
pub static IMPORTED: Lazy<ImportedStore> = Lazy::new(|| {
    let workspace = Workspace::new(PLAYERS_CSV, TEAMS_CSV);
    let summary = run_import(&workspace.import_config(), &mut SilentUi::new()).expect("Fixture import failed");
    ImportedStore { workspace, summary }
});

pub fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
        .expect("count query failed")
}
