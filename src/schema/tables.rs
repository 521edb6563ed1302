//! Table schema definitions for the FIFA player dataset

use super::types::*;

// =============================================================================
// Dimension tables
// =============================================================================

pub static TEAMS: TableSchema = TableSchema {
    name: "teams",
    columns: &[
        Column::new("team_id", ColumnType::Integer).primary_key(),
        Column::new("team_name", ColumnType::Varchar(100)).not_null(),
        Column::new("league_name", ColumnType::Varchar(100)),
        Column::new("nationality_name", ColumnType::Varchar(50)),
        Column::new("overall", ColumnType::Integer),
        Column::new("attack", ColumnType::Integer),
        Column::new("midfield", ColumnType::Integer),
        Column::new("defence", ColumnType::Integer),
        Column::new("transfer_budget_eur", ColumnType::Decimal(15, 2)),
        Column::new("club_worth_eur", ColumnType::Decimal(15, 2)),
    ],
    foreign_keys: &[],
};

pub static NATIONALITIES: TableSchema = TableSchema {
    name: "nationalities",
    columns: &[
        Column::new("nationality_id", ColumnType::Integer).primary_key(),
        Column::new("nationality_name", ColumnType::Varchar(50)).not_null(),
    ],
    foreign_keys: &[],
};

/// `position_id` is assigned by the importer, not by the store
pub static POSITIONS: TableSchema = TableSchema {
    name: "positions",
    columns: &[
        Column::new("position_id", ColumnType::Integer).primary_key(),
        Column::new("position_name", ColumnType::Varchar(50)).not_null(),
    ],
    foreign_keys: &[],
};

// =============================================================================
// Fact table
// =============================================================================

pub static PLAYERS: TableSchema = TableSchema {
    name: "players",
    columns: &[
        Column::new("player_id", ColumnType::Integer).primary_key(),
        Column::new("short_name", ColumnType::Varchar(50)).not_null(),
        Column::new("long_name", ColumnType::Varchar(100)).not_null(),
        Column::new("age", ColumnType::Integer),
        Column::new("dob", ColumnType::Date),
        Column::new("height_cm", ColumnType::Integer),
        Column::new("weight_kg", ColumnType::Integer),
        Column::new("overall", ColumnType::Integer),
        Column::new("potential", ColumnType::Integer),
        Column::new("value_eur", ColumnType::Integer),
        Column::new("wage_eur", ColumnType::Integer),
        Column::new("preferred_foot", ColumnType::Varchar(10)),
        Column::new("international_reputation", ColumnType::Integer),
        Column::new("weak_foot", ColumnType::Integer),
        Column::new("skill_moves", ColumnType::Integer),
        Column::new("work_rate", ColumnType::Varchar(50)),
        Column::new("body_type", ColumnType::Varchar(50)),
        Column::new("real_face", ColumnType::Varchar(10)),
        Column::new("release_clause_eur", ColumnType::Integer),
        Column::new("player_tags", ColumnType::Text),
        Column::new("team_jersey_number", ColumnType::Integer),
        Column::new("loaned_from", ColumnType::Varchar(100)),
        Column::new("joined", ColumnType::Date),
        Column::new("contract_valid_until", ColumnType::Integer),
        Column::new("team_id", ColumnType::Integer),
        Column::new("nationality_id", ColumnType::Integer),
        Column::new("position_id", ColumnType::Integer),
    ],
    foreign_keys: &[
        ForeignKey::new("team_id", "teams"),
        ForeignKey::new("nationality_id", "nationalities"),
        ForeignKey::new("position_id", "positions"),
    ],
};

// =============================================================================
// Table Registry
// =============================================================================

/// All tables, listed in declaration order. Use `DependencyResolver` for load order.
pub static ALL_TABLES: &[&TableSchema] = &[&PLAYERS, &TEAMS, &NATIONALITIES, &POSITIONS];

/// Get a table schema by name
pub fn get_table(name: &str) -> Option<&'static TableSchema> {
    ALL_TABLES.iter().find(|t| t.name == name).copied()
}
