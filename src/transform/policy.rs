//! Per-column normalization policy
//!
//! Every fill default and target type the normalizer applies comes from a
//! `TablePolicy` value handed to it, so callers (and tests) can swap the
//! policy without touching the normalizer.

use chrono::NaiveDate;
use polars::prelude::{lit, DataType, Expr};

use crate::frame::date_to_days;

/// Text placeholder for missing labels
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for missing or unparseable dates: 1900-01-01
pub fn sentinel_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or_default()
}

/// Type a column is coerced to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastType {
    Integer,
    Real,
    Text,
    Date,
}

/// Value substituted for a missing cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Integer(i64),
    Real(f64),
    Text(&'static str),
    /// The sentinel date, see [`sentinel_date`]
    Date,
}

impl CastType {
    pub fn dtype(&self) -> DataType {
        match self {
            CastType::Integer => DataType::Int64,
            CastType::Real => DataType::Float64,
            CastType::Text => DataType::String,
            CastType::Date => DataType::Date,
        }
    }
}

impl Fill {
    /// The fill as a polars literal of the column's target type
    pub fn literal(&self) -> Expr {
        match self {
            Fill::Integer(i) => lit(*i),
            Fill::Real(f) => lit(*f),
            Fill::Text(s) => lit(*s),
            Fill::Date => lit(date_to_days(sentinel_date())).cast(DataType::Date),
        }
    }
}

/// Policy for one input column
#[derive(Debug, Clone)]
pub struct ColumnPolicy {
    pub name: &'static str,
    pub cast: CastType,
    pub fill: Option<Fill>,
    /// Column must be in the header and non-null after filling
    pub required: bool,
}

impl ColumnPolicy {
    /// A typed column with no fill default
    pub const fn new(name: &'static str, cast: CastType) -> Self {
        Self {
            name,
            cast,
            fill: None,
            required: false,
        }
    }

    pub const fn fill(self, fill: Fill) -> Self {
        Self {
            fill: Some(fill),
            ..self
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn int(name: &'static str) -> Self {
        Self::new(name, CastType::Integer)
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, CastType::Text)
    }
}

/// Normalization policy for one input table
#[derive(Debug, Clone)]
pub struct TablePolicy {
    pub table: &'static str,
    pub columns: Vec<ColumnPolicy>,
    /// Column rows are deduplicated on; the first-seen row per key is kept
    pub dedup_key: Option<&'static str>,
}

impl TablePolicy {
    pub fn column(&self, name: &str) -> Option<&ColumnPolicy> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn required_columns(&self) -> impl Iterator<Item = &ColumnPolicy> {
        self.columns.iter().filter(|c| c.required)
    }

    /// Policy for the players export
    pub fn players() -> Self {
        use CastType::*;

        Self {
            table: "players",
            columns: vec![
                ColumnPolicy::int("player_id").fill(Fill::Integer(-1)),
                ColumnPolicy::text("short_name").fill(Fill::Text(UNKNOWN)).required(),
                ColumnPolicy::text("long_name").fill(Fill::Text(UNKNOWN)).required(),
                ColumnPolicy::text("player_positions").fill(Fill::Text(UNKNOWN)).required(),
                ColumnPolicy::int("overall").fill(Fill::Integer(-1)).required(),
                ColumnPolicy::int("potential").fill(Fill::Integer(-1)).required(),
                ColumnPolicy::int("nationality_id").fill(Fill::Integer(-1)),
                ColumnPolicy::text("nationality_name").fill(Fill::Text(UNKNOWN)),
                ColumnPolicy::int("club_team_id").fill(Fill::Integer(-1)),
                ColumnPolicy::int("team_jersey_number").fill(Fill::Integer(-1)),
                ColumnPolicy::text("loaned_from").fill(Fill::Text(UNKNOWN)),
                ColumnPolicy::new("joined", Date).fill(Fill::Date),
                ColumnPolicy::int("contract_valid_until").fill(Fill::Integer(-1)),
                // Typed but left null when missing
                ColumnPolicy::int("age"),
                ColumnPolicy::new("dob", Date),
                ColumnPolicy::int("height_cm"),
                ColumnPolicy::int("weight_kg"),
                ColumnPolicy::int("value_eur"),
                ColumnPolicy::int("wage_eur"),
                ColumnPolicy::text("preferred_foot"),
                ColumnPolicy::int("international_reputation"),
                ColumnPolicy::int("weak_foot"),
                ColumnPolicy::int("skill_moves"),
                ColumnPolicy::text("work_rate"),
                ColumnPolicy::text("body_type"),
                ColumnPolicy::text("real_face"),
                ColumnPolicy::int("release_clause_eur"),
                ColumnPolicy::text("player_tags"),
            ],
            dedup_key: None,
        }
    }

    /// Policy for the teams export
    pub fn teams() -> Self {
        Self {
            table: "teams",
            columns: vec![
                ColumnPolicy::int("team_id").fill(Fill::Integer(-1)).required(),
                ColumnPolicy::text("team_name").fill(Fill::Text(UNKNOWN)).required(),
                ColumnPolicy::text("league_name").fill(Fill::Text(UNKNOWN)),
                ColumnPolicy::text("nationality_name").fill(Fill::Text(UNKNOWN)),
                ColumnPolicy::int("overall").fill(Fill::Integer(-1)),
                ColumnPolicy::int("attack").fill(Fill::Integer(-1)),
                ColumnPolicy::int("midfield").fill(Fill::Integer(-1)),
                ColumnPolicy::int("defence").fill(Fill::Integer(-1)),
                ColumnPolicy::new("transfer_budget_eur", CastType::Real).fill(Fill::Real(0.0)),
                ColumnPolicy::new("club_worth_eur", CastType::Real).fill(Fill::Real(0.0)),
            ],
            dedup_key: Some("team_id"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_required_columns() {
        let policy = TablePolicy::players();
        let required: Vec<_> = policy.required_columns().map(|c| c.name).collect();
        assert_eq!(
            required,
            ["short_name", "long_name", "player_positions", "overall", "potential"]
        );
    }

    #[test]
    fn test_fill_defaults_by_type() {
        let policy = TablePolicy::teams();
        assert_eq!(policy.column("team_id").unwrap().fill, Some(Fill::Integer(-1)));
        assert_eq!(policy.column("club_worth_eur").unwrap().fill, Some(Fill::Real(0.0)));
        assert_eq!(CastType::Date.dtype(), DataType::Date);
    }
}
