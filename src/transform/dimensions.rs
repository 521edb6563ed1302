//! Dimension extraction: teams, nationalities and positions derived from the
//! normalized inputs alone. Nothing already in the store is consulted.

use polars::prelude::*;
use std::collections::HashMap;

use super::policy::UNKNOWN;
use crate::error::Result;
use crate::frame::{has_column, project};
use crate::schema::TEAMS;

/// Sequential position ids keyed by raw position label.
///
/// Ids start at 1 and follow the order labels are first inserted.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    ids: HashMap<String, i64>,
    labels: Vec<String>,
}

impl PositionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `label`, assigning the next one if unseen
    pub fn insert(&mut self, label: &str) -> i64 {
        if let Some(&id) = self.ids.get(label) {
            return id;
        }
        self.labels.push(label.to_string());
        let id = self.labels.len() as i64;
        self.ids.insert(label.to_string(), id);
        id
    }

    pub fn get(&self, label: &str) -> Option<i64> {
        self.ids.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `(position_id, position_name)` in id order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (idx as i64 + 1, label.as_str()))
    }

    /// The index as rows of the positions table
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let ids: Vec<i64> = self.iter().map(|(id, _)| id).collect();
        df!(
            "position_id" => ids,
            "position_name" => self.labels.as_slice(),
        )
    }
}

/// The three dimension sets for one import
#[derive(Debug, Clone)]
pub struct Dimensions {
    pub teams: DataFrame,
    pub nationalities: DataFrame,
    pub positions: PositionIndex,
}

/// Derive all dimensions from normalized players and deduplicated teams
pub fn extract_dimensions(players: &DataFrame, teams: &DataFrame) -> Result<Dimensions> {
    Ok(Dimensions {
        teams: extract_teams(teams)?,
        nationalities: extract_nationalities(players)?,
        positions: extract_positions(players)?,
    })
}

pub fn extract_teams(teams: &DataFrame) -> Result<DataFrame> {
    Ok(project(teams, TEAMS.column_names())?)
}

/// Distinct `(nationality_id, nationality_name)` pairs in first-seen order.
///
/// Rows without an id are skipped. An id seen with two names yields two
/// rows; reconciling them is left to the caller.
pub fn extract_nationalities(players: &DataFrame) -> Result<DataFrame> {
    if !has_column(players, "nationality_id") {
        return Ok(df!(
            "nationality_id" => Vec::<i64>::new(),
            "nationality_name" => Vec::<String>::new(),
        )?);
    }

    let name = if has_column(players, "nationality_name") {
        col("nationality_name").cast(DataType::String).fill_null(lit(UNKNOWN))
    } else {
        lit(UNKNOWN)
    };

    let pairs = players
        .clone()
        .lazy()
        .filter(col("nationality_id").is_not_null())
        .select([
            col("nationality_id").cast(DataType::Int64),
            name.alias("nationality_name"),
        ])
        .collect()?;

    Ok(pairs.unique_stable(None, UniqueKeepStrategy::First, None)?)
}

pub fn extract_positions(players: &DataFrame) -> Result<PositionIndex> {
    let mut index = PositionIndex::new();
    if let Ok(labels) = players.column("player_positions") {
        for label in labels.str()?.into_iter().flatten() {
            index.insert(label);
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::column_names;

    fn players(rows: &[(&str, Option<i64>, Option<&str>)]) -> DataFrame {
        let positions: Vec<&str> = rows.iter().map(|r| r.0).collect();
        let ids: Vec<Option<i64>> = rows.iter().map(|r| r.1).collect();
        let names: Vec<Option<&str>> = rows.iter().map(|r| r.2).collect();
        df!(
            "player_positions" => positions,
            "nationality_id" => ids,
            "nationality_name" => names,
        )
        .unwrap()
    }

    #[test]
    fn test_position_ids_follow_first_seen_order() {
        let frame = players(&[
            ("ST", Some(1), Some("FR")),
            ("GK", Some(1), Some("FR")),
            ("ST", Some(1), Some("FR")),
            ("CB", Some(1), Some("FR")),
        ]);

        let positions = extract_positions(&frame).unwrap();
        let pairs: Vec<_> = positions.iter().collect();
        assert_eq!(pairs, vec![(1, "ST"), (2, "GK"), (3, "CB")]);
        assert_eq!(positions.get("CB"), Some(3));
        assert_eq!(positions.get("LW"), None);
    }

    #[test]
    fn test_nationalities_are_distinct_pairs() {
        let frame = players(&[
            ("ST", Some(18), Some("France")),
            ("GK", Some(18), Some("France")),
            ("CB", Some(21), Some("Germany")),
        ]);

        let nationalities = extract_nationalities(&frame).unwrap();
        assert_eq!(nationalities.height(), 2);
        let ids = nationalities.column("nationality_id").unwrap();
        assert_eq!(ids.get(0).unwrap(), AnyValue::Int64(18));
        let names = nationalities.column("nationality_name").unwrap();
        assert_eq!(names.get(1).unwrap(), AnyValue::String("Germany"));
    }

    #[test]
    fn test_conflicting_names_are_both_kept() {
        let frame = players(&[("ST", Some(18), Some("France")), ("GK", Some(18), Some("Francia"))]);
        let nationalities = extract_nationalities(&frame).unwrap();
        assert_eq!(nationalities.height(), 2);
        assert_eq!(nationalities.column("nationality_id").unwrap().n_unique().unwrap(), 1);
    }

    #[test]
    fn test_missing_name_defaults_to_unknown() {
        let frame = players(&[("ST", Some(7), None), ("GK", None, Some("Spain"))]);
        let nationalities = extract_nationalities(&frame).unwrap();
        assert_eq!(nationalities.height(), 1);
        let names = nationalities.column("nationality_name").unwrap();
        assert_eq!(names.get(0).unwrap(), AnyValue::String("Unknown"));
    }

    #[test]
    fn test_dimension_frames_match_schema_columns() {
        let teams = df!("team_id" => [1i64], "team_name" => ["A"], "extra" => ["x"]).unwrap();
        let dims = extract_dimensions(&players(&[("ST", Some(1), Some("FR"))]), &teams).unwrap();

        assert_eq!(
            column_names(&dims.positions.to_frame().unwrap()),
            ["position_id", "position_name"]
        );
        assert_eq!(
            column_names(&dims.nationalities),
            ["nationality_id", "nationality_name"]
        );
        assert_eq!(column_names(&dims.teams), ["team_id", "team_name"]);
    }
}
