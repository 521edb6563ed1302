//! Foreign-key resolution for the players fact table

use polars::prelude::*;

use super::dimensions::Dimensions;
use crate::error::{EtlError, Result};
use crate::frame::has_column;
use crate::schema::PLAYERS;

/// Fail if any dimension key repeats, which would make the joins fan out
pub fn ensure_unique_keys(dims: &Dimensions) -> Result<()> {
    check_unique(&dims.teams, "teams", "team_id")?;
    check_unique(&dims.nationalities, "nationalities", "nationality_id")?;

    // PositionIndex hands out one id per label, so positions cannot repeat

    Ok(())
}

fn check_unique(frame: &DataFrame, table: &'static str, key: &str) -> Result<()> {
    if !has_column(frame, key) {
        return Ok(());
    }

    let repeated = frame
        .clone()
        .lazy()
        .group_by_stable([col(key)])
        .agg([len().alias("occurrences")])
        .filter(col("occurrences").gt(lit(1)))
        .collect()?;

    if repeated.height() == 0 {
        return Ok(());
    }

    Err(EtlError::DuplicateKey {
        table,
        key: repeated.column(key)?.get(0)?.to_string(),
    })
}

/// A reference column for joining, or a typed null column when the input lacks it
fn reference(players: &DataFrame, name: &str, dtype: DataType) -> Expr {
    if has_column(players, name) {
        col(name).cast(dtype)
    } else {
        lit(NULL).cast(dtype)
    }
}

/// Attach `team_id`, `nationality_id` and `position_id` to every player and
/// project the persisted player columns.
///
/// All three joins are left joins: a player whose reference matches nothing
/// keeps a null key. The output has exactly one row per input row.
pub fn resolve_facts(players: &DataFrame, dims: &Dimensions) -> Result<DataFrame> {
    ensure_unique_keys(dims)?;

    let teams = dims.teams.clone().lazy().select([
        col("team_id").alias("club_team_id"),
        col("team_id").alias("resolved_team_id"),
    ]);
    let nationalities = dims.nationalities.clone().lazy().select([
        col("nationality_id").alias("player_nationality_id"),
        col("nationality_id").alias("resolved_nationality_id"),
    ]);
    let positions = dims.positions.to_frame()?.lazy().select([
        col("position_name").alias("player_positions"),
        col("position_id"),
    ]);

    let merged = players
        .clone()
        .lazy()
        .with_columns([
            reference(players, "club_team_id", DataType::Int64).alias("club_team_id"),
            reference(players, "nationality_id", DataType::Int64).alias("player_nationality_id"),
            reference(players, "player_positions", DataType::String).alias("player_positions"),
        ])
        .join(
            teams,
            [col("club_team_id")],
            [col("club_team_id")],
            JoinArgs::new(JoinType::Left),
        )
        .join(
            nationalities,
            [col("player_nationality_id")],
            [col("player_nationality_id")],
            JoinArgs::new(JoinType::Left),
        )
        .join(
            positions,
            [col("player_positions")],
            [col("player_positions")],
            JoinArgs::new(JoinType::Left),
        );

    let persisted: Vec<Expr> = PLAYERS
        .column_names()
        .filter_map(|name| match name {
            "team_id" => Some(col("resolved_team_id").alias("team_id")),
            "nationality_id" => Some(col("resolved_nationality_id").alias("nationality_id")),
            "position_id" => Some(col("position_id")),
            other if has_column(players, other) => Some(col(other)),
            _ => None,
        })
        .collect();

    let facts = merged.select(persisted).collect()?;
    debug_assert_eq!(facts.height(), players.height());

    Ok(facts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::dimensions::extract_dimensions;

    fn players(rows: &[(i64, i64, i64, &str)]) -> DataFrame {
        let n = rows.len();
        df!(
            "player_id" => rows.iter().map(|r| r.0).collect::<Vec<_>>(),
            "short_name" => vec!["P"; n],
            "long_name" => vec!["Player"; n],
            "player_positions" => rows.iter().map(|r| r.3).collect::<Vec<_>>(),
            "overall" => vec![70i64; n],
            "potential" => vec![80i64; n],
            "club_team_id" => rows.iter().map(|r| r.1).collect::<Vec<_>>(),
            "nationality_id" => rows.iter().map(|r| r.2).collect::<Vec<_>>(),
            "nationality_name" => vec!["FR"; n],
        )
        .unwrap()
    }

    fn teams(ids: &[i64]) -> DataFrame {
        let names: Vec<String> = ids.iter().map(|id| format!("Team {}", id)).collect();
        df!("team_id" => ids, "team_name" => names).unwrap()
    }

    #[test]
    fn test_resolves_keys_and_projects() {
        let players = players(&[(1, 10, 18, "ST"), (2, 11, 18, "GK")]);
        let dims = extract_dimensions(&players, &teams(&[10, 11])).unwrap();

        let facts = resolve_facts(&players, &dims).unwrap();
        assert_eq!(facts.height(), 2);
        assert_eq!(facts.column("team_id").unwrap().get(1).unwrap(), AnyValue::Int64(11));
        assert_eq!(facts.column("position_id").unwrap().get(1).unwrap(), AnyValue::Int64(2));
        assert_eq!(facts.column("nationality_id").unwrap().get(0).unwrap(), AnyValue::Int64(18));

        // Raw join columns are not persisted
        assert!(!has_column(&facts, "club_team_id"));
        assert!(!has_column(&facts, "player_positions"));
        assert!(!has_column(&facts, "nationality_name"));
        // Absent optional columns are skipped rather than invented
        assert!(!has_column(&facts, "age"));
    }

    #[test]
    fn test_unknown_team_gets_null_reference() {
        let players = players(&[(1, 999, 18, "ST"), (2, -1, 18, "ST")]);
        let dims = extract_dimensions(&players, &teams(&[10])).unwrap();

        let facts = resolve_facts(&players, &dims).unwrap();
        assert_eq!(facts.height(), 2);
        assert_eq!(facts.column("team_id").unwrap().null_count(), 2);
        assert_eq!(facts.column("player_id").unwrap().get(0).unwrap(), AnyValue::Int64(1));
    }

    #[test]
    fn test_duplicate_nationality_ids_fail_loudly() {
        let players = players(&[(1, 10, 18, "ST")]);
        let mut dims = extract_dimensions(&players, &teams(&[10])).unwrap();
        let conflicting = df!("nationality_id" => [18i64], "nationality_name" => ["Francia"]).unwrap();
        dims.nationalities = dims.nationalities.vstack(&conflicting).unwrap();

        let err = resolve_facts(&players, &dims).unwrap_err();
        assert!(matches!(err, EtlError::DuplicateKey { table: "nationalities", ref key } if key == "18"));
    }

    #[test]
    fn test_duplicate_team_ids_fail_loudly() {
        let players = players(&[(1, 10, 18, "ST")]);
        let dims = extract_dimensions(&players, &teams(&[10, 10])).unwrap();

        let err = resolve_facts(&players, &dims).unwrap_err();
        assert!(matches!(err, EtlError::DuplicateKey { table: "teams", .. }));
    }
}
