use polars::prelude::{AnyValue, Column, DataFrame, Series};
use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::error::{EtlError, Result};

/// Players joined to their team, nationality and position labels
pub const REPORT_QUERY: &str = "
SELECT p.player_id, p.short_name, p.long_name, p.age, p.dob, p.height_cm, p.weight_kg,
       p.overall, p.potential, p.value_eur, p.wage_eur, p.preferred_foot,
       p.international_reputation, p.weak_foot, p.skill_moves, p.work_rate, p.body_type,
       p.real_face, p.release_clause_eur, p.player_tags, p.team_jersey_number,
       p.loaned_from, p.joined, p.contract_valid_until,
       t.team_name, n.nationality_name, pos.position_name
FROM players p
LEFT JOIN teams t ON p.team_id = t.team_id
LEFT JOIN nationalities n ON p.nationality_id = n.nationality_id
LEFT JOIN positions pos ON p.position_id = pos.position_id";

/// Run the report query and materialize the result.
///
/// Column types follow the stored values; a column holding only nulls has
/// the null dtype.
pub fn fetch_players(conn: &Connection) -> Result<DataFrame> {
    let mut stmt = conn.prepare(REPORT_QUERY).map_err(EtlError::Query)?;
    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let mut cells: Vec<Vec<AnyValue<'static>>> = vec![Vec::new(); names.len()];
    let mut rows = stmt.query([]).map_err(EtlError::Query)?;
    while let Some(row) = rows.next().map_err(EtlError::Query)? {
        for (idx, column) in cells.iter_mut().enumerate() {
            column.push(any_value(row.get_ref(idx).map_err(EtlError::Query)?));
        }
    }

    let columns = names
        .iter()
        .zip(&cells)
        .map(|(name, values)| Series::from_any_values(name.as_str().into(), values, false).map(Column::from))
        .collect::<polars::prelude::PolarsResult<Vec<Column>>>()?;

    Ok(DataFrame::new(columns)?)
}

fn any_value(value: ValueRef<'_>) -> AnyValue<'static> {
    match value {
        ValueRef::Null => AnyValue::Null,
        ValueRef::Integer(i) => AnyValue::Int64(i),
        ValueRef::Real(f) => AnyValue::Float64(f),
        ValueRef::Text(t) => AnyValue::StringOwned(String::from_utf8_lossy(t).as_ref().into()),
        ValueRef::Blob(b) => AnyValue::BinaryOwned(b.to_vec()),
    }
}
