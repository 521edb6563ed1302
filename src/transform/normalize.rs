use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::Serialize;

use super::policy::{sentinel_date, CastType, ColumnPolicy, TablePolicy};
use crate::error::{EtlError, Result};
use crate::frame::{date_to_days, has_column, DATE_FORMAT};

/// What normalization did to one table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    pub rows_in: usize,
    pub cells_filled: usize,
    pub cast_failures: usize,
    pub rows_dropped: usize,
    pub duplicates_removed: usize,
}

impl NormalizeStats {
    pub fn rows_out(&self) -> usize {
        self.rows_in - self.rows_dropped - self.duplicates_removed
    }
}

/// Cast, fill, admit and deduplicate a raw table according to `policy`.
///
/// Only columns present in the input are touched; policy columns the input
/// lacks stay absent. A required column missing from the header is an error.
pub fn normalize(mut frame: DataFrame, policy: &TablePolicy) -> Result<(DataFrame, NormalizeStats)> {
    for column in policy.required_columns() {
        if !has_column(&frame, column.name) {
            return Err(EtlError::MissingColumn {
                table: policy.table,
                column: column.name,
            });
        }
    }

    let mut stats = NormalizeStats {
        rows_in: frame.height(),
        ..Default::default()
    };

    let present: Vec<&ColumnPolicy> = policy
        .columns
        .iter()
        .filter(|c| has_column(&frame, c.name))
        .collect();

    let mut fills = Vec::new();
    for column in &present {
        let raw = frame.column(column.name)?;
        let missing = raw.null_count();
        let (typed, failures) = cast_column(raw, column.cast)?;
        stats.cast_failures += failures;
        frame.with_column(typed)?;

        // Fills both originally missing cells and failed casts
        if let Some(fill) = column.fill {
            stats.cells_filled += missing;
            fills.push(col(column.name).fill_null(fill.literal()));
        }
    }

    let mut lazy = frame.lazy().with_columns(fills);
    if let Some(admitted) = policy
        .required_columns()
        .map(|c| col(c.name).is_not_null())
        .reduce(|all, next| all.and(next))
    {
        lazy = lazy.filter(admitted);
    }
    let admitted = lazy.collect()?;
    stats.rows_dropped = stats.rows_in - admitted.height();

    let frame = match policy.dedup_key {
        Some(key) => {
            let unique = admitted.unique_stable(Some(&[key.to_string()][..]), UniqueKeepStrategy::First, None)?;
            stats.duplicates_removed = admitted.height() - unique.height();
            unique
        }
        None => admitted,
    };

    Ok((frame, stats))
}

/// Non-strict cast of one column; returns the typed column and how many
/// non-null cells could not be represented.
///
/// Dates that fail to parse become the 1900-01-01 sentinel; every other
/// failure becomes null.
pub fn cast_column(raw: &Column, target: CastType) -> PolarsResult<(Column, usize)> {
    if target == CastType::Date {
        return parse_dates(raw);
    }

    let typed = match target {
        CastType::Integer if raw.dtype().is_integer() => raw.cast(&DataType::Int64)?,
        // Exports write integer columns that hold blanks as floats ("12.0")
        CastType::Integer => raw.cast(&DataType::Float64)?.cast(&DataType::Int64)?,
        other => raw.cast(&other.dtype())?,
    };
    let failures = typed.null_count() - raw.null_count();

    Ok((typed, failures))
}

fn parse_dates(raw: &Column) -> PolarsResult<(Column, usize)> {
    if raw.dtype() == &DataType::Date {
        return Ok((raw.clone(), 0));
    }

    let text = raw.cast(&DataType::String)?;
    let mut failures = 0;
    let days: Int32Chunked = text
        .str()?
        .into_iter()
        .map(|cell| {
            cell.map(|s| {
                parse_date(s).unwrap_or_else(|| {
                    failures += 1;
                    sentinel_date()
                })
            })
            .map(date_to_days)
        })
        .collect();

    let dates = days.with_name(raw.name().clone()).into_date().into_series();
    Ok((dates.into(), failures))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .ok()
}
