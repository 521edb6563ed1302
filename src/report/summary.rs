//! Frequency counts and numeric descriptions of fetched report data

use polars::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::frame::has_column;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub label: String,
    pub count: usize,
}

/// Count non-null values of `column`, most frequent first.
///
/// Among equal counts, the label whose first occurrence comes later is listed
/// first.
pub fn value_counts(frame: &DataFrame, column: &str) -> Result<Vec<FrequencyEntry>> {
    if !has_column(frame, column) {
        return Ok(Vec::new());
    }

    let counts = frame
        .clone()
        .lazy()
        .select([col(column).cast(DataType::String).alias("label")])
        .with_row_index("first_seen", None)
        .filter(col("label").is_not_null())
        .group_by_stable([col("label")])
        .agg([len().alias("count"), col("first_seen").first()])
        .sort_by_exprs(
            [col("count"), col("first_seen")],
            SortMultipleOptions::default().with_order_descending_multi([true, true]),
        )
        .select([col("label"), col("count").cast(DataType::UInt64)])
        .collect()?;

    let labels = counts.column("label")?.str()?;
    let totals = counts.column("count")?.as_materialized_series().u64()?;

    Ok(labels
        .into_iter()
        .zip(totals)
        .filter_map(|(label, count)| {
            Some(FrequencyEntry {
                label: label?.to_string(),
                count: count? as usize,
            })
        })
        .collect())
}

pub fn top_n(mut entries: Vec<FrequencyEntry>, n: usize) -> Vec<FrequencyEntry> {
    entries.truncate(n);
    entries
}

/// count/mean/std/min/max of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` below two values
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
}

/// Describe every integer or float column that holds at least one value
pub fn describe(frame: &DataFrame) -> Result<Vec<ColumnSummary>> {
    let mut summaries = Vec::new();

    for column in frame.get_columns() {
        let dtype = column.dtype();
        if !(dtype.is_integer() || dtype.is_float()) {
            continue;
        }

        let values = column.cast(&DataType::Float64)?;
        let values = values.as_materialized_series().f64()?;
        let count = values.len() - values.null_count();
        let (Some(mean), Some(min), Some(max)) = (values.mean(), values.min(), values.max()) else {
            continue;
        };

        summaries.push(ColumnSummary {
            column: column.name().to_string(),
            count,
            mean,
            std: if count > 1 { values.std(1) } else { None },
            min,
            max,
        });
    }

    Ok(summaries)
}
