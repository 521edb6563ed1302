use polars::prelude::*;

use crate::error::Result;
use crate::frame::has_column;
use crate::transform::UNKNOWN;

/// Joined labels that are null when a player's reference did not resolve
pub const LABEL_COLUMNS: [&str; 3] = ["team_name", "position_name", "nationality_name"];

/// Fill missing labels with "Unknown" and make `overall` a real number.
///
/// An `overall` value that is not numeric becomes null instead of failing.
pub fn clean(frame: DataFrame) -> Result<DataFrame> {
    let mut fixes: Vec<Expr> = LABEL_COLUMNS
        .iter()
        .map(|&column| {
            if has_column(&frame, column) {
                col(column).cast(DataType::String).fill_null(lit(UNKNOWN))
            } else {
                lit(UNKNOWN).alias(column)
            }
        })
        .collect();

    if has_column(&frame, "overall") {
        fixes.push(col("overall").cast(DataType::Float64));
    }

    Ok(frame.lazy().with_columns(fixes).collect()?)
}
