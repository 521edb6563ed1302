//! Small helpers over polars frames shared by the pipeline stages

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

/// Storage format for dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `num_days_from_ce` of 1970-01-01, polars' date epoch
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub fn has_column(frame: &DataFrame, name: &str) -> bool {
    frame.get_column_index(name).is_some()
}

/// Column names in frame order
pub fn column_names(frame: &DataFrame) -> Vec<String> {
    frame.get_column_names().iter().map(|name| name.to_string()).collect()
}

/// Keep the wanted columns that exist, in the wanted order
pub fn project<'a>(frame: &DataFrame, wanted: impl IntoIterator<Item = &'a str>) -> PolarsResult<DataFrame> {
    let present: Vec<&str> = wanted.into_iter().filter(|name| has_column(frame, name)).collect();
    frame.select(present)
}

/// Physical value of a polars `Date`
pub fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

pub fn days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
}
