//! The report path: fetch the joined player view, clean it, count
//! nationalities and chart the most common ones.

pub mod chart;
pub mod clean;
pub mod query;
pub mod summary;

pub use chart::{BarChart, ChartSink, SvgChart};
pub use clean::clean;
pub use query::fetch_players;
pub use summary::{describe, top_n, value_counts, ColumnSummary, FrequencyEntry};

use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{error, info};

use crate::config::ReportConfig;
use crate::error::Result;
use crate::writer::SqliteStore;

/// Outcome of one report run
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub players: usize,
    pub numeric: Vec<ColumnSummary>,
    pub top_nationalities: Vec<FrequencyEntry>,
}

/// Connect read-only, fetch and report, rendering the chart to `sink`
pub fn run_report(config: &ReportConfig, sink: &mut impl ChartSink) -> Result<ReportSummary> {
    let store = SqliteStore::connect_read_only(&config.db_uri)
        .inspect_err(|e| error!("Error connecting to the database: {}", e))?;
    let frame = fetch_players(store.connection()).inspect_err(|e| error!("Error fetching data: {}", e))?;

    report_frame(frame, config.top_n, sink)
}

/// Clean an already fetched frame and chart its nationality counts
pub fn report_frame(frame: DataFrame, n: usize, sink: &mut impl ChartSink) -> Result<ReportSummary> {
    info!("Fetched {} players", frame.height());
    info!("\n{}", frame.head(Some(5)));

    let numeric = describe(&frame)?;
    for column in &numeric {
        info!(
            "{}: count={} mean={:.2} min={} max={}",
            column.column, column.count, column.mean, column.min, column.max
        );
    }

    let frame = clean(frame)?;

    let top = top_n(value_counts(&frame, "nationality_name")?, n);
    sink.render(&BarChart::nationality_distribution(n, top.clone()))?;
    info!("Rendered nationality chart with {} bars", top.len());

    Ok(ReportSummary {
        players: frame.height(),
        numeric,
        top_nationalities: top,
    })
}
