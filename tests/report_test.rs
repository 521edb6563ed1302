//! Report pipeline tests over the shared imported store.

mod common;

use polars::prelude::*;

use common::{Workspace, IMPORTED, TEAMS_CSV};
use fifa_etl::config::ReportConfig;
use fifa_etl::pipeline::run_import;
use fifa_etl::report::{clean, fetch_players, run_report, BarChart, ChartSink, SvgChart};
use fifa_etl::{EtlError, SilentUi};

#[derive(Default)]
struct RecordingSink {
    charts: Vec<BarChart>,
}

impl ChartSink for RecordingSink {
    fn render(&mut self, chart: &BarChart) -> Result<(), EtlError> {
        self.charts.push(chart.clone());
        Ok(())
    }
}

fn report_config(db_uri: String) -> ReportConfig {
    ReportConfig {
        db_uri,
        ..Default::default()
    }
}

/// The single player row with this short name
fn player(frame: &DataFrame, short_name: &str) -> DataFrame {
    let found = frame
        .clone()
        .lazy()
        .filter(col("short_name").eq(lit(short_name)))
        .collect()
        .unwrap();
    assert_eq!(found.height(), 1, "expected one {}", short_name);
    found
}

fn text(frame: &DataFrame, column: &str) -> Option<String> {
    frame.column(column).unwrap().str().unwrap().get(0).map(String::from)
}

#[test]
fn test_fetch_joins_labels() {
    let conn = IMPORTED.workspace.connection();
    let frame = fetch_players(&conn).unwrap();

    assert_eq!(frame.height(), 6);
    for column in ["team_name", "nationality_name", "position_name", "overall"] {
        assert!(frame.get_column_index(column).is_some(), "missing {}", column);
    }

    let neuer = player(&frame, "M. Neuer");
    assert_eq!(text(&neuer, "team_name").as_deref(), Some("FC Bayern München"));
    assert_eq!(text(&neuer, "position_name").as_deref(), Some("GK"));
}

#[test]
fn test_clean_replaces_unresolved_team() {
    let conn = IMPORTED.workspace.connection();
    let frame = clean(fetch_players(&conn).unwrap()).unwrap();

    let doe = player(&frame, "J. Doe");
    assert_eq!(text(&doe, "team_name").as_deref(), Some("Unknown"));
    assert_eq!(doe.column("overall").unwrap().get(0).unwrap(), AnyValue::Float64(60.0));
}

#[test]
fn test_report_ranks_nationalities() {
    let mut sink = RecordingSink::default();
    let summary = run_report(&report_config(IMPORTED.workspace.db_uri()), &mut sink).unwrap();

    let ranked: Vec<_> = summary
        .top_nationalities
        .iter()
        .map(|e| (e.label.as_str(), e.count))
        .collect();
    assert_eq!(
        ranked,
        vec![("Germany", 2), ("France", 2), ("Unknown", 1), ("Argentina", 1)]
    );

    assert_eq!(summary.players, 6);
    assert_eq!(sink.charts.len(), 1);
    assert_eq!(sink.charts[0].title, "Top 20 Nationalities by Player Count");
}

#[test]
fn test_report_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = report_config(IMPORTED.workspace.db_uri());
    config.chart_path = dir.path().join("nationality_distribution.svg");
    config.top_n = 2;

    let mut sink = SvgChart::new(&config.chart_path);
    let summary = run_report(&config, &mut sink).unwrap();

    assert_eq!(summary.top_nationalities.len(), 2);
    let svg = std::fs::read_to_string(&config.chart_path).unwrap();
    assert!(svg.contains("Germany"));
    assert!(!svg.contains("Argentina"));
}

#[test]
fn test_report_on_empty_store() {
    let workspace = Workspace::new("player_id,short_name,long_name,player_positions,overall,potential\n", TEAMS_CSV);
    run_import(&workspace.import_config(), &mut SilentUi::new()).unwrap();

    let mut sink = RecordingSink::default();
    let summary = run_report(&report_config(workspace.db_uri()), &mut sink).unwrap();
    assert_eq!(summary.players, 0);
    assert!(summary.top_nationalities.is_empty());
}

#[test]
fn test_report_without_schema_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");
    rusqlite::Connection::open(&path).unwrap();

    let err = run_report(&report_config(format!("sqlite://{}", path.display())), &mut RecordingSink::default())
        .unwrap_err();
    assert!(matches!(err, EtlError::Query(_)));
}

#[test]
fn test_report_on_missing_store_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never-imported.db");

    let err = run_report(&report_config(format!("sqlite://{}", path.display())), &mut RecordingSink::default())
        .unwrap_err();
    assert!(matches!(err, EtlError::Connection { .. }));
    assert!(!path.exists());
}
