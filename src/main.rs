use anyhow::{Context, Result};
use fifa_etl::{
    cli::{Cli, Commands},
    logging,
    pipeline::{prepare_store, run_import, ImportSummary},
    report::{run_report, SvgChart},
    schema::table_names,
    LogUi, UiApp,
};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let tui = matches!(cli.command, Commands::Import { tui: true, .. });
    logging::init(cli.command.log_file(), tui)?;

    match &cli.command {
        Commands::Import { json, .. } => {
            let config = cli.command.import_config().context("import settings")?;

            let summary = if tui {
                let mut ui = UiApp::new()?;
                let summary = run_import(&config, &mut ui)?;
                ui.finish(&describe_import(&summary))?;
                summary
            } else {
                run_import(&config, &mut LogUi::new())?
            };

            if *json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", describe_import(&summary));
            }
        }

        Commands::Report { json, .. } => {
            let config = cli.command.report_config().context("report settings")?;

            let mut sink = SvgChart::new(&config.chart_path);
            let summary = run_report(&config, &mut sink)?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Top nationalities:\n");
                for entry in &summary.top_nationalities {
                    println!("  {:<30} {}", entry.label, entry.count);
                }
                println!("\nChart written to {:?}", sink.path());
            }
        }

        Commands::CreateSchema { db_uri, .. } => {
            prepare_store(db_uri, &mut LogUi::new())?;
        }

        Commands::ListTables => {
            println!("Tables in load order:\n");
            for name in table_names()? {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}

fn describe_import(summary: &ImportSummary) -> String {
    let tables: Vec<String> = summary
        .loaded
        .iter()
        .map(|(table, rows)| format!("{} {}", rows, table))
        .collect();
    format!(
        "Imported {} rows ({}) in {:.1}s",
        summary.total_rows(),
        tables.join(", "),
        summary.elapsed_secs
    )
}
