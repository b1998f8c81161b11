use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use budget_tracker::api::{allocate_report, run_http_server};
use budget_tracker::core::records_from_columns;
use budget_tracker::report::render_table;

/// Twelve-month budget tracker: splits each month's leftover between
/// investing and saving and reports the savings rate.
#[derive(Debug, Parser)]
#[command(name = "budget-tracker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the web form and JSON API.
    Serve {
        #[arg(long, short, default_value_t = 8080)]
        port: u16,
    },
    /// Compute the allocation table for one year from the command line.
    ///
    /// Each column is a single comma-separated argument so that negative
    /// values reach the input validator instead of being read as flags.
    Report {
        /// Monthly income, Jan..Dec, comma separated.
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        income: Vec<f64>,
        /// Monthly needs (fixed spending), Jan..Dec, comma separated.
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        needs: Vec<f64>,
        /// Monthly wants (discretionary spending), Jan..Dec, comma separated.
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        wants: Vec<f64>,
        /// Print the full report as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

/// Honours `RUST_LOG`, falls back to `info`, and keeps CLI output free of
/// timestamps and targets.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn run_report(income: &[f64], needs: &[f64], wants: &[f64], json: bool) -> Result<String> {
    let records = records_from_columns(income, needs, wants)?;
    let report = allocate_report(&records);
    debug!(months = report.rows.len(), "report built");
    if json {
        Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
    } else {
        Ok(render_table(&report))
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    match Cli::parse().command {
        Command::Serve { port } => {
            run_http_server(port).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Report {
            income,
            needs,
            wants,
            json,
        } => match run_report(&income, &needs, &wants, json) {
            Ok(output) => {
                print!("{output}");
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                eprintln!("error: {err}");
                Ok(ExitCode::FAILURE)
            }
        },
    }
}
