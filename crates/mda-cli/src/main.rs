//! mda-report: compute the MD&A report for one company from JSON files.
//!
//! Usage:
//!   mda-report --records records.json
//!   mda-report --records companies.json --company acme --benchmarks industry.json
//!   mda-report --records records.json --goals goals.json --format text
//!
//! Valuation multipliers and DCF rates come from `MDA_*` environment variables
//! (a `.env` file is honoured).

mod render;
mod store;

use std::path::PathBuf;

use anyhow::Context;
use mda_core::{BenchmarkProvider, BenchmarkSet, MonthlyRecordProvider};
use mda_metrics::{ExpenseGoal, ValuationConfig};
use mda_narrative::generate_report;

use crate::render::render_text;
use crate::store::{read_json, JsonFileStore};

const DEFAULT_COMPANY: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mda_cli=info,mda_narrative=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let flag = |name: &str| {
        args.iter()
            .position(|a| a == name)
            .and_then(|i| args.get(i + 1))
            .map(|s| s.as_str())
    };

    let Some(records_path) = flag("--records") else {
        usage();
    };
    let company_id = flag("--company").unwrap_or(DEFAULT_COMPANY);
    let format = match flag("--format").unwrap_or("json") {
        "json" => OutputFormat::Json,
        "text" => OutputFormat::Text,
        other => {
            eprintln!("Unknown format '{}'", other);
            usage();
        }
    };

    let config = ValuationConfig::from_env().context("invalid valuation configuration")?;

    let mut store = JsonFileStore::new(records_path);
    if let Some(path) = flag("--benchmarks") {
        store = store.with_benchmarks(path);
    }

    let records = store
        .monthly_records(company_id)
        .await
        .with_context(|| format!("loading records for '{}'", company_id))?;
    let benchmarks = BenchmarkSet::new(store.benchmarks().await.context("loading benchmarks")?);
    let goals: Vec<ExpenseGoal> = match flag("--goals") {
        Some(path) => read_json(&PathBuf::from(path)).await.context("loading expense goals")?,
        None => Vec::new(),
    };

    tracing::info!(
        company_id,
        months = records.len(),
        benchmarks = benchmarks.as_slice().len(),
        goals = goals.len(),
        "generating report"
    );

    let report = generate_report(&records, &benchmarks, &config, &goals);

    tracing::info!(
        strengths = report.analysis.strengths.len(),
        weaknesses = report.analysis.weaknesses.len(),
        issues = report.critical_review.len(),
        "report ready"
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", render_text(company_id, &report)),
    }

    Ok(())
}

fn usage() -> ! {
    eprintln!("Usage:");
    eprintln!("  mda-report --records FILE [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --company ID        Company id when FILE maps ids to series (default: {})", DEFAULT_COMPANY);
    eprintln!("  --benchmarks FILE   Industry benchmarks JSON array");
    eprintln!("  --goals FILE        Expense goals JSON array");
    eprintln!("  --format FMT        json or text (default: json)");
    std::process::exit(1);
}
