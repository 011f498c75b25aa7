use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ranker::ingest::cleaner::{preprocess, CleanerOptions, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE};
use ranker::telemetry::init_tracing;

/// Clean a raw candidate spreadsheet into the JSON file `ranker` scores.
#[derive(Parser)]
#[command(name = "ranker-preprocess", version, long_about = None)]
struct Cli {
    /// Raw candidate workbook (.xlsx, .xls, .ods).
    #[arg(default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// Worksheet to read. Defaults to the first sheet.
    #[arg(long)]
    sheet: Option<String>,

    /// Where to write the cleaned records.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Text written for 1.0 in boolean-like numeric columns.
    #[arg(long, default_value = ranker::ingest::cleaner::TRUTHY_TOKEN)]
    truthy_token: String,

    /// Text written for 0.0 in boolean-like numeric columns.
    #[arg(long, default_value = ranker::ingest::cleaner::FALSY_TOKEN)]
    falsy_token: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing("info");

    let options = CleanerOptions {
        truthy_token: cli.truthy_token,
        falsy_token: cli.falsy_token,
        ..CleanerOptions::default()
    };

    preprocess(&cli.input, cli.sheet.as_deref(), &cli.output, &options)
        .with_context(|| format!("Failed to preprocess {}", cli.input.display()))?;

    Ok(())
}
