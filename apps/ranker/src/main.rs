use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use ranker::config::Config;
use ranker::ingest::cleaner::DEFAULT_OUTPUT_FILE;
use ranker::llm_client::LlmClient;
use ranker::ranking::batcher::load_candidates;
use ranker::ranking::orchestrator::{rank_candidates, RankingOptions};
use ranker::telemetry::init_tracing;

/// Score cleaned candidates against a job description and print the top matches as JSON.
#[derive(Parser)]
#[command(name = "ranker", version, long_about = None)]
struct Cli {
    /// Job description to rank candidates against.
    job_description: String,

    /// Cleaned candidates file produced by `ranker-preprocess`.
    #[arg(long, env = "RANKER_CANDIDATES", default_value = DEFAULT_OUTPUT_FILE)]
    candidates: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.job_description.trim().is_empty() {
        bail!("A job description must be provided as an argument.");
    }

    // Configuration first: a missing API key stops us before any other work
    let config = Config::from_env()?;
    init_tracing(&config.rust_log);

    info!("Starting ranker v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(&config).context("Failed to build HTTP client")?;
    info!("LLM client initialized (model: {})", llm.model());

    let candidates = load_candidates(&cli.candidates)?;
    let options = RankingOptions::from(&config);
    let ranked = rank_candidates(&llm, &cli.job_description, &candidates, &options).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    ranked
        .serialize(&mut serializer)
        .context("Failed to write ranking to stdout")?;
    out.flush()?;

    Ok(())
}
