use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tempfile::NamedTempFile;
use tracing_subscriber::EnvFilter;

use scrapelm_client::{HtmlTextCleaner, OllamaClient, ReqwestFetcher};
use scrapelm_core::sanitize::{DEFAULT_CLOSE_MARKER, DEFAULT_OPEN_MARKER};
use scrapelm_core::{AskService, FetchConfig, FileSink, InferenceConfig, ReasoningStripper};

#[derive(Parser, Debug)]
#[command(
    name = "scrapelm",
    version,
    about = "Scrape a web page and ask a local Ollama model about it"
)]
struct Cli {
    /// URL of the page to scrape
    #[arg(short, long)]
    url: String,

    /// Ollama model to use (e.g. "llama3", "phi3", "deepseek-r1")
    #[arg(short, long, env = "SCRAPELM_MODEL")]
    model: String,

    /// Question to answer from the page text
    #[arg(short, long)]
    prompt: String,

    /// Directory for the intermediate scraped-text file (defaults to the OS temp dir)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// File to save the final answer to (defaults to stdout)
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Keep the scraped-text file instead of removing it on exit
    #[arg(long, default_value_t = false)]
    keep_text: bool,

    /// Opening marker of reasoning segments to strip from the answer
    #[arg(long, default_value = DEFAULT_OPEN_MARKER)]
    think_open: String,

    /// Closing marker of reasoning segments to strip from the answer
    #[arg(long, default_value = DEFAULT_CLOSE_MARKER)]
    think_close: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries only the answer.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("scrapelm=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cmd_ask(cli).await
}

async fn cmd_ask(cli: Cli) -> Result<()> {
    let fetch_config = FetchConfig::from_env()?;
    let inference_config = InferenceConfig::from_env()?;
    tracing::debug!(endpoint = %inference_config.generate_url(), "Resolved inference endpoint");

    let stripper = ReasoningStripper::new(&cli.think_open, &cli.think_close)?;
    let fetcher =
        ReqwestFetcher::from_config(&fetch_config).context("Failed to create HTTP client")?;
    let inference =
        OllamaClient::new(&inference_config).context("Failed to create inference client")?;

    // Removed on drop, on every exit path, unless --keep-text persists it.
    let scratch = open_scratch_file(cli.output_dir.as_deref())?;

    let svc = AskService::with_artifact(
        fetcher,
        HtmlTextCleaner::new(),
        inference,
        stripper,
        FileSink::new(scratch.path()),
        cli.model.clone(),
    );

    let result = svc.ask(&cli.url, &cli.prompt).await?;

    tracing::info!(
        content_hash = %&result.content_hash[..8],
        "Answer complete"
    );

    if cli.keep_text {
        let (_, path) = scratch
            .keep()
            .context("Failed to keep scraped text file")?;
        tracing::info!("Scraped text kept at {}", path.display());
    }

    match &cli.output_file {
        Some(path) => {
            std::fs::write(path, result.answer.as_str())
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            eprintln!("Scraped response saved to: {}", path.display());
        }
        None => println!("{}", result.answer),
    }

    Ok(())
}

/// Create the intermediate `scraped-*.txt` file, in `dir` if given.
fn open_scratch_file(dir: Option<&Path>) -> Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("scraped-").suffix(".txt");

    match dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output dir: {}", dir.display()))?;
            builder
                .tempfile_in(dir)
                .with_context(|| format!("Failed to create temp file in {}", dir.display()))
        }
        None => builder.tempfile().context("Failed to create temp file"),
    }
}
