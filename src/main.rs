//! kaggle-etl command line
//!
//! `kaggle-etl [DATASET OUTPUT_DIR]`: with no arguments the default dataset is
//! fetched into `./data`.

use anyhow::Context;
use clap::Parser;
use kaggle_etl::config::{
    Config, DEFAULT_API_BASE, DEFAULT_DATASET, DEFAULT_JSON_FILENAME, DEFAULT_OUTPUT_DIR,
    ProviderConfig, RecordStyle,
};
use kaggle_etl::{KaggleClient, ReshapeOutcome, run_etl};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Download a Kaggle dataset and convert its JSON document to NDJSON
#[derive(Parser, Debug)]
#[command(name = "kaggle-etl", version, about, long_about = None)]
struct Cli {
    /// Dataset reference, e.g. "zynicide/wine-reviews"
    #[arg(requires = "output_dir")]
    dataset: Option<String>,

    /// Directory to extract the dataset into
    #[arg(requires = "dataset")]
    output_dir: Option<PathBuf>,

    /// JSON document to reshape, relative to the output directory
    #[arg(long, default_value = DEFAULT_JSON_FILENAME)]
    json_file: String,

    /// Kaggle API base URL
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Download request timeout in seconds
    #[arg(long, default_value_t = 300)]
    timeout_secs: u64,

    /// Write records without spaces after ':' and ','
    #[arg(long)]
    compact: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            dataset: self.dataset.unwrap_or_else(|| DEFAULT_DATASET.to_string()),
            output_dir: self
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            json_filename: self.json_file,
            record_style: if self.compact {
                RecordStyle::Compact
            } else {
                RecordStyle::Spaced
            },
            provider: ProviderConfig {
                api_base: self.api_base,
                timeout: Duration::from_secs(self.timeout_secs),
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.into_config();
    // Report bad settings before credentials are looked up
    config.validate()?;

    let client =
        KaggleClient::authenticate(&config.provider).context("Kaggle authentication failed")?;
    let report = run_etl(&config, client)
        .await
        .with_context(|| format!("failed to fetch dataset '{}'", config.dataset))?;

    if let ReshapeOutcome::Reshaped { output, records } = &report.reshape {
        tracing::info!(?output, records, "done");
    }

    Ok(())
}
