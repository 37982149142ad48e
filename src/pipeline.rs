//! The ETL run: fetch, then reshape if the JSON document is present

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetcher::Fetcher;
use crate::provider::DatasetClient;
use crate::reshaper::reshape_if_present;
use crate::types::{DatasetRef, EtlReport, ReshapeOutcome};
use tracing::{error, info, warn};

/// Run the whole pipeline with an authenticated client
///
/// Fetch errors are returned. Reshape errors are logged and recorded in the
/// report as [`ReshapeOutcome::Failed`]; the run itself still succeeds.
pub async fn run_etl<C: DatasetClient>(config: &Config, client: C) -> Result<EtlReport> {
    config.validate()?;

    let dataset = DatasetRef::new(config.dataset.as_str());
    info!(%dataset, "dataset to download");
    info!(output_dir = ?config.output_dir, "output directory");

    let fetched = Fetcher::new(client)
        .fetch(&dataset, &config.output_dir)
        .await?;

    let json_path = config.json_path();
    let style = config.record_style;
    let json_owned = json_path.clone();
    let result = tokio::task::spawn_blocking(move || reshape_if_present(&json_owned, style))
        .await
        .map_err(|e| Error::Io(std::io::Error::other(format!("reshape task failed: {}", e))))?;

    let reshape = match result {
        None => {
            info!(path = ?json_path, "JSON file not present, skipping fix");
            ReshapeOutcome::Skipped
        }
        Some(Ok(summary)) => ReshapeOutcome::Reshaped {
            output: summary.output,
            records: summary.records,
        },
        Some(Err(e)) => {
            if e.is_not_found() {
                warn!(error = %e, "JSON file not found, skipping fix");
            } else {
                error!(error = %e, "failed to fix JSON file; it was left untouched");
            }
            ReshapeOutcome::Failed {
                reason: e.to_string(),
            }
        }
    };

    Ok(EtlReport {
        dataset,
        output_dir: config.output_dir.clone(),
        downloaded: fetched.downloaded,
        listing: fetched.listing,
        reshape,
    })
}
