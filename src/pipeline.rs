//! Pipeline orchestration
//!
//! Sequences fetch → serialize → publish and reports the outcome. The
//! orchestrator catches nothing: the first stage error propagates to the
//! entry-point adapter, which turns it into a response or exit code.

use crate::config::ExportConfig;
use crate::error::Result;
use crate::fetch::fetch_deals;
use crate::http::OpticalClient;
use crate::publish::publish_csv;
use crate::serialize::deals_to_csv;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Outcome of a successful export run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSummary {
    /// Name of the uploaded file
    pub file_uploaded: String,
    /// Number of records fetched (one CSV row each)
    pub record_count: usize,
}

/// The export pipeline: one instance per run, no shared state
pub struct ExportPipeline {
    config: ExportConfig,
    client: OpticalClient,
}

impl ExportPipeline {
    /// Build a pipeline from a validated configuration
    pub fn new(config: ExportConfig) -> Result<Self> {
        config.validate()?;
        let client = OpticalClient::new(&config)?;
        Ok(Self { config, client })
    }

    /// Run the full export: fetch, serialize, upload.
    ///
    /// The filename is computed from local time at invocation start with
    /// hour granularity, so two runs within the same clock hour replace the
    /// same remote file.
    pub async fn run(&self) -> Result<ExportSummary> {
        let filename = build_filename(&self.config.filename_prefix, Local::now());
        info!("Starting export to {filename}");

        let deals = fetch_deals(&self.client).await?;
        let buffer = deals_to_csv(&deals)?;
        publish_csv(&self.client, &self.config.folder_name, &filename, buffer).await?;

        info!("Export complete: {} records uploaded as {filename}", deals.len());
        Ok(ExportSummary {
            file_uploaded: filename,
            record_count: deals.len(),
        })
    }

    /// Fetch and serialize only, skipping the upload. Used by the CLI
    /// preview command.
    pub async fn preview(&self) -> Result<(Vec<u8>, usize)> {
        let deals = fetch_deals(&self.client).await?;
        let buffer = deals_to_csv(&deals)?;
        Ok((buffer, deals.len()))
    }
}

/// Build the hour-granular export filename: `{prefix}-YYYYMMDD-HHh.csv`
pub fn build_filename(prefix: &str, now: DateTime<Local>) -> String {
    format!("{prefix}-{}h.csv", now.format("%Y%m%d-%H"))
}
