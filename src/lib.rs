// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Optical Export
//!
//! A small, stateless export job for the Optical content API: fetch the
//! `deals` collection, flatten the records into a fixed 21-column table,
//! serialize them to CSV in memory, and upload the file into the `Reports`
//! folder on the same backend (replacing any previous file of the same name).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use optical_export::{ExportConfig, ExportPipeline};
//!
//! #[tokio::main]
//! async fn main() -> optical_export::Result<()> {
//!     let config = ExportConfig::from_env()?;
//!     let pipeline = ExportPipeline::new(config)?;
//!     let summary = pipeline.run().await?;
//!     println!("uploaded {} ({} records)", summary.file_uploaded, summary.record_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! fetch_deals ──► flatten_deal (x N) ──► deals_to_csv ──► publish_csv
//!     GET              pure                in-memory       folder resolve,
//!  items/deals       lookups               CSV buffer      create-or-replace
//! ```
//!
//! Each run is independent and linear; no state survives an invocation
//! except the remote folder and the uploaded file.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the exporter
pub mod error;

/// Runtime configuration
pub mod config;

/// Bearer-token HTTP client for the Optical API
pub mod http;

/// Record fetcher for the `deals` collection
pub mod fetch;

/// Record flattening and notes sanitization
pub mod flatten;

/// In-memory CSV serialization
pub mod serialize;

/// Folder resolution and create-or-replace file upload
pub mod publish;

/// Pipeline orchestration
pub mod pipeline;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ExportConfig;
pub use error::{Error, Result};
pub use pipeline::{ExportPipeline, ExportSummary};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
