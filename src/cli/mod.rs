//! CLI module
//!
//! Entry-point adapters around the export pipeline.
//!
//! # Commands
//!
//! - `run` - Execute the export and upload the CSV
//! - `preview` - Fetch and serialize without uploading
//! - `serve` - Start HTTP trigger mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use server::serve;
