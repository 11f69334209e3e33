//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Optical deal export CLI
#[derive(Parser, Debug)]
#[command(name = "optical-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the Optical API (overrides OPTICAL_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token (overrides OPTICAL_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Upload folder name (default: Reports)
    #[arg(long, global = true)]
    pub folder: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the export and upload the CSV to the backend
    Run,

    /// Fetch and serialize the CSV without uploading
    Preview {
        /// Write the CSV to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start HTTP trigger mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}
