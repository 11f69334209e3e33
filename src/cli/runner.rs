//! Command execution

use super::commands::{Cli, Commands};
use super::server;
use crate::config::ExportConfig;
use crate::error::Result;
use crate::pipeline::ExportPipeline;
use std::io::Write;

/// Executes CLI commands
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Execute the selected command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run => self.run_export().await,
            Commands::Preview { output } => self.run_preview(output.as_deref()).await,
            Commands::Serve { port } => {
                let config = self.build_config()?;
                server::serve(config, *port).await
            }
        }
    }

    async fn run_export(&self) -> Result<()> {
        let pipeline = ExportPipeline::new(self.build_config()?)?;
        let summary = pipeline.run().await?;

        let body = serde_json::json!({
            "status": "success",
            "file_uploaded": summary.file_uploaded,
            "record_count": summary.record_count,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        Ok(())
    }

    async fn run_preview(&self, output: Option<&std::path::Path>) -> Result<()> {
        let pipeline = ExportPipeline::new(self.build_config()?)?;
        let (buffer, record_count) = pipeline.preview().await?;

        match output {
            Some(path) => {
                std::fs::write(path, &buffer)?;
                eprintln!("Wrote {record_count} records to {}", path.display());
            }
            None => {
                std::io::stdout().write_all(&buffer)?;
            }
        }
        Ok(())
    }

    /// Build the export config from environment, applying CLI overrides
    fn build_config(&self) -> Result<ExportConfig> {
        let mut config = match (&self.cli.base_url, &self.cli.token) {
            // Fully specified on the command line: no environment needed
            (Some(base_url), Some(token)) => ExportConfig::new(base_url, token),
            _ => {
                let mut config = ExportConfig::from_env()?;
                if let Some(base_url) = &self.cli.base_url {
                    config.base_url = base_url.clone();
                }
                if let Some(token) = &self.cli.token {
                    config.token = token.clone();
                }
                config
            }
        };

        if let Some(folder) = &self.cli.folder {
            config.folder_name = folder.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
