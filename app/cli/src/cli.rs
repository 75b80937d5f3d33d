//! Command-line arguments.

use crate::config::{self, AppConfig};
use crate::repl::Repl;
use anyhow::{Result, anyhow};
use clap::Parser;
use sage_dispatch::SearchMode;
use std::path::PathBuf;

/// Chat assistant with interchangeable AI backends and a web fallback.
#[derive(Debug, Parser)]
#[command(name = "sage", version, about)]
pub struct Cli {
    /// Path to the configuration file (defaults to ~/.sage/config.json).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Initial search mode: ai, web, or both.
    #[arg(long, default_value = "both")]
    pub mode: String,
}

impl Cli {
    /// Load configuration and run the REPL.
    pub async fn run(self) -> Result<()> {
        let path = self.config.unwrap_or_else(config::default_path);
        let config = AppConfig::load(&path);
        let mode: SearchMode = self.mode.parse().map_err(|e: String| anyhow!(e))?;

        Repl::new(config, path, mode)?.run().await
    }
}
