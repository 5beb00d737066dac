//! Parish Search CLI
//!
//! Search parish content from the terminal.
//!
//! # Usage
//!
//! ```bash
//! parish-search search "type:file year:2024 roof repair" [--sort relevance] [--json]
//! parish-search explain "doctype:minutes before:2024-06 budget"
//! parish-search health
//! parish-search config
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/parish-search/config.toml)
//! 3. Environment variables (PARISH_SEARCH__*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use search_cli::{
    check_health, explain, init_tracing, load_settings, run_search, show_config, Cli, Commands,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    init_tracing(&settings)?;

    match &cli.command {
        Commands::Search(args) => run_search(&settings, args).await?,
        Commands::Explain(args) => explain(&settings, args)?,
        Commands::Health => check_health(&settings).await?,
        Commands::Config => show_config(&settings)?,
    }

    Ok(())
}
