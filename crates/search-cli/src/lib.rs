//! Parish search command-line library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (search, explain, health, config)
//! - `output`: Terminal and JSON formatting

pub mod cli;
pub mod commands;
pub mod output;

pub use cli::{Cli, Commands, SearchArgs};
pub use commands::{check_health, explain, init_tracing, load_settings, run_search, show_config};
