//! Command implementations.
//!
//! Each command loads layered settings, applies CLI overrides and runs
//! one call through the search client.

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use search_client::{LooseValue, SearchClient, SearchInput};
use search_types::{SearchOptions, Settings};

use crate::cli::{Cli, SearchArgs};
use crate::output::{format_human, format_json, format_plan};

/// Load configuration and apply CLI overrides (highest precedence).
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(url) = &cli.api_url {
        settings.api_url = url.clone();
    }
    if let Some(level) = &cli.log_level {
        settings.log_level = level.clone();
    }

    Ok(settings)
}

/// Install the tracing subscriber. Logs go to stderr so stdout stays parseable.
pub fn init_tracing(settings: &Settings) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Convert CLI arguments into the caller-facing search input.
pub fn search_input(args: &SearchArgs) -> SearchInput {
    SearchInput {
        query: args.query_text(),
        limit: args.limit.map(LooseValue::Number),
        type_filter: args.type_filter.clone(),
        doctype: args.doctype.clone(),
        year: args.year.map(|y| LooseValue::Number(i64::from(y))),
        sort: Some(args.sort.as_str().to_string()),
        exact_match: Some(LooseValue::Bool(args.exact)),
    }
}

/// Run a search and print the results.
pub async fn run_search(settings: &Settings, args: &SearchArgs) -> Result<()> {
    let client = SearchClient::http(settings).context("Failed to create search client")?;

    let result = match client.handle(search_input(args)).await {
        Ok(result) => result,
        Err(envelope) => bail!("{}", envelope.message),
    };

    if args.json {
        println!("{}", format_json(&result)?);
    } else {
        print!("{}", format_human(&result));
    }
    Ok(())
}

/// Print the compiled engine request without contacting the engine.
pub fn explain(settings: &Settings, args: &SearchArgs) -> Result<()> {
    let options: SearchOptions = search_input(args).to_options(settings.results_per_page);
    let plan = search_query::prepare(&args.query_text(), &options, &settings.content_types());
    debug!(filter = %plan.filter, "Explained query");
    println!("{}", format_plan(&plan)?);
    Ok(())
}

/// Check the engine's health endpoint.
pub async fn check_health(settings: &Settings) -> Result<()> {
    let client = SearchClient::http(settings).context("Failed to create search client")?;
    client.health().await.context("Health check failed")?;
    info!("Health check passed");
    println!("Search server at {} is healthy", settings.base_url());
    Ok(())
}

/// Print the effective settings with the API key masked.
pub fn show_config(settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(&settings.redacted())
        .context("Failed to serialize settings")?;
    println!("{}", json);
    if !settings.is_configured() {
        println!("\nNote: API URL and key are required before searching.");
    }
    Ok(())
}
