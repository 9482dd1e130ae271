// ------------------------------------------------------------
// Module declarations
// ------------------------------------------------------------
//
// Each module represents a well-defined responsibility:
//
// - config:    Configuration structs loaded from JSON
// - schema:    Summary / statistics / page types
// - salary:    Salary estimation from partial ranges
// - util:      Shared helper utilities (search phrase, JSON numbers)
// - sources:   Vacancy source adapters and adapter registry
// - collector: Paging, aggregation and HTTP fetching
// - report:    Table / JSON rendering
// - metrics:   Runtime counters
//
mod collector;
mod config;
mod metrics;
mod report;
mod salary;
mod schema;
mod sources;
mod util;

// ------------------------------------------------------------
// External dependencies
// ------------------------------------------------------------

use anyhow::Context;

use collector::fetch::HttpFetcher;
use collector::runner::collect_source;
use config::Config;
use metrics::METRICS;
use report::render;
use sources::get_source;

use std::fs;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "config.json";
const CONFIG_PATH_ENV: &str = "SALARY_CONFIG";

// ------------------------------------------------------------
// Application entry point
// ------------------------------------------------------------
//
// Responsibilities:
// - Load `.env` (API keys) and initialize logging
// - Load configuration
// - Run every enabled source, one after another
// - Print one report (table or JSON) per source
//
// Any failed request ends the run with a non-zero exit status.
// Tables of sources that already finished stay printed.
//
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    config.validate()?;

    let result = run(&config).await;

    log::info!("{}", METRICS.snapshot());

    result
}

async fn run(config: &Config) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(&config.collection.user_agent)?;

    if config.languages.is_empty() {
        log::warn!("no languages configured, tables will be empty");
    }

    for source_cfg in config.sources.iter().filter(|s| s.enabled) {
        let Some(source) = get_source(source_cfg) else {
            log::error!("Source '{}' is not supported", source_cfg.name);
            continue;
        };

        log::info!("Starting {} collector", source.name());

        let statistics = collect_source(
            source.as_ref(),
            &fetcher,
            &config.collection,
            &config.languages,
        )
        .await
        .inspect_err(|e| log::error!("{} collection aborted: {:#}", source.name(), e))?;

        println!(
            "{}",
            render(config.collection.output, source.title(), &statistics)?
        );
    }

    Ok(())
}

// ------------------------------------------------------------
// Configuration loader
// ------------------------------------------------------------
//
// Reads the JSON configuration into the strongly typed `Config`.
//
// - Path comes from $SALARY_CONFIG, else `config.json`
// - A missing default file means "use built-in defaults"
// - A missing file named explicitly through the env is an error
//
fn load_config() -> anyhow::Result<Config> {
    let explicit = std::env::var(CONFIG_PATH_ENV).ok();
    let path = explicit.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

    if explicit.is_none() && !Path::new(path).exists() {
        log::debug!("{} not found, using built-in defaults", path);
        return Ok(Config::default());
    }

    let data = fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    let cfg = serde_json::from_str(&data).with_context(|| format!("invalid config in {}", path))?;
    Ok(cfg)
}
