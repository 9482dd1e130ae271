use anyhow::{bail, Result};
use serde::Deserialize;

use crate::salary::SalaryFactors;
use crate::schema::FoundPolicy;

// ------------------------------------------------------------
// Root configuration
// ------------------------------------------------------------
//
// Top-level configuration structure, optionally loaded from
// `config.json`. Every field has a default, so an absent file
// reproduces the stock Moscow / RUB setup.
//
// It defines:
// - Languages to collect, in report order
// - Paging and salary estimation parameters
// - Enabled sources and their request filters
//
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Programming languages, in the order rows are reported
    pub languages: Vec<String>,

    /// Parameters shared by all sources
    pub collection: CollectionConfig,

    /// Sources, processed one after another in this order
    pub sources: Vec<SourceConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: [
                "Python",
                "Java",
                "JavaScript",
                "Ruby",
                "PHP",
                "C++",
                "C#",
                "C",
                "Go",
                "Scala",
                "Swift",
                "TypeScript",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            collection: CollectionConfig::default(),
            sources: vec![
                SourceConfig::named("superjob"),
                SourceConfig::named("headhunter"),
            ],
        }
    }
}

impl Config {
    /// Rejects settings that would make paging meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.collection.vacancies_per_page == 0 {
            bail!("collection.vacancies_per_page must be greater than 0");
        }

        if self.collection.max_pages == 0 {
            bail!("collection.max_pages must be greater than 0");
        }

        if let Some(source) = self.sources.iter().find(|s| s.name.trim().is_empty()) {
            bail!("source entry without a name: {:?}", source);
        }

        Ok(())
    }
}

// ------------------------------------------------------------
// Collection configuration
// ------------------------------------------------------------
//
// Shared by every source.
//
// Notes:
// - `max_pages` is a safety stop only. Real responses end long
//   before it through their own pagination signal.
//
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CollectionConfig {
    /// Page size requested from every source
    pub vacancies_per_page: u32,

    /// Upper limit of pages fetched for one language
    pub max_pages: u32,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Factors for one-sided salary ranges
    pub salary: SalaryFactors,

    /// How each source's statistics are printed
    pub output: OutputFormat,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            vacancies_per_page: 100,
            max_pages: 1_000,
            user_agent: concat!("vacancy-salary-collector/", env!("CARGO_PKG_VERSION")).to_string(),
            salary: SalaryFactors::default(),
            output: OutputFormat::Table,
        }
    }
}

/// Output format of the per-source report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// ASCII table with the source title in the top border
    #[default]
    Table,

    /// One JSON object per source on a single line
    Json,
}

// ------------------------------------------------------------
// Source configuration
// ------------------------------------------------------------
//
// Configuration for a single vacancy source.
//
// Every optional field falls back to the source's own default
// (see the adapter modules). Fields a source has no use for are
// ignored by it.
//
// IMPORTANT:
// - API keys are never stored here, only the name of the
//   environment variable holding them.
//
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// Source identifier ("headhunter", "superjob")
    pub name: String,

    /// Enables or disables this source at runtime
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Report table title
    #[serde(default)]
    pub title: Option<String>,

    /// Currency code vacancies must carry to be counted
    #[serde(default)]
    pub currency: Option<String>,

    /// Search phrase, `{language}` is replaced by the language name
    #[serde(default)]
    pub search_template: Option<String>,

    /// Region filter (HeadHunter `area`, SuperJob `town`)
    #[serde(default)]
    pub region: Option<String>,

    /// Lookback window in days (HeadHunter only)
    #[serde(default)]
    pub search_period_days: Option<u32>,

    /// Catalogue / category filter (SuperJob only)
    #[serde(default)]
    pub catalogue: Option<u32>,

    /// Overrides how the "found" column is computed
    #[serde(default)]
    pub found_policy: Option<FoundPolicy>,

    /// Environment variable holding the API key
    #[serde(default)]
    pub api_key_env: Option<String>,
}

impl SourceConfig {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            enabled: true,
            title: None,
            currency: None,
            search_template: None,
            region: None,
            search_period_days: None,
            catalogue: None,
            found_policy: None,
            api_key_env: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}
