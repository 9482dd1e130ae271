use anyhow::Result;
use serde_json::Value;

use crate::schema::{FoundPolicy, SalaryBounds, VacancyPage};

/// VacancySource is the abstraction layer between:
/// - The generic paging / aggregation runtime
/// - Source-specific job search APIs
///
/// Each source implementation must:
/// - Describe its HTTP request (endpoint, headers, query)
/// - Parse a response body into a `VacancyPage`
/// - Extract salary bounds from a single vacancy record
///
/// DESIGN GOALS:
/// - Zero source-specific logic outside adapters
/// - One adapter per source
/// - Adapters never perform network I/O
///
/// THREAD SAFETY:
/// - Must be Send + Sync
///
pub trait VacancySource: Send + Sync {
    /// Canonical source name, matches `sources[].name` in configuration.
    fn name(&self) -> &'static str;

    /// Title printed above the report table.
    fn title(&self) -> &str;

    /// Search endpoint (no query string).
    fn endpoint(&self) -> &'static str;

    /// Target currency. Vacancies in other currencies are excluded.
    fn currency(&self) -> &str;

    /// How the "found" count is merged across pages.
    fn found_policy(&self) -> FoundPolicy;

    /// Extra request headers, e.g. credentials.
    ///
    /// Values are passed through unchecked; a missing or invalid
    /// credential surfaces as an HTTP failure.
    fn headers(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Builds the query parameters for one page.
    ///
    /// PARAMETERS:
    /// - `language`: language name, embedded in the search phrase
    /// - `page`: zero-based page index
    /// - `per_page`: requested page size
    ///
    fn build_query(&self, language: &str, page: u32, per_page: u32) -> Vec<(&'static str, String)>;

    /// Parses a response body into a `VacancyPage`.
    ///
    /// `page` is the zero-based index of the page that was fetched,
    /// needed by sources that signal the end through a page count.
    ///
    /// Fails only when the page itself is unusable (no vacancy list).
    /// Broken individual vacancies are left to `extract_bounds`.
    fn parse_page(&self, body: Value, page: u32) -> Result<VacancyPage>;

    /// Extracts salary bounds from one raw vacancy.
    ///
    /// OUTPUT:
    /// - Some(bounds) if the vacancy's currency equals `currency()`
    ///   (case-sensitive)
    /// - None for any other currency, or when the currency is missing
    ///
    /// IMPORTANT:
    /// - Pure structural extraction, no estimation
    /// - Must never panic on malformed records
    ///
    fn extract_bounds(&self, vacancy: &Value) -> Option<SalaryBounds>;
}
