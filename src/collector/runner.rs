use std::sync::atomic::Ordering;

use anyhow::{Context, Result};

use crate::{
    config::CollectionConfig,
    metrics::METRICS,
    schema::{Statistics, Summary},
    sources::adapter::VacancySource,
};

use super::aggregator::{tally_page, SalaryAggregator};
use super::fetch::{PageFetcher, PageRequest};

/// Collects statistics for every language of one source.
///
/// Languages are processed strictly one after another, in the given
/// order, which is also the row order of the returned `Statistics`.
///
/// The first failed language aborts the whole source; no partial
/// statistics are returned.
pub async fn collect_source(
    source: &dyn VacancySource,
    fetcher: &dyn PageFetcher,
    settings: &CollectionConfig,
    languages: &[String],
) -> Result<Statistics> {
    let mut statistics = Statistics::new();

    for language in languages {
        let summary = collect_language(source, fetcher, settings, language).await?;
        statistics.insert(language.as_str(), summary);
    }

    Ok(statistics)
}

/// Pages through all vacancies of one language and returns its `Summary`.
///
/// LOOP:
/// - fetch page `n` (zero-based), parse it
/// - tally its vacancies and merge into the running summary
/// - continue while the source reports more pages
///
/// TERMINATION:
/// - the source's own pagination signal
/// - `settings.max_pages`, as a safety stop
///
/// ERRORS:
/// - A failed fetch or an unusable page aborts with the request
///   context (source, language, page) attached
///
pub async fn collect_language(
    source: &dyn VacancySource,
    fetcher: &dyn PageFetcher,
    settings: &CollectionConfig,
    language: &str,
) -> Result<Summary> {
    log::info!("[{}] collecting {} ({})", source.name(), language, source.currency());

    let mut aggregator = SalaryAggregator::new(source.found_policy());
    let mut page: u32 = 0;

    loop {
        let request = PageRequest {
            endpoint: source.endpoint(),
            query: source.build_query(language, page, settings.vacancies_per_page),
            headers: source.headers(),
        };

        let body = fetcher
            .fetch(&request)
            .await
            .inspect_err(|_| {
                METRICS.request_errors.fetch_add(1, Ordering::Relaxed);
            })
            .with_context(|| {
                format!("{}: request for {} (page {}) failed", source.name(), language, page)
            })?;

        let vacancies = source.parse_page(body, page).with_context(|| {
            format!("{}: unusable page {} for {}", source.name(), page, language)
        })?;

        METRICS.pages_fetched.fetch_add(1, Ordering::Relaxed);

        let tally = tally_page(source, &vacancies, settings.salary);
        aggregator.merge(vacancies.found, tally);

        log::debug!(
            "[{}] {} page {}: items={} processed={} found={}",
            source.name(),
            language,
            page,
            vacancies.items.len(),
            tally.processed,
            vacancies.found,
        );

        page += 1;

        if !vacancies.has_more {
            break;
        }

        if page >= settings.max_pages {
            log::warn!(
                "[{}] {}: stopping after {} pages (max_pages)",
                source.name(),
                language,
                page
            );
            break;
        }
    }

    let summary = aggregator.summary();
    METRICS.languages_completed.fetch_add(1, Ordering::Relaxed);

    log::info!(
        "[{}] {}: found={} processed={} average={}",
        source.name(),
        language,
        summary.vacancies_found,
        summary.vacancies_processed,
        summary.average_salary
    );

    Ok(summary)
}
