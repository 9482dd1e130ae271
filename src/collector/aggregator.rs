use std::sync::atomic::Ordering;

use crate::{
    metrics::METRICS,
    salary::{predict_salary, SalaryFactors},
    schema::{FoundPolicy, Summary, VacancyPage},
    sources::adapter::VacancySource,
};

/// Salary total and count of a single page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PageTally {
    pub total: f64,
    pub processed: u64,
}

impl PageTally {
    pub fn add(&mut self, estimate: f64) {
        self.total += estimate;
        self.processed += 1;
    }
}

/// Runs every vacancy of a page through the source normalizer and the
/// salary estimator.
///
/// Skipped, in this order:
/// - vacancies in another currency (or without one)
/// - vacancies without a usable estimate
///
/// Only the page total and count leave this function; the vacancy
/// records themselves are not kept.
pub fn tally_page(source: &dyn VacancySource, page: &VacancyPage, factors: SalaryFactors) -> PageTally {
    let mut tally = PageTally::default();

    for vacancy in &page.items {
        METRICS.vacancies_seen.fetch_add(1, Ordering::Relaxed);

        let Some(bounds) = source.extract_bounds(vacancy) else {
            METRICS.vacancies_excluded.fetch_add(1, Ordering::Relaxed);
            log::trace!("[{}] excluded vacancy {}", source.name(), vacancy_id(vacancy));
            continue;
        };

        // an estimate of exactly 0 is as useless as none
        let Some(estimate) = predict_salary(bounds, factors).filter(|e| *e != 0.0) else {
            METRICS.vacancies_unestimated.fetch_add(1, Ordering::Relaxed);
            log::trace!("[{}] no salary for vacancy {}", source.name(), vacancy_id(vacancy));
            continue;
        };

        METRICS.vacancies_processed.fetch_add(1, Ordering::Relaxed);
        tally.add(estimate);
    }

    tally
}

fn vacancy_id(vacancy: &serde_json::Value) -> String {
    vacancy
        .get("id")
        .map(|id| id.to_string())
        .unwrap_or_else(|| "<no id>".to_string())
}

// ------------------------------------------------------------
// Running summary
// ------------------------------------------------------------
//
// Keeps only (found, processed, average) between pages.
//
// The average is updated incrementally:
//
//     new_avg = (old_avg * old_processed + page_total) / new_processed
//
// and left untouched while nothing has been processed, so a
// language without a single usable vacancy reports 0.
//
// Found is merged according to the source's `FoundPolicy`.
//
#[derive(Debug, Clone)]
pub struct SalaryAggregator {
    policy: FoundPolicy,
    found: u64,
    processed: u64,
    average: f64,
}

impl SalaryAggregator {
    pub fn new(policy: FoundPolicy) -> Self {
        Self {
            policy,
            found: 0,
            processed: 0,
            average: 0.0,
        }
    }

    /// Merges one page into the running state.
    pub fn merge(&mut self, page_found: u64, tally: PageTally) {
        self.found = match self.policy {
            FoundPolicy::LastReported => page_found,
            FoundPolicy::Accumulated => self.found.saturating_add(page_found),
        };

        let processed = self.processed + tally.processed;
        if processed > 0 {
            self.average = (self.average * self.processed as f64 + tally.total) / processed as f64;
        }
        self.processed = processed;
    }

    /// Current state as a `Summary`, average truncated toward zero.
    pub fn summary(&self) -> Summary {
        Summary {
            vacancies_found: self.found,
            vacancies_processed: self.processed,
            average_salary: self.average.trunc() as i64,
        }
    }
}
