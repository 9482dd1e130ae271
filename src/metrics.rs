use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;

/// Global runtime metrics for a collection run.
///
/// Purpose:
/// - Track request volume and failures
/// - Track how many vacancies were seen, excluded and counted
///
/// Design:
/// - Lock-free (Atomics)
/// - Observability only, never read by the aggregation itself
#[derive(Default)]
pub struct RuntimeMetrics {
    // Requests
    pub pages_fetched: AtomicUsize,
    pub request_errors: AtomicUsize,

    // Vacancies
    pub vacancies_seen: AtomicUsize,
    pub vacancies_excluded: AtomicUsize,
    pub vacancies_unestimated: AtomicUsize,
    pub vacancies_processed: AtomicUsize,

    // Languages
    pub languages_completed: AtomicUsize,
}

impl RuntimeMetrics {
    /// One-line snapshot, printed at the end of a run.
    pub fn snapshot(&self) -> String {
        format!(
            "[METRICS] pages={} req_err={} seen={} excluded={} unestimated={} processed={} languages={}",
            self.pages_fetched.load(Ordering::Relaxed),
            self.request_errors.load(Ordering::Relaxed),
            self.vacancies_seen.load(Ordering::Relaxed),
            self.vacancies_excluded.load(Ordering::Relaxed),
            self.vacancies_unestimated.load(Ordering::Relaxed),
            self.vacancies_processed.load(Ordering::Relaxed),
            self.languages_completed.load(Ordering::Relaxed),
        )
    }
}

/// Global metrics registry (singleton)
pub static METRICS: Lazy<Arc<RuntimeMetrics>> =
    Lazy::new(|| Arc::new(RuntimeMetrics::default()));
