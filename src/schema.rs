use serde::{Deserialize, Serialize};
use serde_json::Value;

// ------------------------------------------------------------
// Salary bounds
// ------------------------------------------------------------
//
// Output of a source's vacancy normalizer.
//
// Both bounds are raw values as reported by the source.
// Zero is kept here and only interpreted as "absent" by the
// salary estimator.
//
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SalaryBounds {
    /// Lower salary bound ("from")
    pub lower: Option<f64>,

    /// Upper salary bound ("to")
    pub upper: Option<f64>,
}

impl SalaryBounds {
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }
}

// ------------------------------------------------------------
// Summary
// ------------------------------------------------------------
//
// Aggregated statistics for one language from one source.
//
// IMPORTANT:
// - `vacancies_processed <= vacancies_found` is NOT enforced.
//   `vacancies_found` is whatever the source reports.
// - `average_salary` is truncated toward zero.
//
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub vacancies_found: u64,
    pub vacancies_processed: u64,
    pub average_salary: i64,
}

/// One row of [`Statistics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSummary {
    pub language: String,

    #[serde(flatten)]
    pub summary: Summary,
}

// ------------------------------------------------------------
// Statistics (language -> Summary)
// ------------------------------------------------------------
//
// Insertion-ordered mapping produced by one collection run.
//
// Order is the order in which languages were requested; the
// reporter prints rows in exactly this order. Serialized as a
// plain array of rows.
//
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Statistics {
    entries: Vec<LanguageSummary>,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a language. A language that is already present is
    /// replaced in place so the mapping keeps one entry per key.
    pub fn insert(&mut self, language: impl Into<String>, summary: Summary) {
        let language = language.into();

        match self.entries.iter_mut().find(|e| e.language == language) {
            Some(entry) => entry.summary = summary,
            None => self.entries.push(LanguageSummary { language, summary }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageSummary> {
        self.entries.iter()
    }
}

// ------------------------------------------------------------
// Vacancy page
// ------------------------------------------------------------
//
// One parsed response page, already reduced to what the
// aggregator needs:
// - raw vacancy records (read-only, never retained past the page)
// - the source-reported "found" count
// - whether another page should be requested
//
#[derive(Debug, Clone, Default)]
pub struct VacancyPage {
    pub items: Vec<Value>,
    pub found: u64,
    pub has_more: bool,
}

// ------------------------------------------------------------
// Found policy
// ------------------------------------------------------------
//
// Sources disagree on what "found" means across pages, so the
// aggregator receives the rule as a value instead of guessing.
//
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoundPolicy {
    /// The total reported by the most recent page wins.
    LastReported,

    /// Per-page reported counts are summed.
    Accumulated,
}
