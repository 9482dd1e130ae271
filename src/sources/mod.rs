//! Vacancy source registry and factory
//!
//! This module provides:
//! - Central registration of all supported job search APIs
//! - A factory function resolving a source from its configuration
//!
//! All source-specific logic must live in dedicated adapter modules.
//! The rest of the application interacts exclusively through the
//! `VacancySource` trait.

pub mod adapter;
pub mod headhunter;
pub mod superjob;

use std::sync::Arc;

use adapter::VacancySource;

use crate::config::SourceConfig;

/// Returns a source adapter for a configuration entry.
///
/// RETURNS:
/// - `Some(Arc<dyn VacancySource>)` if the source is supported
/// - `None` if the name is unknown
///
/// CONTRACT:
/// - `cfg.name` is matched case-insensitively
/// - Credentials are resolved here, once per run
///
pub fn get_source(cfg: &SourceConfig) -> Option<Arc<dyn VacancySource>> {
    match cfg.name.trim().to_ascii_lowercase().as_str() {
        "headhunter" | "hh" => Some(Arc::new(headhunter::HeadHunterSource::new(cfg))),
        "superjob" | "sj" => Some(Arc::new(superjob::SuperJobSource::new(cfg))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_sources() {
        let hh = get_source(&SourceConfig::named("HeadHunter")).unwrap();
        assert_eq!(hh.name(), "headhunter");

        let sj = get_source(&SourceConfig::named("sj")).unwrap();
        assert_eq!(sj.name(), "superjob");
    }

    #[test]
    fn unknown_source_is_none() {
        assert!(get_source(&SourceConfig::named("linkedin")).is_none());
    }
}
