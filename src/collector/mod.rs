/// Collector module
///
/// This module groups all logic responsible for:
/// - Fetching vacancy pages for a language
/// - Turning vacancies into salary estimates
/// - Maintaining the running per-language summary
///
/// The collector layer sits between:
/// - Source adapters (HeadHunter, SuperJob)
/// - The reporter (output layer)
///
/// Design notes:
/// - Source-specific logic MUST NOT live here
/// - HTTP is reached only through the `PageFetcher` trait
pub mod aggregator;
pub mod fetch;
pub mod runner;
