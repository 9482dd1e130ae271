use anyhow::{bail, Result};
use serde_json::Value;

use crate::{
    config::SourceConfig,
    schema::{FoundPolicy, SalaryBounds, VacancyPage},
    util,
};

use super::adapter::VacancySource;

const ENDPOINT: &str = "https://api.hh.ru/vacancies";

const DEFAULT_TITLE: &str = "Статистика по сайту HeadHunter, Moscow";
const DEFAULT_CURRENCY: &str = "RUR";
const DEFAULT_SEARCH_TEMPLATE: &str = "программист {language}";
const DEFAULT_AREA: &str = "1";
const DEFAULT_PERIOD_DAYS: u32 = 30;

/// HeadHunter (api.hh.ru) adapter
///
/// Request:
/// - `text`, `area`, `period`, `page`, `per_page`
///
/// Response:
/// - `items`: vacancies, salary nested under `salary`
/// - `found`: total number of matches
/// - `pages`: total number of pages
///
/// Pagination ends once the zero-based page index reaches `pages`.
pub struct HeadHunterSource {
    title: String,
    currency: String,
    search_template: String,
    area: String,
    period_days: u32,
    found_policy: FoundPolicy,
}

impl HeadHunterSource {
    pub fn new(cfg: &SourceConfig) -> Self {
        Self {
            title: cfg.title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            currency: cfg.currency.clone().unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            search_template: cfg
                .search_template
                .clone()
                .unwrap_or_else(|| DEFAULT_SEARCH_TEMPLATE.to_string()),
            area: cfg.region.clone().unwrap_or_else(|| DEFAULT_AREA.to_string()),
            period_days: cfg.search_period_days.unwrap_or(DEFAULT_PERIOD_DAYS),
            found_policy: cfg.found_policy.unwrap_or(FoundPolicy::LastReported),
        }
    }
}

impl VacancySource for HeadHunterSource {
    fn name(&self) -> &'static str {
        "headhunter"
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn endpoint(&self) -> &'static str {
        ENDPOINT
    }

    fn currency(&self) -> &str {
        &self.currency
    }

    fn found_policy(&self) -> FoundPolicy {
        self.found_policy
    }

    fn build_query(&self, language: &str, page: u32, per_page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("text", util::search_phrase(&self.search_template, language)),
            ("area", self.area.clone()),
            ("period", self.period_days.to_string()),
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ]
    }

    fn parse_page(&self, mut body: Value, page: u32) -> Result<VacancyPage> {
        let items = match body.get_mut("items").map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => bail!("headhunter response has no `items` list"),
        };

        let pages = util::count(body.get("pages")).unwrap_or(0);

        Ok(VacancyPage {
            items,
            found: util::count(body.get("found")).unwrap_or(0),
            has_more: u64::from(page) + 1 < pages,
        })
    }

    fn extract_bounds(&self, vacancy: &Value) -> Option<SalaryBounds> {
        // `salary` is null for vacancies without a published range
        let salary = vacancy.get("salary").filter(|s| s.is_object())?;

        if salary.get("currency")?.as_str()? != self.currency {
            return None;
        }

        Some(SalaryBounds::new(
            util::salary_bound(salary.get("from")),
            util::salary_bound(salary.get("to")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source() -> HeadHunterSource {
        HeadHunterSource::new(&SourceConfig::named("headhunter"))
    }

    #[test]
    fn query_uses_moscow_defaults() {
        let query = source().build_query("Python", 3, 100);

        assert_eq!(
            query,
            vec![
                ("text", "программист Python".to_string()),
                ("area", "1".to_string()),
                ("period", "30".to_string()),
                ("page", "3".to_string()),
                ("per_page", "100".to_string()),
            ]
        );
    }

    #[test]
    fn config_overrides_defaults() {
        let mut cfg = SourceConfig::named("headhunter");
        cfg.region = Some("2".to_string());
        cfg.search_period_days = Some(7);
        cfg.title = Some("HH SPb".to_string());
        cfg.found_policy = Some(FoundPolicy::Accumulated);

        let source = HeadHunterSource::new(&cfg);
        let query = source.build_query("Go", 0, 50);

        assert!(query.contains(&("area", "2".to_string())));
        assert!(query.contains(&("period", "7".to_string())));
        assert_eq!(source.title(), "HH SPb");
        assert_eq!(source.found_policy(), FoundPolicy::Accumulated);
    }

    #[test]
    fn page_count_drives_pagination() {
        let body = json!({ "items": [{}, {}], "found": 250, "pages": 3 });
        let source = source();

        let first = source.parse_page(body.clone(), 0).unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.found, 250);
        assert!(first.has_more);

        assert!(source.parse_page(body.clone(), 1).unwrap().has_more);
        assert!(!source.parse_page(body, 2).unwrap().has_more);
    }

    #[test]
    fn page_without_items_is_an_error() {
        let body = json!({ "found": 1, "pages": 1 });
        assert!(source().parse_page(body, 0).is_err());
    }

    #[test]
    fn bounds_require_matching_currency() {
        let source = source();
        let rub = json!({ "salary": { "from": 100, "to": null, "currency": "RUR" } });
        let usd = json!({ "salary": { "from": 100, "to": 200, "currency": "USD" } });
        let lower = json!({ "salary": { "from": 100, "to": 200, "currency": "rur" } });

        assert_eq!(
            source.extract_bounds(&rub),
            Some(SalaryBounds::new(Some(100.0), None))
        );
        assert_eq!(source.extract_bounds(&usd), None);
        assert_eq!(source.extract_bounds(&lower), None);
    }

    #[test]
    fn vacancies_without_salary_are_excluded() {
        let source = source();

        assert_eq!(source.extract_bounds(&json!({ "salary": null })), None);
        assert_eq!(source.extract_bounds(&json!({ "name": "dev" })), None);
        assert_eq!(
            source.extract_bounds(&json!({ "salary": { "from": 1 } })),
            None
        );
    }

    #[test]
    fn configured_currency_replaces_rur() {
        let mut cfg = SourceConfig::named("headhunter");
        cfg.currency = Some("USD".to_string());
        let source = HeadHunterSource::new(&cfg);

        let rub = json!({ "salary": { "from": 100, "to": 200, "currency": "RUR" } });
        let usd = json!({ "salary": { "from": 100, "to": 200, "currency": "USD" } });

        assert_eq!(source.currency(), "USD");
        assert_eq!(source.extract_bounds(&rub), None);
        assert_eq!(
            source.extract_bounds(&usd),
            Some(SalaryBounds::new(Some(100.0), Some(200.0)))
        );
    }
}
