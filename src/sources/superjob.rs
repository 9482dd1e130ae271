use anyhow::{bail, Result};
use serde_json::Value;

use crate::{
    config::SourceConfig,
    schema::{FoundPolicy, SalaryBounds, VacancyPage},
    util,
};

use super::adapter::VacancySource;

const ENDPOINT: &str = "https://api.superjob.ru/2.0/vacancies/";
const API_KEY_HEADER: &str = "X-Api-App-Id";

const DEFAULT_TITLE: &str = "Статистика по сайту SuperJob Moscow";
const DEFAULT_CURRENCY: &str = "rub";
const DEFAULT_SEARCH_TEMPLATE: &str = "Программист {language}";
const DEFAULT_TOWN: &str = "4";
const DEFAULT_CATALOGUE: u32 = 48;
const DEFAULT_API_KEY_ENV: &str = "SJ_API_KEY";

/// SuperJob (api.superjob.ru) adapter
///
/// Request:
/// - header `X-Api-App-Id` carries the application key
/// - `town`, `catalogues`, `keyword`, `page`, `count`
///
/// Response:
/// - `objects`: vacancies, salary fields at top level
/// - `total`: total number of matches
/// - `more`: whether another page exists
///
/// NOTE:
/// SuperJob reports a missing bound as 0, which the estimator
/// already treats as absent.
pub struct SuperJobSource {
    title: String,
    currency: String,
    search_template: String,
    town: String,
    catalogue: u32,
    found_policy: FoundPolicy,
    api_key: String,
}

impl SuperJobSource {
    /// Builds the adapter, reading the API key from the environment.
    pub fn new(cfg: &SourceConfig) -> Self {
        let key_env = cfg.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV);
        let api_key = std::env::var(key_env).unwrap_or_else(|_| {
            log::warn!("{} is not set, superjob requests will be rejected", key_env);
            String::new()
        });

        Self::with_api_key(cfg, api_key)
    }

    pub fn with_api_key(cfg: &SourceConfig, api_key: String) -> Self {
        Self {
            title: cfg.title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            currency: cfg.currency.clone().unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            search_template: cfg
                .search_template
                .clone()
                .unwrap_or_else(|| DEFAULT_SEARCH_TEMPLATE.to_string()),
            town: cfg.region.clone().unwrap_or_else(|| DEFAULT_TOWN.to_string()),
            catalogue: cfg.catalogue.unwrap_or(DEFAULT_CATALOGUE),
            found_policy: cfg.found_policy.unwrap_or(FoundPolicy::LastReported),
            api_key,
        }
    }
}

impl VacancySource for SuperJobSource {
    fn name(&self) -> &'static str {
        "superjob"
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

    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![(API_KEY_HEADER, self.api_key.clone())]
    }

    fn build_query(&self, language: &str, page: u32, per_page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("town", self.town.clone()),
            ("catalogues", self.catalogue.to_string()),
            ("keyword", util::search_phrase(&self.search_template, language)),
            ("page", page.to_string()),
            ("count", per_page.to_string()),
        ]
    }

    fn parse_page(&self, mut body: Value, _page: u32) -> Result<VacancyPage> {
        let objects = match body.get_mut("objects").map(Value::take) {
            Some(Value::Array(objects)) => objects,
            _ => bail!("superjob response has no `objects` list"),
        };

        Ok(VacancyPage {
            items: objects,
            found: util::count(body.get("total")).unwrap_or(0),
            has_more: body.get("more").and_then(Value::as_bool).unwrap_or(false),
        })
    }

    fn extract_bounds(&self, vacancy: &Value) -> Option<SalaryBounds> {
        if vacancy.get("currency")?.as_str()? != self.currency {
            return None;
        }

        Some(SalaryBounds::new(
            util::salary_bound(vacancy.get("payment_from")),
            util::salary_bound(vacancy.get("payment_to")),
        ))
    }
}
