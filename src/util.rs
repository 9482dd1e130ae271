//! Utility helpers shared by all vacancy sources.
//!
//! IMPORTANT:
//! - No source-specific business logic should live here.
//! - Everything in this module must stay pure and deterministic.
//!

use serde_json::Value;

/// Placeholder replaced by the language name in search phrase templates.
pub const LANGUAGE_PLACEHOLDER: &str = "{language}";

/// Builds the search phrase for a language.
///
/// Examples:
/// - ("программист {language}", "Python") -> "программист Python"
/// - ("Программист {language}", "C#")     -> "Программист C#"
///
/// A template without the placeholder gets the language appended,
/// so a misconfigured template still searches for the language.
pub fn search_phrase(template: &str, language: &str) -> String {
    if template.contains(LANGUAGE_PLACEHOLDER) {
        template.replace(LANGUAGE_PLACEHOLDER, language)
    } else {
        format!("{} {}", template.trim_end(), language)
    }
}

/// Reads a salary bound from a JSON field.
///
/// Only JSON numbers count. `null`, strings, booleans and
/// nested values are treated as missing, never as an error.
pub fn salary_bound(value: Option<&Value>) -> Option<f64> {
    value?.as_f64()
}

/// Reads a non-negative count from a JSON field (`found`, `total`, `pages`).
pub fn count(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64))
}
