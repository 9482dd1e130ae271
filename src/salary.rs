//! Salary estimation.
//!
//! Turns a partial salary range into one representative value.
//!
//! RULES:
//! - both bounds      -> arithmetic mean
//! - only lower bound -> lower * increase factor
//! - only upper bound -> upper * decrease factor
//! - nothing usable   -> None
//!
//! IMPORTANT:
//! - A bound of exactly 0 counts as missing. Sources report "no
//!   value" as 0 (SuperJob) or null (HeadHunter) and both must
//!   behave the same way.
//!

use serde::Deserialize;

use crate::schema::SalaryBounds;

pub const DEFAULT_INCREASE_FACTOR: f64 = 1.2;
pub const DEFAULT_DECREASE_FACTOR: f64 = 0.8;

/// Multipliers applied to one-sided salary ranges.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SalaryFactors {
    /// Applied when only the lower bound is known
    pub increase: f64,

    /// Applied when only the upper bound is known
    pub decrease: f64,
}

impl Default for SalaryFactors {
    fn default() -> Self {
        Self {
            increase: DEFAULT_INCREASE_FACTOR,
            decrease: DEFAULT_DECREASE_FACTOR,
        }
    }
}

pub fn predict_salary(bounds: SalaryBounds, factors: SalaryFactors) -> Option<f64> {
    match (present(bounds.lower), present(bounds.upper)) {
        (Some(lower), Some(upper)) => Some((lower + upper) / 2.0),
        (Some(lower), None) => Some(lower * factors.increase),
        (None, Some(upper)) => Some(upper * factors.decrease),
        (None, None) => None,
    }
}

fn present(bound: Option<f64>) -> Option<f64> {
    bound.filter(|value| *value != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predict(lower: Option<f64>, upper: Option<f64>) -> Option<f64> {
        predict_salary(SalaryBounds::new(lower, upper), SalaryFactors::default())
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("estimate should be present");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn both_bounds_give_the_mean() {
        assert_close(predict(Some(100.0), Some(200.0)), 150.0);
    }

    #[test]
    fn lower_bound_only_is_increased() {
        assert_close(predict(Some(100.0), None), 120.0);
    }

    #[test]
    fn upper_bound_only_is_decreased() {
        assert_close(predict(None, Some(100.0)), 80.0);
    }

    #[test]
    fn missing_bounds_give_no_estimate() {
        assert_eq!(predict(None, None), None);
    }

    #[test]
    fn zero_bounds_count_as_missing() {
        assert_eq!(predict(Some(0.0), Some(0.0)), None);
        assert_eq!(predict(Some(0.0), None), None);
        assert_close(predict(Some(0.0), Some(100.0)), 80.0);
        assert_close(predict(Some(100.0), Some(0.0)), 120.0);
    }

    #[test]
    fn custom_factors_are_applied() {
        let factors = SalaryFactors {
            increase: 1.5,
            decrease: 0.5,
        };

        assert_close(
            predict_salary(SalaryBounds::new(Some(100.0), None), factors),
            150.0,
        );
        assert_close(
            predict_salary(SalaryBounds::new(None, Some(100.0)), factors),
            50.0,
        );
    }

    #[test]
    fn factors_deserialize_with_defaults() {
        let factors: SalaryFactors = serde_json::from_str(r#"{ "increase": 1.3 }"#).unwrap();
        assert_eq!(factors.increase, 1.3);
        assert_eq!(factors.decrease, DEFAULT_DECREASE_FACTOR);
    }
}
