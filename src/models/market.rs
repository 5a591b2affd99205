use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DensityError, Result};

/// Risk-free rate used when the caller does not supply one.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Per-date market parameters for the pricing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    /// Underlying spot price
    pub spot: f64,
    /// Time to maturity as an ACT/365 year fraction
    pub time_to_maturity: f64,
    /// Continuously compounded risk-free rate
    pub risk_free_rate: f64,
    pub observation_date: NaiveDate,
    pub maturity_date: NaiveDate,
}

impl MarketContext {
    /// Build a context from an observation date and a fixed maturity.
    ///
    /// `risk_free_rate` falls back to [`DEFAULT_RISK_FREE_RATE`] when `None`.
    pub fn new(
        spot: f64,
        observation_date: NaiveDate,
        maturity_date: NaiveDate,
        risk_free_rate: Option<f64>,
    ) -> Result<Self> {
        if !(spot > 0.0) {
            return Err(DensityError::DataQuality(format!(
                "spot price must be positive, got {spot}"
            )));
        }
        let days = (maturity_date - observation_date).num_days();
        if days < 0 {
            return Err(DensityError::DataQuality(format!(
                "maturity {maturity_date} precedes observation date {observation_date}"
            )));
        }

        Ok(Self {
            spot,
            time_to_maturity: days as f64 / 365.0,
            risk_free_rate: risk_free_rate.unwrap_or(DEFAULT_RISK_FREE_RATE),
            observation_date,
            maturity_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn year_fraction_is_act_365() {
        let ctx =
            MarketContext::new(5500.0, date(2025, 4, 8), date(2025, 5, 1), None).unwrap();
        assert!((ctx.time_to_maturity - 23.0 / 365.0).abs() < 1e-12);
        assert_eq!(ctx.risk_free_rate, DEFAULT_RISK_FREE_RATE);
    }

    #[test]
    fn explicit_rate_overrides_default() {
        let ctx =
            MarketContext::new(100.0, date(2025, 4, 8), date(2025, 5, 1), Some(0.05)).unwrap();
        assert_eq!(ctx.risk_free_rate, 0.05);
    }

    #[test]
    fn zero_time_to_maturity_is_allowed() {
        let ctx = MarketContext::new(100.0, date(2025, 5, 1), date(2025, 5, 1), None).unwrap();
        assert_eq!(ctx.time_to_maturity, 0.0);
    }

    #[test]
    fn rejects_non_positive_spot_and_inverted_dates() {
        assert!(MarketContext::new(0.0, date(2025, 4, 8), date(2025, 5, 1), None).is_err());
        assert!(MarketContext::new(100.0, date(2025, 5, 2), date(2025, 5, 1), None).is_err());
    }
}
