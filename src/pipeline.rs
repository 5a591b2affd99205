//! Pure per-date pipeline: clean, invert, estimate.

use tracing::{info, warn};

use crate::config::DensityConfig;
use crate::error::{DensityError, Result};
use crate::models::{DensityResult, ImpliedVolPoint, MarketContext, OptionChain};
use crate::utils::black_scholes::batch_implied_vol;
use crate::utils::probability::estimate_density;

/// Compute the risk-neutral density for one observation date.
///
/// A pure function of its inputs; the caller owns date iteration and
/// display. Quotes whose implied-vol inversion fails are dropped with a
/// warning and the batch continues, while structural failures (bad config,
/// too few points for the smile) abort this date's computation only.
pub fn compute_density(
    config: &DensityConfig,
    chain: &OptionChain,
    market: &MarketContext,
) -> Result<DensityResult> {
    config.validate()?;

    let cleaned = chain.clean(&config.cleaner);
    if cleaned.is_empty() {
        return Err(DensityError::DataQuality(
            "no quotes survived cleaning".to_string(),
        ));
    }

    let inversions = batch_implied_vol(
        &cleaned.quotes,
        market.spot,
        market.time_to_maturity,
        market.risk_free_rate,
        &config.solver,
    );
    let mut points: Vec<ImpliedVolPoint> = Vec::with_capacity(inversions.len());
    for result in inversions {
        match result {
            Ok(point) => points.push(point),
            Err(err) => warn!(%err, "excluding quote from density estimation"),
        }
    }

    let density = estimate_density(
        &points,
        market.spot,
        market.time_to_maturity,
        market.risk_free_rate,
    )?;
    info!(
        date = %market.observation_date,
        quotes = chain.len(),
        solved = points.len(),
        grid = density.len(),
        "computed risk-neutral density"
    );
    Ok(density)
}
