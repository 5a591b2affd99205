//! Closed-form call pricing and bounded implied-volatility inversion.

use ndarray::{Array1, Zip};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use crate::error::{DensityError, Result};
use crate::models::{ImpliedVolPoint, OptionQuote};

static NORMAL: Lazy<Normal> = Lazy::new(|| Normal::new(0.0, 1.0).unwrap());

/// Golden ratio conjugate, the interval-shrink factor of golden-section search.
const INVPHI: f64 = 0.618_033_988_749_894_9;

/// European call value under Black-Scholes.
///
/// When `sigma * sqrt(t)` is zero the d-terms degenerate to a 0/0 pattern.
/// The chosen policy is an explicit closed-form limit, `max(S - K e^(-rt), 0)`,
/// rather than letting NaN propagate. This matches the limiting call value at
/// zero volatility or expiry and keeps the function total over `vol >= 0`,
/// `t >= 0`.
pub fn call_price(s: f64, k: f64, sigma: f64, t: f64, r: f64) -> f64 {
    let denom = sigma * t.sqrt();
    let discounted_strike = k * (-r * t).exp();
    if denom == 0.0 {
        return (s - discounted_strike).max(0.0);
    }
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / denom;
    let d2 = d1 - denom;
    NORMAL.cdf(d1) * s - NORMAL.cdf(d2) * discounted_strike
}

/// Vectorized [`call_price`] over parallel strike and vol arrays.
pub fn call_prices(s: f64, strikes: &Array1<f64>, vols: &Array1<f64>, t: f64, r: f64) -> Array1<f64> {
    Zip::from(strikes)
        .and(vols)
        .map_collect(|&k, &sigma| call_price(s, k, sigma, t, r))
}

/// Tunables for the bounded implied-vol minimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IvSolverConfig {
    /// Lower volatility bound
    pub min_vol: f64,
    /// Upper volatility bound
    pub max_vol: f64,
    /// Convergence tolerance on the bracketing interval width
    pub tolerance: f64,
    /// Iteration budget before reporting a solver failure
    pub max_iterations: usize,
}

impl Default for IvSolverConfig {
    fn default() -> Self {
        Self {
            min_vol: 0.01,
            max_vol: 6.0,
            tolerance: 1e-8,
            max_iterations: 128,
        }
    }
}

/// Invert [`call_price`] for the volatility matching an observed market price.
///
/// Minimizes `|call_price(s, k, vol, t, r) - market_price|` over
/// `[min_vol, max_vol]` by golden-section search; no derivative is required
/// and the objective's kink at the root is harmless to the bracketing update.
/// A minimizer pinned at a bound usually signals a moneyness extreme or a bad
/// quote; it is returned as-is but logged for diagnostics.
pub fn implied_vol(
    market_price: f64,
    s: f64,
    k: f64,
    t: f64,
    r: f64,
    config: &IvSolverConfig,
) -> Result<f64> {
    let objective = |vol: f64| (call_price(s, k, vol, t, r) - market_price).abs();

    let mut a = config.min_vol;
    let mut b = config.max_vol;
    let mut c = b - INVPHI * (b - a);
    let mut d = a + INVPHI * (b - a);
    let mut fc = objective(c);
    let mut fd = objective(d);

    if !fc.is_finite() || !fd.is_finite() {
        return Err(DensityError::SolverFailure {
            strike: k,
            last_vol: 0.5 * (a + b),
        });
    }

    let mut converged = false;
    for _ in 0..config.max_iterations {
        if b - a <= config.tolerance {
            converged = true;
            break;
        }
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INVPHI * (b - a);
            fc = objective(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INVPHI * (b - a);
            fd = objective(d);
        }
    }

    let vol = 0.5 * (a + b);
    if !converged || !objective(vol).is_finite() {
        return Err(DensityError::SolverFailure { strike: k, last_vol: vol });
    }
    if vol - config.min_vol <= config.tolerance || config.max_vol - vol <= config.tolerance {
        debug!(strike = k, vol, "implied vol pinned at solver bound");
    }
    Ok(vol)
}

/// Invert implied vols for a cleaned chain in parallel.
///
/// Each quote is a pure function of `(mid, s, k, t, r)`, so the map carries no
/// shared state. Per-quote failures are returned alongside successes and left
/// to the caller's drop/flag policy.
pub fn batch_implied_vol(
    quotes: &[OptionQuote],
    s: f64,
    t: f64,
    r: f64,
    config: &IvSolverConfig,
) -> Vec<Result<ImpliedVolPoint>> {
    quotes
        .par_iter()
        .map(|quote| {
            implied_vol(quote.mid_price(), s, quote.strike, t, r, config).map(|vol| {
                ImpliedVolPoint {
                    strike: quote.strike,
                    implied_vol: vol,
                }
            })
        })
        .collect()
}
