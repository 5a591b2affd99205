//! Risk-neutral density extraction via Breeden-Litzenberger.

use ndarray::Array1;
use tracing::debug;

use crate::error::{DensityError, Result};
use crate::models::{DensityResult, ImpliedVolPoint};
use crate::utils::black_scholes::call_prices;
use crate::utils::spline::CubicSpline;

/// Central-difference gradient over a uniform grid.
///
/// Interior points use both neighbours; the edges fall back to one-sided
/// first-order differences, so edge derivatives are estimates of plain
/// accuracy only.
fn gradient(values: &Array1<f64>, step: f64) -> Array1<f64> {
    let n = values.len();
    let mut out = Array1::zeros(n);
    out[0] = (values[1] - values[0]) / step;
    out[n - 1] = (values[n - 1] - values[n - 2]) / step;
    for i in 1..n - 1 {
        out[i] = (values[i + 1] - values[i - 1]) / (2.0 * step);
    }
    out
}

/// Estimate the risk-neutral PDF from per-strike implied vols.
///
/// Fits a vol smile through the points, reprices calls on a unit-step strike
/// grid from `floor(min strike)` up to (excluding) the max strike, and takes
/// the discounted second strike-derivative of the call curve:
/// `pdf(K) = e^(rt) * C''(K)`.
///
/// Duplicate strikes keep their first occurrence after a stable sort. The
/// output is not normalized and the grid beyond the observed strikes relies
/// on spline extrapolation of the smile.
pub fn estimate_density(points: &[ImpliedVolPoint], s: f64, t: f64, r: f64) -> Result<DensityResult> {
    let mut sorted: Vec<ImpliedVolPoint> = points.to_vec();
    sorted.sort_by(|a, b| {
        a.strike
            .partial_cmp(&b.strike)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.dedup_by(|next, first| next.strike == first.strike);

    let strikes: Vec<f64> = sorted.iter().map(|p| p.strike).collect();
    let vols: Vec<f64> = sorted.iter().map(|p| p.implied_vol).collect();
    let smile = CubicSpline::new(strikes, vols)?;

    let (k_min, k_max) = smile.domain();
    let start = k_min.floor();
    let grid_len = (k_max - start).ceil() as usize;
    if grid_len < 3 {
        return Err(DensityError::Interpolation(format!(
            "strike range [{start}, {k_max}) too narrow for differentiation"
        )));
    }
    let grid = Array1::from_iter((0..grid_len).map(|i| start + i as f64));
    let grid_vols = grid.mapv(|k| smile.value(k));

    let calls = call_prices(s, &grid, &grid_vols, t, r);
    let first_deriv = gradient(&calls, 1.0);
    let second_deriv = gradient(&first_deriv, 1.0);

    let discount = (r * t).exp();
    let pdf = second_deriv.mapv(|d| discount * d);

    if let Some(i) = pdf.iter().position(|v| !v.is_finite()) {
        return Err(DensityError::NumericDegeneracy(format!(
            "non-finite pdf value at strike {}",
            grid[i]
        )));
    }

    debug!(points = sorted.len(), grid = grid_len, "estimated risk-neutral density");
    Ok(DensityResult {
        strikes: grid.to_vec(),
        pdf: pdf.to_vec(),
    })
}
