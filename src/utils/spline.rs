//! Natural cubic spline over (strike, implied vol) points.

use crate::error::{DensityError, Result};

/// Minimum number of knots for a cubic fit of the vol smile.
pub const MIN_POINTS: usize = 4;

/// Natural cubic spline with extrapolation outside the knot range.
///
/// Second derivatives vanish at the boundary knots. Queries beyond the
/// observed range evaluate the boundary segment's cubic, so extrapolated
/// tails are continuous but low-confidence by construction; callers trade
/// tail accuracy for a complete strike grid.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at each knot (zero at both ends)
    second_derivs: Vec<f64>,
}

impl CubicSpline {
    /// Fit a natural spline through strictly increasing knots.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(DensityError::Interpolation(format!(
                "knot arrays differ in length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < MIN_POINTS {
            return Err(DensityError::Interpolation(format!(
                "cubic interpolation needs at least {MIN_POINTS} points, got {}",
                xs.len()
            )));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(DensityError::Interpolation(
                "knot strikes must be strictly increasing".to_string(),
            ));
        }

        let second_derivs = Self::solve_second_derivs(&xs, &ys);
        Ok(Self { xs, ys, second_derivs })
    }

    /// Solve the tridiagonal system for knot second derivatives.
    ///
    /// Natural boundary conditions pin the first and last entries to zero;
    /// the interior system is solved by forward elimination and back
    /// substitution.
    fn solve_second_derivs(xs: &[f64], ys: &[f64]) -> Vec<f64> {
        let n = xs.len();
        let mut m = vec![0.0; n];
        let mut upper = vec![0.0; n];
        let mut rhs = vec![0.0; n];

        for i in 1..n - 1 {
            let h_lo = xs[i] - xs[i - 1];
            let h_hi = xs[i + 1] - xs[i];
            let slope_lo = (ys[i] - ys[i - 1]) / h_lo;
            let slope_hi = (ys[i + 1] - ys[i]) / h_hi;

            let diag = 2.0 * (h_lo + h_hi) - h_lo * upper[i - 1];
            upper[i] = h_hi / diag;
            rhs[i] = (6.0 * (slope_hi - slope_lo) - h_lo * rhs[i - 1]) / diag;
        }
        for i in (1..n - 1).rev() {
            m[i] = rhs[i] - upper[i] * m[i + 1];
        }
        m
    }

    /// Index of the segment whose cubic is evaluated at `x`.
    ///
    /// Out-of-range queries clamp to the first or last segment, which is what
    /// extends the boundary cubics into the extrapolation regions.
    fn segment(&self, x: f64) -> usize {
        let pos = self.xs.partition_point(|&knot| knot <= x);
        pos.clamp(1, self.xs.len() - 1) - 1
    }

    /// Evaluate the spline at `x`, extrapolating outside the knot range.
    pub fn value(&self, x: f64) -> f64 {
        let i = self.segment(x);
        let h = self.xs[i + 1] - self.xs[i];
        let lo = self.xs[i + 1] - x;
        let hi = x - self.xs[i];
        let (m0, m1) = (self.second_derivs[i], self.second_derivs[i + 1]);

        m0 * lo.powi(3) / (6.0 * h)
            + m1 * hi.powi(3) / (6.0 * h)
            + (self.ys[i] / h - m0 * h / 6.0) * lo
            + (self.ys[i + 1] / h - m1 * h / 6.0) * hi
    }

    /// Observed knot range `(min, max)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
