use serde::{Deserialize, Serialize};

/// Implied volatility recovered for a single cleaned quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpliedVolPoint {
    pub strike: f64,
    pub implied_vol: f64,
}

/// Risk-neutral density on a dense strike grid.
///
/// `strikes` is strictly increasing with unit step and `pdf` has the same
/// length. The curve is not normalized; it need not integrate to one and
/// consumers requiring a true probability density must renormalize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityResult {
    pub strikes: Vec<f64>,
    pub pdf: Vec<f64>,
}

impl DensityResult {
    pub fn len(&self) -> usize {
        self.strikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_result_round_trips_through_json() {
        let result = DensityResult {
            strikes: vec![80.0, 81.0, 82.0],
            pdf: vec![0.01, 0.02, 0.01],
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: DensityResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
