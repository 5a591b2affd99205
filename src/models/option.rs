use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::CleanerConfig;

/// A single call-option quote from a raw chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    pub strike: f64,
    pub bid: f64,
    pub ask: f64,
}

impl OptionQuote {
    pub fn new(strike: f64, bid: f64, ask: f64) -> Self {
        Self { strike, bid, ask }
    }

    pub fn mid_price(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    /// A quote is usable when the strike is positive and the market is not crossed.
    pub fn is_well_formed(&self) -> bool {
        self.strike > 0.0 && self.bid >= 0.0 && self.ask >= self.bid
    }
}

/// An ordered collection of quotes for one observation date.
///
/// Strikes need not be unique; duplicates are tolerated here and resolved
/// during interpolation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionChain {
    pub quotes: Vec<OptionQuote>,
}

impl OptionChain {
    pub fn new(quotes: Vec<OptionQuote>) -> Self {
        Self { quotes }
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Filter and downsample the chain for implied-vol inversion.
    ///
    /// Quotes inside the dense band `[lower_strike, upper_strike]` are
    /// decimated, keeping every `skip_stride`-th row in original order;
    /// dense regions otherwise dominate the interpolation with redundant
    /// near-duplicate points. Quotes outside the band are kept unchanged
    /// since sparse tails need every data point. Malformed quotes and
    /// quotes with a non-positive mid-price are dropped.
    ///
    /// If `lower_strike > upper_strike` the dense band is empty and every
    /// quote passes through as tail data. The input chain is untouched.
    pub fn clean(&self, config: &CleanerConfig) -> OptionChain {
        let stride = config.skip_stride.max(1);

        let dense = self
            .quotes
            .iter()
            .filter(|q| q.strike >= config.lower_strike && q.strike <= config.upper_strike)
            .step_by(stride);
        let outside = self
            .quotes
            .iter()
            .filter(|q| q.strike < config.lower_strike || q.strike > config.upper_strike);

        let mut kept = Vec::new();
        let mut dropped = 0usize;
        for quote in dense.chain(outside) {
            if !quote.is_well_formed() {
                warn!(
                    strike = quote.strike,
                    bid = quote.bid,
                    ask = quote.ask,
                    "dropping malformed quote"
                );
                dropped += 1;
                continue;
            }
            if quote.mid_price() <= 0.0 {
                debug!(strike = quote.strike, "dropping quote with non-positive mid");
                dropped += 1;
                continue;
            }
            kept.push(*quote);
        }

        debug!(
            input = self.quotes.len(),
            kept = kept.len(),
            dropped,
            "cleaned option chain"
        );
        OptionChain::new(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(lower: f64, upper: f64, stride: usize) -> CleanerConfig {
        CleanerConfig {
            lower_strike: lower,
            upper_strike: upper,
            skip_stride: stride,
        }
    }

    fn chain_with_strikes(strikes: &[f64]) -> OptionChain {
        OptionChain::new(
            strikes
                .iter()
                .map(|&k| OptionQuote::new(k, 1.0, 1.2))
                .collect(),
        )
    }

    #[test]
    fn mid_price_is_average_of_bid_and_ask() {
        let quote = OptionQuote::new(100.0, 2.0, 2.2);
        assert!((quote.mid_price() - 2.1).abs() < 1e-12);
    }

    #[test]
    fn clean_decimates_dense_band_only() {
        let chain = chain_with_strikes(&[90.0, 100.0, 101.0, 102.0, 103.0, 104.0, 120.0]);
        let cleaned = chain.clean(&band(100.0, 104.0, 2));

        // Dense band has 5 rows, stride 2 keeps rows 0, 2, 4.
        let strikes: Vec<f64> = cleaned.quotes.iter().map(|q| q.strike).collect();
        assert!(strikes.contains(&100.0));
        assert!(strikes.contains(&102.0));
        assert!(strikes.contains(&104.0));
        assert!(!strikes.contains(&101.0));
        assert!(!strikes.contains(&103.0));
        // Tail rows are retained unchanged in count.
        assert!(strikes.contains(&90.0));
        assert!(strikes.contains(&120.0));
        assert_eq!(cleaned.len(), 5);
    }

    #[test]
    fn clean_dense_retention_bounded_by_ceil_of_stride() {
        let chain = chain_with_strikes(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0]);
        for stride in 1..10 {
            let cleaned = chain.clean(&band(100.0, 106.0, stride));
            let cap = (7 + stride - 1) / stride;
            assert!(cleaned.len() <= cap, "stride {stride} kept {}", cleaned.len());
        }
    }

    #[test]
    fn clean_stride_beyond_dense_size_keeps_at_most_one() {
        let chain = chain_with_strikes(&[100.0, 101.0, 102.0]);
        let cleaned = chain.clean(&band(100.0, 102.0, 50));
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.quotes[0].strike, 100.0);
    }

    #[test]
    fn clean_inverted_band_passes_everything_through() {
        let chain = chain_with_strikes(&[90.0, 100.0, 110.0]);
        let cleaned = chain.clean(&band(200.0, 100.0, 3));
        assert_eq!(cleaned.len(), 3);
    }

    #[test]
    fn clean_drops_non_positive_mids_and_crossed_quotes() {
        let chain = OptionChain::new(vec![
            OptionQuote::new(90.0, 1.0, 1.2),
            OptionQuote::new(95.0, 0.0, 0.0),  // zero mid
            OptionQuote::new(100.0, 2.0, 1.0), // crossed
            OptionQuote::new(105.0, 0.1, 0.3),
        ]);
        let cleaned = chain.clean(&band(0.0, 0.0, 1));
        assert_eq!(cleaned.len(), 2);
        assert!(cleaned.quotes.iter().all(|q| q.mid_price() > 0.0));
    }
}
