use crate::domain::types::PriceBar;
use std::collections::BTreeMap;
use tracing::warn;

/// Centralized validator for daily price bars.
///
/// Rejects bars that are physically impossible and restores the ordering
/// invariant (strictly increasing dates) on a fetched sequence.
pub struct BarValidator;

impl BarValidator {
    /// Validates a single bar. Returns true if valid, false otherwise.
    pub fn validate_bar(symbol: &str, bar: &PriceBar) -> bool {
        let prices = [bar.open, bar.high, bar.low, bar.close];
        if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            warn!(
                "Validation FAILED: Bar for {} on {} has non-positive or non-finite price component(s)",
                symbol, bar.date
            );
            return false;
        }

        if bar.low > bar.high {
            warn!(
                "Validation FAILED: Bar for {} on {} has low {} > high {}",
                symbol, bar.date, bar.low, bar.high
            );
            return false;
        }

        true
    }

    /// Drops invalid bars, sorts ascending by date and keeps the last bar
    /// seen for any duplicated date.
    pub fn normalize(symbol: &str, bars: Vec<PriceBar>) -> Vec<PriceBar> {
        let total = bars.len();
        let mut by_date = BTreeMap::new();
        for bar in bars {
            if Self::validate_bar(symbol, &bar) {
                by_date.insert(bar.date, bar);
            }
        }

        let normalized: Vec<PriceBar> = by_date.into_values().collect();
        if normalized.len() != total {
            warn!(
                "BarValidator: {} of {} bars for {} dropped (invalid or duplicate date)",
                total - normalized.len(),
                total,
                symbol
            );
        }
        normalized
    }
}
