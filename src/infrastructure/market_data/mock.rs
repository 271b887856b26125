use crate::domain::errors::PipelineError;
use crate::domain::ports::MarketDataService;
use crate::domain::types::{PriceBar, PriceWindow};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use std::sync::Mutex;
use tracing::{error, info};

/// Serves a preset bar series; every window is answered with the trailing
/// `trailing_days()` bars of it.
pub struct MockMarketDataService {
    bars: Vec<PriceBar>,
    requests: Mutex<Vec<PriceWindow>>,
}

impl MockMarketDataService {
    pub fn new(bars: Vec<PriceBar>) -> Self {
        Self {
            bars,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Builds consecutive daily bars from a list of closes, starting 2024-01-02.
    pub fn from_closes(closes: &[f64]) -> Self {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap_or_default();
        let bars = closes
            .iter()
            .enumerate()
            .filter_map(|(i, close)| {
                let date = start.checked_add_days(Days::new(i as u64))?;
                Some(PriceBar {
                    date,
                    open: *close,
                    high: close * 1.01,
                    low: close * 0.99,
                    close: *close,
                    volume: 1_000_000 + i as u64 * 1_000,
                })
            })
            .collect();
        Self::new(bars)
    }

    /// A 90-day zig-zag series with both up and down days.
    pub fn seasonal() -> Self {
        let closes: Vec<f64> = (0..90)
            .map(|i| {
                let i = i as f64;
                180.0 + (i * 0.7).sin() * 4.0 + i * 0.05
            })
            .collect();
        Self::from_closes(&closes)
    }

    /// Windows requested so far, in call order.
    pub fn requested_windows(&self) -> Vec<PriceWindow> {
        match self.requests.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Default for MockMarketDataService {
    fn default() -> Self {
        Self::seasonal()
    }
}

#[async_trait]
impl MarketDataService for MockMarketDataService {
    async fn get_daily_bars(&self, symbol: &str, window: &PriceWindow) -> Result<Vec<PriceBar>> {
        match self.requests.lock() {
            Ok(mut guard) => guard.push(window.clone()),
            Err(poisoned) => {
                error!("MockMarketDataService: request log poisoned, recovering");
                poisoned.into_inner().push(window.clone());
            }
        }

        let days = window.trailing_days().ok_or_else(|| {
            PipelineError::fetch("Mock", format!("unsupported period '{}'", window.period()))
        })? as usize;
        let skip = self.bars.len().saturating_sub(days);
        let bars = self.bars[skip..].to_vec();

        info!(
            "MockMarketDataService: serving {} bars for {} ({})",
            bars.len(),
            symbol,
            window
        );
        Ok(bars)
    }

    fn name(&self) -> &str {
        "Mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trailing_window() {
        let service = MockMarketDataService::from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let bars = service
            .get_daily_bars("AAPL", &PriceWindow::range("2d", "1d"))
            .await
            .unwrap();
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![4.0, 5.0]);

        let all = service
            .get_daily_bars("AAPL", &PriceWindow::history("60d"))
            .await
            .unwrap();
        assert_eq!(all.len(), 5);

        assert_eq!(
            service.requested_windows(),
            vec![PriceWindow::range("2d", "1d"), PriceWindow::history("60d")]
        );
    }

    #[test]
    fn test_seasonal_dates_increase() {
        let service = MockMarketDataService::seasonal();
        assert_eq!(service.bars.len(), 90);
        assert!(service.bars.windows(2).all(|w| w[0].date < w[1].date));
    }
}
