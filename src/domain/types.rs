use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A news headline. Its recency rank is its position in the fetched sequence
/// (index 0 is the most recent article as returned by the provider).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub source: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Headline {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: None,
            url: None,
            published_at: None,
        }
    }
}

/// Parameters for a headline search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub keyword: String,
    pub language: String,
    pub sort_by: String,
    pub page_size: usize,
}

/// One trading day of OHLCV data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Trailing window requested from the market-data provider.
///
/// The two shapes are kept apart on purpose: `Range` is the short preview
/// fetch (explicit period + interval), `History` is the daily history used
/// for training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceWindow {
    Range { period: String, interval: String },
    History { period: String },
}

impl PriceWindow {
    pub fn range(period: impl Into<String>, interval: impl Into<String>) -> Self {
        Self::Range {
            period: period.into(),
            interval: interval.into(),
        }
    }

    pub fn history(period: impl Into<String>) -> Self {
        Self::History {
            period: period.into(),
        }
    }

    pub fn period(&self) -> &str {
        match self {
            Self::Range { period, .. } | Self::History { period } => period,
        }
    }

    /// Calendar days covered by the period string (`"60d"`, `"1wk"`, `"3mo"`, `"1y"`).
    pub fn trailing_days(&self) -> Option<u32> {
        parse_period_days(self.period())
    }
}

fn parse_period_days(period: &str) -> Option<u32> {
    let period = period.trim();
    let split = period.find(|c: char| !c.is_ascii_digit())?;
    let (count, unit) = period.split_at(split);
    let count: u32 = count.parse().ok()?;
    let per_unit = match unit {
        "d" => 1,
        "wk" => 7,
        "mo" => 30,
        "y" => 365,
        _ => return None,
    };
    count.checked_mul(per_unit).filter(|days| *days > 0)
}

impl fmt::Display for PriceWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { period, interval } => write!(f, "{} @ {}", period, interval),
            Self::History { period } => write!(f, "{} history", period),
        }
    }
}

/// A price bar joined with the run's sentiment and its forward-looking label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingRow {
    pub date: NaiveDate,
    pub close: f64,
    pub sentiment: f64,
    /// `(close[i+1] - close[i]) / close[i]`
    pub price_change_pct: f64,
    pub price_up: bool,
}

impl TrainingRow {
    pub fn label(&self) -> i32 {
        i32::from(self.price_up)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl Recommendation {
    /// Maps a binary classifier output onto a recommendation.
    ///
    /// The classifier only ever emits 0 or 1; `Hold` guards the rest of the
    /// integer domain.
    pub fn from_prediction(prediction: i32) -> Self {
        debug_assert!(
            prediction == 0 || prediction == 1,
            "binary classifier emitted {}",
            prediction
        );
        match prediction {
            1 => Self::Buy,
            0 => Self::Sell,
            _ => Self::Hold,
        }
    }

    pub fn banner(&self) -> &'static str {
        match self {
            Self::Buy => "📈 BUY",
            Self::Sell => "📉 SELL",
            Self::Hold => "⚖️ HOLD",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Hold => write!(f, "HOLD"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_prediction_mapping() {
        assert_eq!(Recommendation::from_prediction(1), Recommendation::Buy);
        assert_eq!(Recommendation::from_prediction(0), Recommendation::Sell);
        assert!(Recommendation::from_prediction(1).banner().contains("BUY"));
        assert!(Recommendation::from_prediction(0).banner().contains("SELL"));
    }

    #[test]
    fn test_price_window_shapes_stay_distinct() {
        let preview = PriceWindow::range("7d", "1d");
        let history = PriceWindow::history("7d");
        assert_ne!(preview, history);
        assert_eq!(preview.period(), history.period());
        assert_eq!(preview.to_string(), "7d @ 1d");
    }

    #[test]
    fn test_trailing_days() {
        assert_eq!(PriceWindow::history("60d").trailing_days(), Some(60));
        assert_eq!(PriceWindow::history("1wk").trailing_days(), Some(7));
        assert_eq!(PriceWindow::history("3mo").trailing_days(), Some(90));
        assert_eq!(PriceWindow::range("1y", "1d").trailing_days(), Some(365));
        assert_eq!(PriceWindow::history("0d").trailing_days(), None);
        assert_eq!(PriceWindow::history("max").trailing_days(), None);
        assert_eq!(PriceWindow::history("60").trailing_days(), None);
    }

    #[test]
    fn test_training_row_label() {
        let row = TrainingRow {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            close: 100.0,
            sentiment: 0.2,
            price_change_pct: 0.01,
            price_up: true,
        };
        assert_eq!(row.label(), 1);
    }
}
