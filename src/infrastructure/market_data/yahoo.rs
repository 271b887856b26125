use crate::domain::errors::PipelineError;
use crate::domain::ports::MarketDataService;
use crate::domain::types::{PriceBar, PriceWindow};
use crate::domain::validation::BarValidator;
use crate::infrastructure::core::http_client_factory::{HttpClientFactory, build_url_with_query};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, info, warn};

const PROVIDER: &str = "Yahoo Finance";

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

/// Column-oriented OHLCV; Yahoo emits `null` for missing cells.
#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// Daily OHLCV history from the Yahoo Finance chart API.
pub struct YahooChartService {
    client: ClientWithMiddleware,
    base_url: String,
}

impl YahooChartService {
    pub fn new(base_url: String, timeout: std::time::Duration) -> Self {
        Self {
            client: HttpClientFactory::create_client_with_timeout(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds the request URL for `window`. `Range` goes out as a relative
    /// `range`/`interval` pair; `History` is resolved into an absolute
    /// `period1`/`period2` span of daily bars ending at `now`.
    pub fn chart_url(
        &self,
        symbol: &str,
        window: &PriceWindow,
        now: DateTime<Utc>,
    ) -> Result<String, PipelineError> {
        let base = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let url = match window {
            PriceWindow::Range { period, interval } => build_url_with_query(
                &base,
                &[("range", period.as_str()), ("interval", interval.as_str())],
            ),
            PriceWindow::History { period } => {
                let days = window.trailing_days().ok_or_else(|| {
                    PipelineError::fetch(PROVIDER, format!("unsupported history period '{}'", period))
                })?;
                let start = now - Duration::days(i64::from(days));
                let period1 = start.timestamp().to_string();
                let period2 = now.timestamp().to_string();
                build_url_with_query(
                    &base,
                    &[
                        ("period1", period1.as_str()),
                        ("period2", period2.as_str()),
                        ("interval", "1d"),
                    ],
                )
            }
        };
        Ok(url)
    }
}

/// Decodes a chart API body into bars, ascending and de-duplicated by date.
pub fn parse_chart_response(symbol: &str, body: &str) -> Result<Vec<PriceBar>, PipelineError> {
    let envelope: ChartEnvelope = serde_json::from_str(body)
        .map_err(|e| PipelineError::fetch(PROVIDER, format!("malformed response: {}", e)))?;

    if let Some(error) = envelope.chart.error {
        return Err(PipelineError::fetch(
            PROVIDER,
            format!(
                "{} for {}: {}",
                error.code,
                symbol,
                error.description.unwrap_or_default()
            ),
        ));
    }

    let result = envelope
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| PipelineError::fetch(PROVIDER, format!("no chart result for {}", symbol)))?;

    let timestamps = result
        .timestamp
        .ok_or_else(|| PipelineError::fetch(PROVIDER, format!("no timestamps for {}", symbol)))?;
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| PipelineError::fetch(PROVIDER, format!("no quote data for {}", symbol)))?;

    let offset = result.meta.gmtoffset;
    let mut bars = Vec::with_capacity(timestamps.len());
    let mut incomplete = 0usize;

    for (i, ts) in timestamps.iter().enumerate() {
        let cell = |col: &Vec<Option<f64>>| col.get(i).copied().flatten();
        let fields = (
            cell(&quote.open),
            cell(&quote.high),
            cell(&quote.low),
            cell(&quote.close),
            quote.volume.get(i).copied().flatten(),
            DateTime::from_timestamp(ts + offset, 0),
        );
        if let (Some(open), Some(high), Some(low), Some(close), Some(volume), Some(at)) = fields {
            bars.push(PriceBar {
                date: at.date_naive(),
                open,
                high,
                low,
                close,
                volume,
            });
        } else {
            incomplete += 1;
        }
    }

    if incomplete > 0 {
        warn!(
            "{}: dropped {} incomplete bars for {}",
            PROVIDER, incomplete, symbol
        );
    }

    Ok(BarValidator::normalize(symbol, bars))
}

#[async_trait]
impl MarketDataService for YahooChartService {
    async fn get_daily_bars(&self, symbol: &str, window: &PriceWindow) -> Result<Vec<PriceBar>> {
        let url = self.chart_url(symbol, window, Utc::now())?;
        debug!("Yahoo chart request: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PipelineError::fetch(PROVIDER, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::fetch(PROVIDER, e))?;

        // Unknown symbols come back as 404 with a chart.error payload; prefer
        // that description over the bare status.
        let bars = match parse_chart_response(symbol, &body) {
            Ok(bars) if status.is_success() => bars,
            Ok(_) => return Err(PipelineError::fetch(PROVIDER, format!("HTTP {}", status)).into()),
            Err(e) => return Err(e.into()),
        };

        info!(
            "{}: fetched {} bars for {} ({})",
            PROVIDER,
            bars.len(),
            symbol,
            window
        );
        Ok(bars)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    // 2024-05-01..03 13:30 UTC (09:30 New York), with a null close on the 2nd.
    const BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "AAPL", "currency": "USD", "gmtoffset": -14400},
                "timestamp": [1714570200, 1714656600, 1714743000],
                "indicators": {
                    "quote": [{
                        "open":   [169.58, 172.51, 186.65],
                        "high":   [172.71, 173.42, 187.00],
                        "low":    [169.11, 170.89, 182.66],
                        "close":  [169.30, null,   183.38],
                        "volume": [50383100, 94214900, 163224100]
                    }],
                    "adjclose": [{"adjclose": [168.9, 172.6, 183.0]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_drops_incomplete_bars() {
        let bars = parse_chart_response("AAPL", BODY).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date.day(), 1);
        assert_eq!(bars[1].date.day(), 3);
        assert_eq!(bars[1].close, 183.38);
        assert_eq!(bars[0].volume, 50_383_100);
    }

    #[test]
    fn test_parse_unknown_symbol() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_chart_response("ZZZZ", body).unwrap_err();
        assert!(matches!(err, PipelineError::Fetch { .. }));
        assert!(err.to_string().contains("ZZZZ"));
    }

    #[test]
    fn test_parse_missing_timestamps() {
        let body = r#"{"chart":{"result":[{"meta":{},"indicators":{"quote":[{}]}}],"error":null}}"#;
        let err = parse_chart_response("AAPL", body).unwrap_err();
        assert!(err.to_string().contains("no timestamps"));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse_chart_response("AAPL", "Too Many Requests").is_err());
    }

    #[test]
    fn test_chart_url_shapes() {
        let service = YahooChartService::new(
            "https://query2.finance.yahoo.com/".to_string(),
            std::time::Duration::from_secs(5),
        );
        let now = Utc.with_ymd_and_hms(2024, 5, 3, 0, 0, 0).unwrap();

        let preview = service
            .chart_url("AAPL", &PriceWindow::range("7d", "1d"), now)
            .unwrap();
        assert_eq!(
            preview,
            "https://query2.finance.yahoo.com/v8/finance/chart/AAPL?range=7d&interval=1d"
        );

        let history = service
            .chart_url("AAPL", &PriceWindow::history("60d"), now)
            .unwrap();
        let expected_start = (now - Duration::days(60)).timestamp();
        assert_eq!(
            history,
            format!(
                "https://query2.finance.yahoo.com/v8/finance/chart/AAPL?period1={}&period2={}&interval=1d",
                expected_start,
                now.timestamp()
            )
        );
    }

    #[test]
    fn test_chart_url_rejects_unknown_period() {
        let service = YahooChartService::new(
            "https://query2.finance.yahoo.com".to_string(),
            std::time::Duration::from_secs(5),
        );
        assert!(
            service
                .chart_url("AAPL", &PriceWindow::history("ytd"), Utc::now())
                .is_err()
        );
    }
}
