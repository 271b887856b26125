//! Market-data provider configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketDataSource {
    Yahoo,
    Mock,
}

impl FromStr for MarketDataSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yahoo" => Ok(MarketDataSource::Yahoo),
            "mock" => Ok(MarketDataSource::Mock),
            _ => anyhow::bail!(
                "Invalid MARKET_DATA_SOURCE: {}. Must be 'yahoo' or 'mock'",
                s
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MarketDataEnvConfig {
    pub source: MarketDataSource,
    pub yahoo_base_url: String,
    pub http_timeout_secs: u64,
}

impl Default for MarketDataEnvConfig {
    fn default() -> Self {
        Self {
            source: MarketDataSource::Yahoo,
            yahoo_base_url: "https://query2.finance.yahoo.com".to_string(),
            http_timeout_secs: 30,
        }
    }
}

impl MarketDataEnvConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let source = match lookup("MARKET_DATA_SOURCE") {
            Some(s) => MarketDataSource::from_str(&s)?,
            None => defaults.source,
        };
        let http_timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .with_context(|| format!("Invalid HTTP_TIMEOUT_SECS: {}", v))?,
            None => defaults.http_timeout_secs,
        };

        Ok(Self {
            source,
            yahoo_base_url: lookup("YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
            http_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_data_config_defaults() {
        let config = MarketDataEnvConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.source, MarketDataSource::Yahoo);
        assert!(config.yahoo_base_url.contains("finance.yahoo.com"));
        assert_eq!(config.http_timeout_secs, 30);
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let result = MarketDataEnvConfig::from_lookup(|k| {
            (k == "HTTP_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }
}
