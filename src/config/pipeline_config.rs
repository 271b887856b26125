//! Run parameters for a single pipeline pass.
//!
//! Defaults reproduce the fixed run: AAPL, "Apple stock", a 7d/1d preview,
//! 60d of daily history, an 80/20 split seeded with 42.

use crate::domain::types::{NewsQuery, PriceWindow};
use anyhow::{Context, Result};
use std::fmt::Display;
use std::str::FromStr;

/// Immutable run context threaded through every stage.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub ticker: String,
    pub keyword: String,
    pub language: String,
    pub sort_by: String,
    pub page_size: usize,
    pub preview_period: String,
    pub preview_interval: String,
    pub training_period: String,
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ticker: "AAPL".to_string(),
            keyword: "Apple stock".to_string(),
            language: "en".to_string(),
            sort_by: "publishedAt".to_string(),
            page_size: 10,
            preview_period: "7d".to_string(),
            preview_interval: "1d".to_string(),
            training_period: "60d".to_string(),
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Invalid {}: {}", key, raw)),
        None => Ok(default),
    }
}

impl PipelineConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        let config = Self {
            ticker: lookup("TICKER").unwrap_or(d.ticker).to_uppercase(),
            keyword: lookup("NEWS_KEYWORD").unwrap_or(d.keyword),
            language: lookup("NEWS_LANGUAGE").unwrap_or(d.language),
            sort_by: lookup("NEWS_SORT_BY").unwrap_or(d.sort_by),
            page_size: parse_var(&lookup, "NEWS_PAGE_SIZE", d.page_size)?,
            preview_period: lookup("PREVIEW_PERIOD").unwrap_or(d.preview_period),
            preview_interval: lookup("PREVIEW_INTERVAL").unwrap_or(d.preview_interval),
            training_period: lookup("TRAINING_PERIOD").unwrap_or(d.training_period),
            test_fraction: parse_var(&lookup, "TEST_FRACTION", d.test_fraction)?,
            seed: parse_var(&lookup, "SPLIT_SEED", d.seed)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ticker.trim().is_empty() {
            anyhow::bail!("TICKER must not be empty");
        }
        if self.keyword.trim().is_empty() {
            anyhow::bail!("NEWS_KEYWORD must not be empty");
        }
        if !(1..=100).contains(&self.page_size) {
            anyhow::bail!("NEWS_PAGE_SIZE must be in 1..=100, got {}", self.page_size);
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            anyhow::bail!(
                "TEST_FRACTION must be strictly between 0 and 1, got {}",
                self.test_fraction
            );
        }
        Ok(())
    }

    pub fn news_query(&self) -> NewsQuery {
        NewsQuery {
            keyword: self.keyword.clone(),
            language: self.language.clone(),
            sort_by: self.sort_by.clone(),
            page_size: self.page_size,
        }
    }

    pub fn preview_window(&self) -> PriceWindow {
        PriceWindow::range(&self.preview_period, &self.preview_interval)
    }

    pub fn training_window(&self) -> PriceWindow {
        PriceWindow::history(&self.training_period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults_match_fixed_run() {
        let config = PipelineConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.ticker, "AAPL");
        assert_eq!(config.seed, 42);
        assert_eq!(config.preview_window(), PriceWindow::range("7d", "1d"));
        assert_eq!(config.training_window(), PriceWindow::history("60d"));
    }

    #[test]
    fn test_overrides() {
        let config = PipelineConfig::from_lookup(lookup_from(&[
            ("TICKER", "msft"),
            ("NEWS_PAGE_SIZE", "25"),
            ("SPLIT_SEED", "7"),
        ]))
        .unwrap();
        assert_eq!(config.ticker, "MSFT");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_invalid_test_fraction() {
        let err = PipelineConfig::from_lookup(lookup_from(&[("TEST_FRACTION", "1.5")]))
            .unwrap_err();
        assert!(err.to_string().contains("TEST_FRACTION"));
    }

    #[test]
    fn test_unparseable_page_size() {
        let err = PipelineConfig::from_lookup(lookup_from(&[("NEWS_PAGE_SIZE", "ten")]))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("NEWS_PAGE_SIZE"));
    }
}
