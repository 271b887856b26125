//! Configuration module for newstrade.
//!
//! Structured configuration loading from environment variables, organized by
//! concern: News, Market Data, and the Pipeline run itself.

mod market_data_config;
mod news_config;
mod pipeline_config;

pub use market_data_config::{MarketDataEnvConfig, MarketDataSource};
pub use news_config::{NewsEnvConfig, NewsSource};
pub use pipeline_config::PipelineConfig;

use anyhow::{Context, Result};
use std::env;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub news: NewsEnvConfig,
    pub market_data: MarketDataEnvConfig,
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let news = NewsEnvConfig::from_lookup(&lookup).context("Failed to load news config")?;
        let market_data = MarketDataEnvConfig::from_lookup(&lookup)
            .context("Failed to load market data config")?;
        let pipeline =
            PipelineConfig::from_lookup(&lookup).context("Failed to load pipeline config")?;

        Ok(Self {
            news,
            market_data,
            pipeline,
        })
    }
}
