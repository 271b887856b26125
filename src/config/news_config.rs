//! News provider configuration parsing from environment variables.

use anyhow::Result;
use std::str::FromStr;

/// Which headline provider the run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsSource {
    NewsApi,
    Rss,
    Mock,
}

impl FromStr for NewsSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newsapi" => Ok(NewsSource::NewsApi),
            "rss" => Ok(NewsSource::Rss),
            "mock" => Ok(NewsSource::Mock),
            _ => anyhow::bail!(
                "Invalid NEWS_SOURCE: {}. Must be 'newsapi', 'rss', or 'mock'",
                s
            ),
        }
    }
}

/// News environment configuration
#[derive(Debug, Clone)]
pub struct NewsEnvConfig {
    pub source: NewsSource,
    /// Empty when unset; the NewsAPI client rejects it before sending.
    pub api_key: String,
    pub api_base_url: String,
    /// RSS search endpoint; the keyword is appended as the `q` parameter.
    pub rss_url: String,
}

impl Default for NewsEnvConfig {
    fn default() -> Self {
        Self {
            source: NewsSource::NewsApi,
            api_key: String::new(),
            api_base_url: "https://newsapi.org".to_string(),
            rss_url: "https://news.google.com/rss/search".to_string(),
        }
    }
}

impl NewsEnvConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let source = match lookup("NEWS_SOURCE") {
            Some(s) => NewsSource::from_str(&s)?,
            None => defaults.source,
        };

        Ok(Self {
            source,
            api_key: lookup("NEWS_API_KEY").unwrap_or_default(),
            api_base_url: lookup("NEWS_API_BASE_URL").unwrap_or(defaults.api_base_url),
            rss_url: lookup("NEWS_RSS_URL").unwrap_or(defaults.rss_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_config_defaults() {
        let config = NewsEnvConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.source, NewsSource::NewsApi);
        assert!(config.api_key.is_empty());
        assert!(config.api_base_url.contains("newsapi.org"));
    }

    #[test]
    fn test_news_source_parsing() {
        assert_eq!(NewsSource::from_str("RSS").unwrap(), NewsSource::Rss);
        assert!(NewsSource::from_str("twitter").is_err());
    }
}
