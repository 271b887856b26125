use crate::domain::errors::PipelineError;
use crate::domain::ports::NewsDataService;
use crate::domain::types::{Headline, NewsQuery};
use crate::infrastructure::core::http_client_factory::{HttpClientFactory, build_url_with_query};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest_middleware::ClientWithMiddleware;
use rss::Channel;
use std::io::Cursor;
use tracing::{debug, info};

const PROVIDER: &str = "RSS";

/// Keyword search over an RSS search endpoint (Google News by default).
///
/// Needs no credential. Feed order is kept as the recency order.
pub struct RssNewsService {
    url: String,
    client: ClientWithMiddleware,
}

impl RssNewsService {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            client: HttpClientFactory::create_client(),
        }
    }

    fn search_url(&self, query: &NewsQuery) -> String {
        build_url_with_query(
            &self.url,
            &[("q", query.keyword.as_str()), ("hl", query.language.as_str())],
        )
    }
}

/// Parses an RSS document into at most `limit` headlines.
pub fn parse_feed(bytes: &[u8], limit: usize) -> Result<Vec<Headline>, PipelineError> {
    let channel = Channel::read_from(Cursor::new(bytes))
        .map_err(|e| PipelineError::fetch(PROVIDER, format!("malformed feed: {}", e)))?;

    let headlines = channel
        .items()
        .iter()
        .filter_map(|item| {
            let title = item.title()?.trim();
            if title.is_empty() {
                return None;
            }
            // RSS dates are RFC-2822 usually.
            let published_at = item
                .pub_date()
                .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
                .map(|d| d.with_timezone(&Utc));
            Some(Headline {
                title: title.to_string(),
                source: item.source().and_then(|s| s.title()).map(|s| s.to_string()),
                url: item.link().map(|l| l.to_string()),
                published_at,
            })
        })
        .take(limit)
        .collect();

    Ok(headlines)
}

#[async_trait]
impl NewsDataService for RssNewsService {
    async fn fetch_headlines(&self, query: &NewsQuery) -> Result<Vec<Headline>> {
        let url = self.search_url(query);
        debug!("RSS request: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PipelineError::fetch(PROVIDER, e))?;

        if !response.status().is_success() {
            return Err(
                PipelineError::fetch(PROVIDER, format!("HTTP {}", response.status())).into(),
            );
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PipelineError::fetch(PROVIDER, e))?;

        let headlines = parse_feed(&bytes, query.page_size)?;
        info!(
            "RSS: fetched {} headlines for '{}'",
            headlines.len(),
            query.keyword
        );
        Ok(headlines)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}
