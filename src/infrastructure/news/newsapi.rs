use crate::domain::errors::PipelineError;
use crate::domain::ports::NewsDataService;
use crate::domain::types::{Headline, NewsQuery};
use crate::infrastructure::core::http_client_factory::{HttpClientFactory, build_url_with_query};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, info, warn};

const PROVIDER: &str = "NewsAPI";
const REMOVED_TITLE: &str = "[Removed]";
const CREDENTIAL_CODES: &[&str] = &["apiKeyMissing", "apiKeyInvalid", "apiKeyDisabled", "apiKeyExhausted"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    total_results: Option<u64>,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    title: Option<String>,
    source: Option<NewsApiSource>,
    url: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSource {
    name: Option<String>,
}

/// Headline search against NewsAPI's `/v2/everything` endpoint.
pub struct NewsApiService {
    client: ClientWithMiddleware,
    api_key: String,
    base_url: String,
}

impl NewsApiService {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self::with_client(HttpClientFactory::create_client(), api_key, base_url)
    }

    pub fn with_client(client: ClientWithMiddleware, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn everything_url(&self, query: &NewsQuery) -> String {
        let page_size = query.page_size.to_string();
        build_url_with_query(
            &format!("{}/v2/everything", self.base_url),
            &[
                ("q", query.keyword.as_str()),
                ("language", query.language.as_str()),
                ("sortBy", query.sort_by.as_str()),
                ("pageSize", page_size.as_str()),
            ],
        )
    }
}

/// Decodes an `/v2/everything` body into headlines, keeping provider order.
pub fn parse_everything_response(
    http_status: u16,
    body: &str,
    limit: usize,
) -> Result<Vec<Headline>, PipelineError> {
    let parsed: Result<EverythingResponse, _> = serde_json::from_str(body);

    if http_status == 401 {
        let reason = parsed
            .ok()
            .and_then(|r| r.message)
            .unwrap_or_else(|| "HTTP 401 Unauthorized".to_string());
        return Err(PipelineError::credential(PROVIDER, reason));
    }

    let response = parsed.map_err(|e| {
        PipelineError::fetch(
            PROVIDER,
            format!("malformed response (HTTP {}): {}", http_status, e),
        )
    })?;

    if response.status != "ok" {
        let code = response.code.unwrap_or_default();
        let message = response.message.unwrap_or_else(|| "no message".to_string());
        if CREDENTIAL_CODES.contains(&code.as_str()) {
            return Err(PipelineError::credential(PROVIDER, format!("{}: {}", code, message)));
        }
        return Err(PipelineError::fetch(
            PROVIDER,
            format!("status '{}' (HTTP {}) {}: {}", response.status, http_status, code, message),
        ));
    }

    if !(200..300).contains(&http_status) {
        return Err(PipelineError::fetch(PROVIDER, format!("HTTP {}", http_status)));
    }

    debug!(
        "NewsAPI reported {} total results, {} returned",
        response.total_results.unwrap_or(0),
        response.articles.len()
    );

    let mut headlines = Vec::with_capacity(response.articles.len().min(limit));
    for article in response.articles {
        let Some(title) = article.title.filter(|t| !t.trim().is_empty() && t != REMOVED_TITLE)
        else {
            warn!("NewsAPI: skipping article without a usable title");
            continue;
        };

        headlines.push(Headline {
            title,
            source: article.source.and_then(|s| s.name),
            url: article.url,
            published_at: article
                .published_at
                .and_then(|d| DateTime::parse_from_rfc3339(&d).ok())
                .map(|d| d.with_timezone(&Utc)),
        });

        if headlines.len() == limit {
            break;
        }
    }

    Ok(headlines)
}

#[async_trait]
impl NewsDataService for NewsApiService {
    async fn fetch_headlines(&self, query: &NewsQuery) -> Result<Vec<Headline>> {
        if self.api_key.trim().is_empty() {
            return Err(PipelineError::credential(PROVIDER, "NEWS_API_KEY is not set").into());
        }

        let url = self.everything_url(query);
        debug!("NewsAPI request: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| PipelineError::fetch(PROVIDER, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::fetch(PROVIDER, e))?;

        let headlines = parse_everything_response(status, &body, query.page_size)?;
        info!(
            "NewsAPI: fetched {} headlines for '{}'",
            headlines.len(),
            query.keyword
        );
        Ok(headlines)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}
