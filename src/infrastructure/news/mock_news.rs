use crate::domain::ports::NewsDataService;
use crate::domain::types::{Headline, NewsQuery};
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Serves a fixed headline list, most recent first.
pub struct MockNewsService {
    headlines: Vec<Headline>,
}

impl MockNewsService {
    pub fn new() -> Self {
        Self::with_titles(&[
            "Apple stock rallies as strong iPhone demand lifts outlook",
            "Apple faces antitrust lawsuit over App Store fees",
            "Apple to hold developer conference in June",
        ])
    }

    pub fn with_titles(titles: &[&str]) -> Self {
        Self {
            headlines: titles.iter().map(|t| Headline::new(*t)).collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            headlines: Vec::new(),
        }
    }
}

impl Default for MockNewsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsDataService for MockNewsService {
    async fn fetch_headlines(&self, query: &NewsQuery) -> Result<Vec<Headline>> {
        let headlines: Vec<Headline> = self
            .headlines
            .iter()
            .take(query.page_size)
            .cloned()
            .collect();
        info!(
            "MockNewsService: serving {} headlines for '{}'",
            headlines.len(),
            query.keyword
        );
        Ok(headlines)
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
