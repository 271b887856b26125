use crate::domain::types::{Headline, NewsQuery, PriceBar, PriceWindow};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait NewsDataService: Send + Sync {
    /// Returns up to `query.page_size` headlines in provider order.
    async fn fetch_headlines(&self, query: &NewsQuery) -> Result<Vec<Headline>>;

    fn name(&self) -> &str;
}

#[async_trait]
pub trait MarketDataService: Send + Sync {
    /// Daily bars ascending by date, no duplicate dates.
    async fn get_daily_bars(&self, symbol: &str, window: &PriceWindow) -> Result<Vec<PriceBar>>;

    fn name(&self) -> &str;
}
