use crate::config::{Config, MarketDataSource, NewsSource};
use crate::domain::ports::{MarketDataService, NewsDataService};
use crate::infrastructure::market_data::{MockMarketDataService, YahooChartService};
use crate::infrastructure::news::{MockNewsService, NewsApiService, RssNewsService};
use std::sync::Arc;
use std::time::Duration;

pub struct ServiceFactory;

impl ServiceFactory {
    pub fn create_services(
        config: &Config,
    ) -> (Arc<dyn NewsDataService>, Arc<dyn MarketDataService>) {
        let news: Arc<dyn NewsDataService> = match config.news.source {
            NewsSource::NewsApi => Arc::new(NewsApiService::new(
                config.news.api_key.clone(),
                config.news.api_base_url.clone(),
            )),
            NewsSource::Rss => Arc::new(RssNewsService::new(&config.news.rss_url)),
            NewsSource::Mock => Arc::new(MockNewsService::new()),
        };

        let market: Arc<dyn MarketDataService> = match config.market_data.source {
            MarketDataSource::Yahoo => Arc::new(YahooChartService::new(
                config.market_data.yahoo_base_url.clone(),
                Duration::from_secs(config.market_data.http_timeout_secs),
            )),
            MarketDataSource::Mock => Arc::new(MockMarketDataService::seasonal()),
        };

        (news, market)
    }
}
