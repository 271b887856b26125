//! Single-pass headline-sentiment -> direction -> recommendation pipeline.
//!
//! Stages run strictly in order and every failure aborts the run with the
//! failing stage attached as context. Nothing is cached or persisted between
//! runs.

use crate::application::ml::{
    Decision, DecisionEngine, SentimentClassifier, TrainingConfig, TrainingOutcome,
    build_training_rows, latest_sentiment,
};
use crate::application::sentiment::SentimentScorer;
use crate::config::PipelineConfig;
use crate::domain::errors::Stage;
use crate::domain::ports::{MarketDataService, NewsDataService};
use crate::domain::types::{Headline, PriceBar};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Everything a run produced, in stage order.
#[derive(Debug)]
pub struct PipelineReport {
    pub ticker: String,
    pub headlines: Vec<Headline>,
    pub scores: Vec<f64>,
    pub preview: Vec<PriceBar>,
    pub history_bars: usize,
    pub training_rows: usize,
    pub outcome: TrainingOutcome,
    pub decision: Decision,
}

pub struct Pipeline {
    news: Arc<dyn NewsDataService>,
    market: Arc<dyn MarketDataService>,
    scorer: SentimentScorer,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        news: Arc<dyn NewsDataService>,
        market: Arc<dyn MarketDataService>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            news,
            market,
            scorer: SentimentScorer::new(),
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub async fn run(&self) -> Result<PipelineReport> {
        let config = &self.config;
        info!(
            "Pipeline start: ticker={} keyword='{}' news={} market={}",
            config.ticker,
            config.keyword,
            self.news.name(),
            self.market.name()
        );

        // 1. Headlines
        let headlines = self
            .news
            .fetch_headlines(&config.news_query())
            .await
            .with_context(|| format!("{} stage failed", Stage::HeadlineFetch))?;
        info!("Fetched {} headlines", headlines.len());

        // 2. Sentiment
        let scores = self.scorer.score_headlines(&headlines);
        anyhow::ensure!(
            scores.len() == headlines.len(),
            "{} stage failed: {} scores for {} headlines",
            Stage::SentimentScoring,
            scores.len(),
            headlines.len()
        );
        // The same scalar is broadcast for training and fed to the decision,
        // so a run without headlines stops here.
        let latest = latest_sentiment(&scores)
            .with_context(|| format!("{} stage failed", Stage::Decision))?;

        // 3. Prices: a short preview for display, then the training history
        let preview = self
            .market
            .get_daily_bars(&config.ticker, &config.preview_window())
            .await
            .with_context(|| format!("{} stage failed (preview)", Stage::PriceFetch))?;
        let history = self
            .market
            .get_daily_bars(&config.ticker, &config.training_window())
            .await
            .with_context(|| format!("{} stage failed (history)", Stage::PriceFetch))?;
        info!(
            "Fetched {} preview bars and {} history bars for {}",
            preview.len(),
            history.len(),
            config.ticker
        );

        // 4. Dataset + model
        let rows = build_training_rows(&history, latest)
            .with_context(|| format!("{} stage failed", Stage::Training))?;
        let outcome = SentimentClassifier::train(&rows, &TrainingConfig::from(config))
            .with_context(|| format!("{} stage failed", Stage::Training))?;

        // 5. Decision
        let decision = DecisionEngine::decide(&outcome.model, latest)
            .with_context(|| format!("{} stage failed", Stage::Decision))?;

        info!(
            "Pipeline done: {} for {} (accuracy {:.2})",
            decision.recommendation, config.ticker, outcome.accuracy
        );

        Ok(PipelineReport {
            ticker: config.ticker.clone(),
            headlines,
            scores,
            preview,
            history_bars: history.len(),
            training_rows: rows.len(),
            outcome,
            decision,
        })
    }
}
