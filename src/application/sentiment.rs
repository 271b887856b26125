use crate::domain::sentiment::PolarityScores;
use crate::domain::types::Headline;
use crate::infrastructure::news::SentimentAnalyzer;
use tracing::debug;

/// Scores headlines one-to-one, preserving order.
pub struct SentimentScorer {
    analyzer: SentimentAnalyzer,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentAnalyzer::new(),
        }
    }

    /// Compound score per headline; `scores[i]` belongs to `headlines[i]`.
    pub fn score_headlines(&self, headlines: &[Headline]) -> Vec<f64> {
        headlines
            .iter()
            .map(|h| {
                let score = self.analyzer.analyze(&h.title);
                debug!("sentiment {:+.4} <- {}", score, h.title);
                score
            })
            .collect()
    }

    pub fn polarity(&self, text: &str) -> PolarityScores {
        self.analyzer.polarity(text)
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}
