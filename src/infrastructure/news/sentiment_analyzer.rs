//! Local NLP-based sentiment analysis using VADER
//!
//! This module scores news headlines with the VADER (Valence Aware Dictionary
//! and sEntiment Reasoner) algorithm. The compound score is returned as-is:
//! it is the single feature fed to the direction classifier, so no extra
//! domain boosting is applied on top of it.
//!
//! # Example
//! ```rust,ignore
//! use newstrade::infrastructure::news::sentiment_analyzer::SentimentAnalyzer;
//!
//! let analyzer = SentimentAnalyzer::new();
//! let score = analyzer.analyze("Good news for Apple investors");
//! assert!(score > 0.05); // Positive
//! ```

use crate::domain::sentiment::PolarityScores;
use vader_sentiment::SentimentIntensityAnalyzer;

/// A stateless sentiment analyzer backed by VADER's lexicon.
///
/// VADER is tuned for short social media and news text, which makes it a
/// reasonable fit for headlines.
pub struct SentimentAnalyzer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentAnalyzer {
    /// Create a new sentiment analyzer instance.
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Full VADER breakdown for `text`. Empty text is neutral.
    pub fn polarity(&self, text: &str) -> PolarityScores {
        if text.trim().is_empty() {
            return PolarityScores::neutral();
        }

        let scores = self.analyzer.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);
        PolarityScores {
            neg: get("neg"),
            neu: get("neu"),
            pos: get("pos"),
            compound: get("compound").clamp(-1.0, 1.0),
        }
    }

    /// Analyze text and return the compound score between -1.0 and 1.0.
    ///
    /// - Score > 0.05: positive
    /// - Score < -0.05: negative
    /// - otherwise: neutral
    pub fn analyze(&self, text: &str) -> f64 {
        self.polarity(text).compound
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sentiment::SentimentLabel;

    #[test]
    fn test_positive_headlines() {
        let analyzer = SentimentAnalyzer::new();

        let positive_headlines = [
            "Good news for X",
            "Apple posts great quarter as iPhone sales win big",
            "Analysts love the excellent new product lineup",
        ];

        for headline in positive_headlines {
            let score = analyzer.analyze(headline);
            assert!(
                score > 0.05,
                "Expected positive score for '{}', got {}",
                headline,
                score
            );
        }
    }

    #[test]
    fn test_negative_headlines() {
        let analyzer = SentimentAnalyzer::new();

        let negative_headlines = [
            "Terrible quarter for Apple as sales fall",
            "Investors fear the worst after awful guidance",
            "Bad news: supplier crisis hurts production",
        ];

        for headline in negative_headlines {
            let score = analyzer.analyze(headline);
            assert!(
                score < -0.05,
                "Expected negative score for '{}', got {}",
                headline,
                score
            );
        }
    }

    #[test]
    fn test_neutral_headlines() {
        let analyzer = SentimentAnalyzer::new();

        let neutral_headlines = [
            "Apple stock trading volume on Tuesday",
            "Quarterly report released",
        ];

        for headline in neutral_headlines {
            let score = analyzer.analyze(headline);
            assert!(
                score.abs() < 0.5,
                "Expected neutral score for '{}', got {}",
                headline,
                score
            );
        }
    }

    #[test]
    fn test_empty_text() {
        let analyzer = SentimentAnalyzer::new();
        assert_eq!(analyzer.analyze(""), 0.0);
        assert_eq!(analyzer.analyze("   "), 0.0);
        assert_eq!(analyzer.polarity("").label(), SentimentLabel::Neutral);
    }

    #[test]
    fn test_polarity_components() {
        let analyzer = SentimentAnalyzer::new();
        let scores = analyzer.polarity("What a great, wonderful day");

        assert!(scores.pos > scores.neg);
        assert!((scores.neg + scores.neu + scores.pos - 1.0).abs() < 0.01);
        assert_eq!(scores.label(), SentimentLabel::Positive);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let analyzer = SentimentAnalyzer::new();
        let extreme = [
            "BEST BEST BEST GREAT GREAT AMAZING WONDERFUL LOVE!!!",
            "WORST WORST TERRIBLE HORRIBLE AWFUL HATE!!!",
        ];
        for text in extreme {
            let score = analyzer.analyze(text);
            assert!((-1.0..=1.0).contains(&score), "{} out of range", score);
        }
    }

    #[test]
    fn test_deterministic() {
        let analyzer = SentimentAnalyzer::new();
        let text = "Apple beats expectations";
        assert_eq!(analyzer.analyze(text), analyzer.analyze(text));
    }
}
