use super::predictor::DirectionPredictor;
use crate::domain::errors::PipelineError;
use crate::domain::types::Recommendation;
use tracing::info;

/// The sentiment of the most recent headline (index 0 in fetch order).
pub fn latest_sentiment(scores: &[f64]) -> Result<f64, PipelineError> {
    scores.first().copied().ok_or(PipelineError::NoSentiment)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub sentiment: f64,
    pub prediction: i32,
    pub recommendation: Recommendation,
}

pub struct DecisionEngine;

impl DecisionEngine {
    pub fn decide(
        predictor: &dyn DirectionPredictor,
        latest_sentiment: f64,
    ) -> Result<Decision, PipelineError> {
        let prediction = predictor.predict(latest_sentiment)?;
        let recommendation = Recommendation::from_prediction(prediction);
        info!(
            "{} predicted {} for sentiment {:+.4} -> {}",
            predictor.name(),
            prediction,
            latest_sentiment,
            recommendation
        );
        Ok(Decision {
            sentiment: latest_sentiment,
            prediction,
            recommendation,
        })
    }
}
