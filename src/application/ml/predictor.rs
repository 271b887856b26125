use crate::domain::errors::PipelineError;

/// Interface for direction models over the sentiment feature
pub trait DirectionPredictor: Send + Sync {
    /// Predict next-day direction: 1 = up, 0 = not up
    fn predict(&self, sentiment: f64) -> Result<i32, PipelineError>;

    /// Get model name/type
    fn name(&self) -> &str;
}
