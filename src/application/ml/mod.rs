pub mod classifier;
pub mod dataset;
pub mod decision;
pub mod predictor;

pub use classifier::{SentimentClassifier, SentimentModel, TrainingConfig, TrainingOutcome};
pub use dataset::{broadcast_sentiment, build_training_rows, train_test_split};
pub use decision::{Decision, DecisionEngine, latest_sentiment};
pub use predictor::DirectionPredictor;
