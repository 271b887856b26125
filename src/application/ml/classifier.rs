use super::dataset::train_test_split;
use super::predictor::DirectionPredictor;
use crate::config::PipelineConfig;
use crate::domain::errors::PipelineError;
use crate::domain::types::TrainingRow;
use serde::Serialize;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{
    LogisticRegression, LogisticRegressionParameters,
};
use std::fmt;
use tracing::{info, warn};

type Logistic = LogisticRegression<f64, i32, DenseMatrix<f64>, Vec<i32>>;

/// Fitting parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingConfig {
    pub test_fraction: f64,
    pub seed: u64,
    /// L2 penalty; 1.0 matches the usual `C = 1` default.
    pub alpha: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            alpha: 1.0,
        }
    }
}

impl From<&PipelineConfig> for TrainingConfig {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            test_fraction: config.test_fraction,
            seed: config.seed,
            ..Self::default()
        }
    }
}

/// One-feature direction model (sentiment -> price_up).
#[derive(Serialize)]
pub enum SentimentModel {
    Logistic(Logistic),
    /// The training split held a single class.
    Constant(i32),
}

impl fmt::Debug for SentimentModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logistic(_) => write!(f, "SentimentModel::Logistic"),
            Self::Constant(class) => write!(f, "SentimentModel::Constant({})", class),
        }
    }
}

fn feature_matrix(sentiments: &[f64]) -> Result<DenseMatrix<f64>, PipelineError> {
    let rows: Vec<Vec<f64>> = sentiments.iter().map(|s| vec![*s]).collect();
    DenseMatrix::from_2d_vec(&rows)
        .map_err(|e| PipelineError::model(format!("Matrix creation failed: {}", e)))
}

impl SentimentModel {
    pub fn predict(&self, sentiments: &[f64]) -> Result<Vec<i32>, PipelineError> {
        if sentiments.is_empty() {
            return Ok(Vec::new());
        }
        match self {
            Self::Logistic(model) => {
                let x = feature_matrix(sentiments)?;
                model
                    .predict(&x)
                    .map_err(|e| PipelineError::model(format!("Prediction failed: {}", e)))
            }
            Self::Constant(class) => Ok(vec![*class; sentiments.len()]),
        }
    }

    /// Serialized parameters; identical inputs produce identical output.
    pub fn to_json(&self) -> Result<String, PipelineError> {
        serde_json::to_string(self).map_err(PipelineError::model)
    }
}

impl DirectionPredictor for SentimentModel {
    fn predict(&self, sentiment: f64) -> Result<i32, PipelineError> {
        SentimentModel::predict(self, &[sentiment])?
            .first()
            .copied()
            .ok_or_else(|| PipelineError::model("No prediction returned"))
    }

    fn name(&self) -> &str {
        match self {
            Self::Logistic(_) => "SmartCore Logistic Regression",
            Self::Constant(_) => "Constant (single-class training set)",
        }
    }
}

/// A fitted model plus its held-out score.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub model: SentimentModel,
    /// Fraction of test-set predictions equal to the label.
    pub accuracy: f64,
    pub train_rows: usize,
    pub test_rows: usize,
}

pub struct SentimentClassifier;

impl SentimentClassifier {
    /// Splits `rows`, fits on the train side and scores on the test side.
    pub fn train(
        rows: &[TrainingRow],
        config: &TrainingConfig,
    ) -> Result<TrainingOutcome, PipelineError> {
        if rows.len() < 2 {
            return Err(PipelineError::InsufficientData {
                rows: rows.len(),
                required: 2,
            });
        }

        let (train, test) = train_test_split(rows, config.test_fraction, config.seed)?;
        let model = Self::fit(&train, config.alpha)?;

        let test_x: Vec<f64> = test.iter().map(|r| r.sentiment).collect();
        let predictions = model.predict(&test_x)?;
        let correct = predictions
            .iter()
            .zip(test.iter())
            .filter(|(p, r)| **p == r.label())
            .count();
        let accuracy = correct as f64 / test.len() as f64;

        info!(
            "Trained {} on {} rows; test accuracy {:.2} ({}/{})",
            DirectionPredictor::name(&model),
            train.len(),
            accuracy,
            correct,
            test.len()
        );

        Ok(TrainingOutcome {
            model,
            accuracy,
            train_rows: train.len(),
            test_rows: test.len(),
        })
    }

    fn fit(train: &[TrainingRow], alpha: f64) -> Result<SentimentModel, PipelineError> {
        let labels: Vec<i32> = train.iter().map(TrainingRow::label).collect();

        let first = labels[0];
        if labels.iter().all(|l| *l == first) {
            warn!(
                "Training split has a single class ({}); using a constant predictor",
                first
            );
            return Ok(SentimentModel::Constant(first));
        }

        let sentiments: Vec<f64> = train.iter().map(|r| r.sentiment).collect();
        let x = feature_matrix(&sentiments)?;
        let params = LogisticRegressionParameters::default().with_alpha(alpha);
        let model = LogisticRegression::fit(&x, &labels, params)
            .map_err(|e| PipelineError::model(format!("Training error: {}", e)))?;
        Ok(SentimentModel::Logistic(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn rows(labels: &[bool], sentiment: f64) -> Vec<TrainingRow> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        labels
            .iter()
            .enumerate()
            .map(|(i, up)| TrainingRow {
                date: start.checked_add_days(Days::new(i as u64)).unwrap(),
                close: 100.0,
                sentiment,
                price_change_pct: if *up { 0.01 } else { -0.01 },
                price_up: *up,
            })
            .collect()
    }

    fn alternating(n: usize) -> Vec<bool> {
        (0..n).map(|i| i % 3 != 0).collect()
    }

    #[test]
    fn test_rejects_fewer_than_two_rows() {
        let err = SentimentClassifier::train(&rows(&[true], 0.5), &TrainingConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InsufficientData { rows: 1, required: 2 }
        ));
    }

    #[test]
    fn test_single_class_reduces_to_constant() {
        let outcome =
            SentimentClassifier::train(&rows(&[true; 10], 0.4), &TrainingConfig::default())
                .unwrap();
        assert!(matches!(outcome.model, SentimentModel::Constant(1)));
        assert_eq!(outcome.accuracy, 1.0);
        assert_eq!(outcome.test_rows, 2);
        assert_eq!(outcome.train_rows, 8);
    }

    #[test]
    fn test_constant_feature_still_fits() {
        let data = rows(&alternating(59), 0.3);
        let outcome = SentimentClassifier::train(&data, &TrainingConfig::default()).unwrap();

        assert!(matches!(outcome.model, SentimentModel::Logistic(_)));
        assert_eq!(outcome.train_rows + outcome.test_rows, 59);
        assert!((0.0..=1.0).contains(&outcome.accuracy));

        let prediction = DirectionPredictor::predict(&outcome.model, 0.3).unwrap();
        assert!(prediction == 0 || prediction == 1);
    }

    #[test]
    fn test_training_is_deterministic() {
        let data = rows(&alternating(40), -0.2);
        let config = TrainingConfig::default();

        let first = SentimentClassifier::train(&data, &config).unwrap();
        let second = SentimentClassifier::train(&data, &config).unwrap();

        assert_eq!(first.accuracy, second.accuracy);
        assert_eq!(first.model.to_json().unwrap(), second.model.to_json().unwrap());
    }

    #[test]
    fn test_predict_empty_batch() {
        let model = SentimentModel::Constant(0);
        assert!(model.predict(&[]).unwrap().is_empty());
        assert_eq!(model.predict(&[0.1, 0.2]).unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_training_config_from_pipeline() {
        let pipeline = PipelineConfig {
            seed: 9,
            test_fraction: 0.25,
            ..PipelineConfig::default()
        };
        let config = TrainingConfig::from(&pipeline);
        assert_eq!(config.seed, 9);
        assert_eq!(config.test_fraction, 0.25);
        assert_eq!(config.alpha, 1.0);
    }
}
