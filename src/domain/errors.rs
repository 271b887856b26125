use std::fmt;
use thiserror::Error;

/// Failures a pipeline run can end with.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Fetch from {source_name} failed: {reason}")]
    Fetch { source_name: String, reason: String },

    #[error("Insufficient data: {rows} usable rows, need at least {required}")]
    InsufficientData { rows: usize, required: usize },

    #[error("Credential rejected by {provider}: {reason}")]
    Credential { provider: String, reason: String },

    #[error("No sentiment available: zero headlines were scored")]
    NoSentiment,

    #[error("Model error: {reason}")]
    Model { reason: String },
}

impl PipelineError {
    pub fn fetch(source_name: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn credential(provider: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Credential {
            provider: provider.into(),
            reason: reason.to_string(),
        }
    }

    pub fn model(reason: impl fmt::Display) -> Self {
        Self::Model {
            reason: reason.to_string(),
        }
    }
}

/// Pipeline stage, attached as context to every stage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    HeadlineFetch,
    SentimentScoring,
    PriceFetch,
    Training,
    Decision,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeadlineFetch => write!(f, "headline fetch"),
            Self::SentimentScoring => write!(f, "sentiment scoring"),
            Self::PriceFetch => write!(f, "price history fetch"),
            Self::Training => write!(f, "dataset build & training"),
            Self::Decision => write!(f, "decision"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_formatting() {
        let error = PipelineError::InsufficientData {
            rows: 1,
            required: 2,
        };

        let msg = error.to_string();
        assert!(msg.contains("1 usable rows"));
        assert!(msg.contains("at least 2"));
    }

    #[test]
    fn test_fetch_error_formatting() {
        let error = PipelineError::fetch("Yahoo Finance", "HTTP 404");
        assert_eq!(error.to_string(), "Fetch from Yahoo Finance failed: HTTP 404");
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::PriceFetch.to_string(), "price history fetch");
    }
}
