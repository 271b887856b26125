// Direction model: dataset, classifier, decision
pub mod ml;

// Headline scoring
pub mod sentiment;

// Stage orchestrator
pub mod pipeline;

pub use pipeline::{Pipeline, PipelineReport};
