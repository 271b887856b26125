//! Turns a daily price series plus the run's sentiment into labelled rows.

use crate::domain::errors::PipelineError;
use crate::domain::types::{PriceBar, TrainingRow};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

/// Pairs every bar with the same sentiment value.
///
/// This is a constant-feature join, not a time-aligned one: the run only has
/// today's headlines, so each historical day receives the current score and
/// the feature column has zero variance.
pub fn broadcast_sentiment(bars: &[PriceBar], sentiment: f64) -> Vec<(&PriceBar, f64)> {
    bars.iter().map(|bar| (bar, sentiment)).collect()
}

/// Builds one row per bar that has a next-day close; the final bar is never a
/// row. Fails when no row survives.
pub fn build_training_rows(
    bars: &[PriceBar],
    sentiment: f64,
) -> Result<Vec<TrainingRow>, PipelineError> {
    let joined = broadcast_sentiment(bars, sentiment);

    let mut rows = Vec::with_capacity(joined.len().saturating_sub(1));
    for pair in joined.windows(2) {
        let (today, sentiment) = pair[0];
        let (tomorrow, _) = pair[1];

        let price_change_pct = (tomorrow.close - today.close) / today.close;
        if !price_change_pct.is_finite() || !sentiment.is_finite() {
            warn!("Dataset: dropping row for {} (undefined change)", today.date);
            continue;
        }

        rows.push(TrainingRow {
            date: today.date,
            close: today.close,
            sentiment,
            price_change_pct,
            price_up: price_change_pct > 0.0,
        });
    }

    if rows.is_empty() {
        return Err(PipelineError::InsufficientData {
            rows: 0,
            required: 1,
        });
    }

    debug!(
        "Dataset: {} rows from {} bars (sentiment {:+.4})",
        rows.len(),
        bars.len(),
        sentiment
    );
    Ok(rows)
}

/// Seeded shuffle-and-split. `ceil(n * test_fraction)` rows go to the test
/// side; both sides must be non-empty.
pub fn train_test_split<T: Clone>(
    rows: &[T],
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<T>, Vec<T>), PipelineError> {
    let n = rows.len();
    let n_test = (n as f64 * test_fraction).ceil() as usize;
    let n_train = n.saturating_sub(n_test);
    if n < 2 || n_test == 0 || n_train == 0 {
        return Err(PipelineError::InsufficientData { rows: n, required: 2 });
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test = indices[..n_test].iter().map(|&i| rows[i].clone()).collect();
    let train = indices[n_test..].iter().map(|&i| rows[i].clone()).collect();
    Ok((train, test))
}
