//! Plain-text rendering of a pipeline run for stdout.

use crate::application::PipelineReport;
use crate::domain::sentiment::SentimentLabel;
use crate::domain::types::{Headline, PriceBar, Recommendation};
use std::fmt::Write;

/// Number of preview bars shown.
pub const PREVIEW_TAIL: usize = 5;

pub fn render_headlines(headlines: &[Headline]) -> String {
    let mut out = String::from("Latest headlines:\n");
    if headlines.is_empty() {
        out.push_str("  (none)\n");
    }
    for (i, headline) in headlines.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", i + 1, headline.title);
    }
    out
}

pub fn render_scores(headlines: &[Headline], scores: &[f64]) -> String {
    let mut out = String::from("Sentiment scores:\n");
    for (headline, score) in headlines.iter().zip(scores) {
        let _ = writeln!(
            out,
            "  score: {:+.4} ({})  {}",
            score,
            SentimentLabel::from_score(*score),
            headline.title
        );
    }
    out
}

/// Last `n` bars as a table.
pub fn render_preview(ticker: &str, bars: &[PriceBar], n: usize) -> String {
    let mut out = format!("Recent prices for {}:\n", ticker);
    let _ = writeln!(
        out,
        "  {:<10} {:>10} {:>10} {:>10} {:>10} {:>12}",
        "Date", "Open", "High", "Low", "Close", "Volume"
    );
    let skip = bars.len().saturating_sub(n);
    for bar in &bars[skip..] {
        let _ = writeln!(
            out,
            "  {:<10} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12}",
            bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
        );
    }
    out
}

pub fn render_accuracy(accuracy: f64) -> String {
    format!("Model accuracy: {:.2}", accuracy)
}

pub fn render_recommendation(recommendation: Recommendation, ticker: &str) -> String {
    format!("{} signal for {}", recommendation.banner(), ticker)
}

pub fn render_report(report: &PipelineReport) -> String {
    let mut out = String::new();
    out.push_str(&render_headlines(&report.headlines));
    out.push('\n');
    out.push_str(&render_scores(&report.headlines, &report.scores));
    out.push('\n');
    out.push_str(&render_preview(&report.ticker, &report.preview, PREVIEW_TAIL));
    out.push('\n');
    let _ = writeln!(
        out,
        "Trained on {} of {} rows ({} history bars), tested on {}",
        report.outcome.train_rows,
        report.training_rows,
        report.history_bars,
        report.outcome.test_rows
    );
    out.push_str(&render_accuracy(report.outcome.accuracy));
    out.push('\n');
    out.push_str(&render_recommendation(
        report.decision.recommendation,
        &report.ticker,
    ));
    out.push('\n');
    out
}
