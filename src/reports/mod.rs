//! Report generation from scored resource bundles.

mod console;
mod json;

pub use console::generate as generate_console;
pub use json::generate as generate_json;

use crate::metrics::MetricResult;
use clap::ValueEnum;
use serde::Serialize;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// One metric's contribution to a report.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreEntry {
    pub name: &'static str,
    pub score: f64,
    pub notes: String,
}

/// Everything a report needs about one scored resource.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub model_url: String,
    pub model_id: String,
    pub overall_score: f64,
    pub entries: Vec<ScoreEntry>,
}

impl ScoreReport {
    /// Build a report from per-metric results. The overall score is the
    /// unweighted mean of the metric scores.
    #[must_use]
    pub fn new(model_url: impl Into<String>, model_id: impl Into<String>, results: Vec<(&'static str, MetricResult)>) -> Self {
        let entries: Vec<ScoreEntry> = results
            .into_iter()
            .map(|(name, result)| ScoreEntry {
                name,
                score: result.score(),
                notes: result.notes().to_string(),
            })
            .collect();

        let overall_score = if entries.is_empty() {
            0.0
        } else {
            entries.iter().map(|e| e.score).sum::<f64>() / entries.len() as f64
        };

        Self {
            model_url: model_url.into(),
            model_id: model_id.into(),
            overall_score,
            entries,
        }
    }
}
