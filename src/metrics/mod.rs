//! Quality metrics and the registry that holds them.
//!
//! Each metric is an independent scorer mapping a [`ResourceBundle`] to a
//! bounded score plus a human-readable explanation. Metrics share no mutable
//! state and may be computed concurrently.

mod bus_factor;
mod code_quality;
mod dataset_quality;
mod performance_claims;
mod ramp_up_time;
mod registry;

pub use bus_factor::BusFactor;
pub use code_quality::CodeQuality;
pub use dataset_quality::DatasetQuality;
pub use performance_claims::PerformanceClaims;
pub use ramp_up_time::RampUpTime;
pub use registry::Registry;

use crate::bundle::ResourceBundle;
use crate::config::Config;
use crate::hosting::HostingClient;
use crate::hub::ModelHub;
use async_trait::async_trait;
use core::fmt::Debug;
use core::time::Duration;
use serde::Serialize;
use std::sync::Arc;

/// The outcome of one metric computation.
#[derive(Debug, Clone, Serialize)]
pub struct MetricResult {
    score: f64,
    notes: String,
}

impl MetricResult {
    /// Create a result, clamping the score into `[0.0, 1.0]`.
    ///
    /// Non-finite scores collapse to `0.0` so the bounds invariant holds for
    /// arbitrary inputs.
    #[must_use]
    pub fn new(score: f64, notes: impl Into<String>) -> Self {
        let score = if score.is_finite() { score.clamp(0.0, 1.0) } else { 0.0 };
        Self { score, notes: notes.into() }
    }

    /// The quality score, always within `[0.0, 1.0]`.
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Human-readable rationale. Non-normative, for display only.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }
}

/// A scorer mapping a resource bundle to a bounded quality score.
///
/// `compute` must not fail: on any internal failure (network error, missing
/// data, parse failure) an implementation returns its documented floor score
/// with an explanatory note instead of propagating an error. The aggregating
/// caller relies on this to never abort on one metric's failure.
#[async_trait]
pub trait Metric: Debug + Send + Sync {
    /// Unique name this metric is registered under.
    fn name(&self) -> &'static str;

    /// One-line description of what the metric measures.
    fn description(&self) -> &'static str;

    /// Score one resource bundle.
    async fn compute(&self, resource: &ResourceBundle) -> MetricResult;
}

/// Shared collaborators injected into the built-in metrics.
#[derive(Debug, Clone)]
pub struct MetricDeps {
    pub hub: Arc<dyn ModelHub>,
    pub hosting: Arc<HostingClient>,
    pub config: Arc<Config>,
}

/// Build a registry populated with the five built-in metrics.
pub fn builtin(deps: &MetricDeps) -> crate::Result<Registry> {
    let clone_timeout = Duration::from_secs(deps.config.clone_timeout_secs);

    let mut registry = Registry::new();
    registry.register(Box::new(BusFactor::new(
        Arc::clone(&deps.hub),
        Arc::clone(&deps.hosting),
        &deps.config.known_orgs,
    )))?;
    registry.register(Box::new(CodeQuality::new(clone_timeout, deps.config.max_code_repos)))?;
    registry.register(Box::new(DatasetQuality::new(Arc::clone(&deps.hub), deps.config.max_datasets)))?;
    registry.register(Box::new(PerformanceClaims::new(Arc::clone(&deps.hub))))?;
    registry.register(Box::new(RampUpTime::new(Arc::clone(&deps.hub))))?;

    Ok(registry)
}
