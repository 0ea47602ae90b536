//! Ramp-up-time metric: how quickly could a newcomer start using this model?
//!
//! A README with a usage section is the main signal; runnable code blocks
//! raise it further.

use super::{Metric, MetricResult};
use crate::bundle::ResourceBundle;
use crate::hub::ModelHub;
use async_trait::async_trait;
use std::sync::Arc;

/// Score when no README is available, or when one exists but offers no
/// guidance on how to use the model.
const FLOOR_SCORE: f64 = 0.2;

#[derive(Debug)]
pub struct RampUpTime {
    hub: Arc<dyn ModelHub>,
}

impl RampUpTime {
    #[must_use]
    pub fn new(hub: Arc<dyn ModelHub>) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl Metric for RampUpTime {
    fn name(&self) -> &'static str {
        "ramp_up_time"
    }

    fn description(&self) -> &'static str {
        "How quickly a newcomer can start using the model"
    }

    async fn compute(&self, resource: &ResourceBundle) -> MetricResult {
        let readme = self.hub.get_model_readme(resource.model_id()).await.ok();

        match readme.filter(|text| !text.trim().is_empty()) {
            Some(readme) => {
                let score = score_readme(&readme);
                MetricResult::new(score, format!("README for {} examined for usage guidance.", resource.model_id()))
            }
            None => MetricResult::new(
                FLOOR_SCORE,
                format!("No README available for {}. Ramp-up effort is unknown.", resource.model_id()),
            ),
        }
    }
}

fn score_readme(readme: &str) -> f64 {
    let lower = readme.to_lowercase();

    if !lower.contains("usage") && !lower.contains("example") {
        return FLOOR_SCORE;
    }

    let mut score: f64 = 0.6;
    if lower.contains("```") {
        score += 0.3;
    }
    score.min(1.0)
}
