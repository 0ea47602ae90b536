//! Performance-claims metric: does the model card back up its claims?
//!
//! Looks for evaluation vocabulary, benchmark tables, and citations in the
//! model README. Purely lexical; no attempt is made to verify the numbers.

use super::{Metric, MetricResult};
use crate::bundle::ResourceBundle;
use crate::hub::ModelHub;
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;
use std::sync::LazyLock;

/// Score when no README is available to examine.
const FLOOR_SCORE: f64 = 0.2;

/// Evaluation-metric vocabulary searched for in the README.
const EVAL_KEYWORDS: [&str; 7] = ["bleu", "f1", "accuracy", "rouge", "perplexity", "cer", "wer"];

/// At most this many distinct keywords count toward the score.
const KEYWORD_CAP: usize = 5;

static CITATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(arxiv\.org|paperswithcode\.com|huggingface\.co/evaluate)").expect("invalid regex"));

#[derive(Debug)]
pub struct PerformanceClaims {
    hub: Arc<dyn ModelHub>,
}

impl PerformanceClaims {
    #[must_use]
    pub fn new(hub: Arc<dyn ModelHub>) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl Metric for PerformanceClaims {
    fn name(&self) -> &'static str {
        "performance_claims"
    }

    fn description(&self) -> &'static str {
        "Evidence in the model card for stated performance"
    }

    async fn compute(&self, resource: &ResourceBundle) -> MetricResult {
        let readme = self.hub.get_model_readme(resource.model_id()).await.ok();

        match readme.filter(|text| !text.trim().is_empty()) {
            Some(readme) => {
                let (score, found) = score_readme(&readme);
                MetricResult::new(
                    score,
                    format!("README mentions {found} evaluation keyword(s) for {}.", resource.model_id()),
                )
            }
            None => MetricResult::new(
                FLOOR_SCORE,
                format!("No README available for {}. Performance claims cannot be verified.", resource.model_id()),
            ),
        }
    }
}

/// Score a README's evaluation evidence. Returns the score and the number of
/// distinct evaluation keywords found.
fn score_readme(readme: &str) -> (f64, usize) {
    let lower = readme.to_lowercase();

    let found = EVAL_KEYWORDS.iter().filter(|kw| lower.contains(*kw)).count();
    let mut score = 0.2 + 0.1 * found.min(KEYWORD_CAP) as f64;

    // Markdown tables are how benchmark results are typically presented
    if lower.contains(" | ") && lower.contains("---") {
        score += 0.2;
    }

    if CITATION_REGEX.is_match(&lower) {
        score += 0.2;
    }

    (score.min(1.0), found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::NullHub;

    #[test]
    fn test_empty_readme_scores_floor() {
        let (score, found) = score_readme("just a model");
        assert!((score - 0.2).abs() < f64::EPSILON);
        assert_eq!(found, 0);
    }

    #[test]
    fn test_score_monotonic_in_keyword_count() {
        let mut previous = 0.0;
        let mut text = String::from("results:");
        for keyword in EVAL_KEYWORDS {
            text.push(' ');
            text.push_str(keyword);
            let (score, _) = score_readme(&text);
            assert!(score >= previous, "adding '{keyword}' lowered the score");
            previous = score;
        }
    }

    #[test]
    fn test_keyword_count_is_capped() {
        let all = EVAL_KEYWORDS.join(" ");
        let (score, found) = score_readme(&all);
        assert_eq!(found, EVAL_KEYWORDS.len());
        // 0.2 + 0.1 * 5, despite 7 keywords present
        assert!((score - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_benchmark_table_bonus() {
        let readme = "| Task | accuracy |\n| --- | --- |\n| SST-2 | 0.91 |";
        let (score, _) = score_readme(readme);
        // 0.2 base + 0.1 for "accuracy" + 0.2 table
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_citation_bonus() {
        let (score, _) = score_readme("See https://arxiv.org/abs/1810.04805 for details.");
        assert!((score - 0.4).abs() < 1e-9);

        let (score, _) = score_readme("Evaluated with https://huggingface.co/evaluate tooling.");
        assert!((score - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_fully_evidenced_readme_caps_at_one() {
        let readme = format!(
            "Benchmarks: {}\n| Model | Score |\n| --- | --- |\n| ours | 0.9 |\nhttps://arxiv.org/abs/0000.00000",
            EVAL_KEYWORDS.join(", ")
        );
        let (score, _) = score_readme(&readme);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_missing_readme_scores_floor() {
        let metric = PerformanceClaims::new(Arc::new(NullHub));
        let bundle = ResourceBundle::new("org/model", vec![], vec![]).unwrap();

        let result = metric.compute(&bundle).await;
        assert!((result.score() - 0.2).abs() < f64::EPSILON);
        assert!(result.notes().contains("No README"));
    }
}
