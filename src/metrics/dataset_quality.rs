//! Dataset-quality metric: how well curated are the datasets a model links to?
//!
//! Each dataset is scored from hub metadata alone across five weighted
//! aspects: popularity, documentation, card metadata completeness, diversity
//! indicators, and licensing. Nothing is downloaded beyond metadata and the
//! dataset card.

use super::{Metric, MetricResult};
use crate::bundle::{ResourceBundle, parse_dataset_id};
use crate::hub::{DatasetCard, DatasetInfo, ModelHub, StringList};
use async_trait::async_trait;
use std::sync::Arc;

const LOG_TARGET: &str = "   metrics";

/// Score when the hub collaborator is unavailable but datasets are linked.
const OFFLINE_SCORE: f64 = 0.1;

const POPULARITY_WEIGHT: f64 = 0.25;
const DOCUMENTATION_WEIGHT: f64 = 0.30;
const METADATA_WEIGHT: f64 = 0.20;
const DIVERSITY_WEIGHT: f64 = 0.15;
const LICENSING_WEIGHT: f64 = 0.10;

/// README section headings that indicate real documentation effort.
const DOC_SECTIONS: [&str; 5] = ["dataset", "description", "usage", "citation", "license"];

/// Size-category values that indicate a large-scale dataset.
const LARGE_SIZE_CATEGORIES: [&str; 5] = ["100K<n<1M", "1M<n<10M", "10M<n<100M", "100M<n<1B", "n>1B"];

/// Licenses considered permissive for reuse.
const OPEN_LICENSES: [&str; 6] = ["mit", "apache-2.0", "bsd", "cc-by", "cc0", "unlicense"];

/// Tags that signal attention to responsible-data concerns.
const ETHICS_TAGS: [&str; 5] = ["ethics", "bias", "fairness", "privacy", "responsible-ai"];

#[derive(Debug)]
pub struct DatasetQuality {
    hub: Arc<dyn ModelHub>,
    max_datasets: usize,
}

impl DatasetQuality {
    #[must_use]
    pub fn new(hub: Arc<dyn ModelHub>, max_datasets: usize) -> Self {
        Self { hub, max_datasets }
    }

    async fn analyze_dataset(&self, dataset_id: &str) -> Option<f64> {
        let info = self.hub.get_dataset_info(dataset_id).await.ok()?;
        let card = self.hub.get_dataset_card_data(dataset_id).await.ok().unwrap_or_default();
        let readme = self.hub.get_dataset_readme(dataset_id).await.ok();

        let score = popularity_score(&info) * POPULARITY_WEIGHT
            + documentation_score(readme.as_deref(), &card) * DOCUMENTATION_WEIGHT
            + metadata_score(&card) * METADATA_WEIGHT
            + diversity_score(&card) * DIVERSITY_WEIGHT
            + licensing_score(&card) * LICENSING_WEIGHT;

        log::debug!(target: LOG_TARGET, "Dataset '{dataset_id}' scored {score:.3}");
        Some(score)
    }
}

#[async_trait]
impl Metric for DatasetQuality {
    fn name(&self) -> &'static str {
        "dataset_quality"
    }

    fn description(&self) -> &'static str {
        "Curation quality of the datasets the model links to"
    }

    async fn compute(&self, resource: &ResourceBundle) -> MetricResult {
        let dataset_ids: Vec<String> = resource
            .dataset_urls()
            .iter()
            .filter_map(|url| parse_dataset_id(url.as_str()))
            .take(self.max_datasets)
            .collect();

        if dataset_ids.is_empty() {
            return MetricResult::new(
                0.0,
                format!("No datasets found for {}. Quality assessment not possible.", resource.model_url()),
            );
        }

        if !self.hub.is_available() {
            return MetricResult::new(
                OFFLINE_SCORE,
                format!("{} dataset(s) linked but the hub is unreachable.", dataset_ids.len()),
            );
        }

        let mut total = 0.0;
        let mut analyzed = 0usize;
        for dataset_id in &dataset_ids {
            if let Some(score) = self.analyze_dataset(dataset_id).await {
                total += score;
                analyzed += 1;
            } else {
                log::warn!(target: LOG_TARGET, "Could not fetch metadata for dataset '{dataset_id}'");
            }
        }

        if analyzed == 0 {
            return MetricResult::new(
                0.0,
                format!("None of the {} linked dataset(s) could be fetched from the hub.", dataset_ids.len()),
            );
        }

        // Small bonus when the model draws on several scoreable datasets
        let multi_dataset_bonus = ((analyzed.saturating_sub(1)) as f64 * 0.05).min(0.1);
        let score = total / analyzed as f64 + multi_dataset_bonus;

        MetricResult::new(score, format!("Analyzed {analyzed} of {} linked dataset(s).", dataset_ids.len()))
    }
}

/// Log-scaled popularity from download and like counts.
fn popularity_score(info: &DatasetInfo) -> f64 {
    let downloads = info.downloads.max(0) as f64;
    let likes = info.likes.max(0) as f64;

    let download_part = (((downloads + 1.0).log10()) / 4.0).min(1.0);
    let like_part = (((likes + 1.0).log10()) / 2.0).min(1.0);

    download_part * 0.7 + like_part * 0.3
}

/// README depth plus the presence of descriptive card fields.
fn documentation_score(readme: Option<&str>, card: &DatasetCard) -> f64 {
    let mut score = 0.0;

    if let Some(readme) = readme {
        let lower = readme.to_lowercase();
        score += 0.5;

        if readme.len() > 200 {
            score += 0.15;
        }

        let found_sections = DOC_SECTIONS.iter().filter(|section| lower.contains(*section)).count();
        score += found_sections as f64 / DOC_SECTIONS.len() as f64 * 0.15;
    }

    for field in [&card.task_categories, &card.language, &card.size_categories, &card.source_datasets] {
        if field.as_ref().is_some_and(|f| !f.is_empty()) {
            score += 0.05;
        }
    }

    score.min(1.0)
}

/// Completeness of the structured card metadata.
fn metadata_score(card: &DatasetCard) -> f64 {
    let mut points: f64 = 0.0;

    let present = |field: &Option<StringList>| field.as_ref().is_some_and(|f| !f.is_empty());

    if present(&card.task_categories) {
        points += 1.5;
    }
    if present(&card.language) {
        points += 1.5;
    }
    if present(&card.size_categories) {
        points += 1.0;
    }
    if present(&card.tags) {
        points += 1.0;
    }
    if present(&card.task_ids) {
        points += 0.5;
    }
    if present(&card.multilinguality) {
        points += 0.25;
    }
    if present(&card.source_datasets) {
        points += 0.25;
    }

    (points / 6.0).min(1.0)
}

/// Coverage breadth: languages, scale, task variety, source variety.
fn diversity_score(card: &DatasetCard) -> f64 {
    let mut score: f64 = 0.0;

    match card.language.as_ref().map(StringList::len).unwrap_or_default() {
        0 => {}
        1 => score += 0.2,
        _ => score += 0.4,
    }

    if let Some(sizes) = &card.size_categories
        && !sizes.is_empty()
    {
        score += 0.3;
        if LARGE_SIZE_CATEGORIES.iter().any(|cat| sizes.any_contains(cat)) {
            score += 0.2;
        }
    }

    match card.task_categories.as_ref().map(StringList::len).unwrap_or_default() {
        0 => {}
        1 => score += 0.2,
        _ => score += 0.3,
    }

    if card.source_datasets.as_ref().map(StringList::len).unwrap_or_default() > 1 {
        score += 0.1;
    }

    score.min(1.0)
}

/// License clarity plus responsible-data tagging.
fn licensing_score(card: &DatasetCard) -> f64 {
    let mut score: f64 = match &card.license {
        Some(license) if !license.is_empty() => {
            if OPEN_LICENSES.iter().any(|open| license.any_contains(open)) {
                0.8
            } else {
                0.5
            }
        }
        _ => 0.2,
    };

    if let Some(tags) = &card.tags
        && ETHICS_TAGS.iter().any(|tag| tags.any_contains(tag))
    {
        score += 0.2;
    }

    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::{FetchResult, ModelInfo, NullHub};

    fn list(values: &[&str]) -> Option<StringList> {
        Some(StringList::Many(values.iter().map(|v| (*v).to_string()).collect()))
    }

    #[derive(Debug)]
    struct CannedHub {
        info: DatasetInfo,
        card: DatasetCard,
        readme: Option<String>,
    }

    #[async_trait]
    impl ModelHub for CannedHub {
        async fn get_model_info(&self, _model_id: &str) -> FetchResult<ModelInfo> {
            FetchResult::NotFound
        }

        async fn get_model_readme(&self, _model_id: &str) -> FetchResult<String> {
            FetchResult::NotFound
        }

        async fn get_dataset_info(&self, _dataset_id: &str) -> FetchResult<DatasetInfo> {
            FetchResult::Found(self.info.clone())
        }

        async fn get_dataset_card_data(&self, _dataset_id: &str) -> FetchResult<DatasetCard> {
            FetchResult::Found(self.card.clone())
        }

        async fn get_dataset_readme(&self, _dataset_id: &str) -> FetchResult<String> {
            match &self.readme {
                Some(text) => FetchResult::Found(text.clone()),
                None => FetchResult::NotFound,
            }
        }
    }

    #[test]
    fn test_popularity_score_scales_with_counts() {
        let quiet = DatasetInfo::default();
        assert!((popularity_score(&quiet) - 0.0).abs() < f64::EPSILON);

        let popular = DatasetInfo {
            downloads: 1_000_000,
            likes: 500,
            ..DatasetInfo::default()
        };
        let score = popularity_score(&popular);
        assert!(score > 0.9);
        assert!(score <= 1.0);

        let negative = DatasetInfo {
            downloads: -5,
            likes: -5,
            ..DatasetInfo::default()
        };
        assert!((popularity_score(&negative) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_documentation_score_sections() {
        let card = DatasetCard::default();
        assert!((documentation_score(None, &card) - 0.0).abs() < f64::EPSILON);

        let short = documentation_score(Some("tiny"), &card);
        assert!((short - 0.5).abs() < 1e-9);

        let readme = format!(
            "# Dataset Description\n\n## Usage\n\n## Citation\n\n## License\n\n{}",
            "x".repeat(300)
        );
        let full = documentation_score(Some(&readme), &card);
        // 0.5 + 0.15 length + all 5 sections
        assert!((full - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_metadata_score_caps_at_one() {
        assert!((metadata_score(&DatasetCard::default()) - 0.0).abs() < f64::EPSILON);

        let card = DatasetCard {
            task_categories: list(&["qa"]),
            language: list(&["en"]),
            size_categories: list(&["1M<n<10M"]),
            tags: list(&["nlp"]),
            task_ids: list(&["extractive-qa"]),
            multilinguality: list(&["monolingual"]),
            source_datasets: list(&["original"]),
            license: None,
        };
        // 6.0 / 6.0
        assert!((metadata_score(&card) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_diversity_rewards_breadth() {
        let narrow = DatasetCard {
            language: list(&["en"]),
            task_categories: list(&["qa"]),
            ..DatasetCard::default()
        };
        assert!((diversity_score(&narrow) - 0.4).abs() < 1e-9);

        let broad = DatasetCard {
            language: list(&["en", "fr", "de"]),
            size_categories: list(&["1M<n<10M"]),
            task_categories: list(&["qa", "summarization"]),
            source_datasets: list(&["a", "b"]),
            ..DatasetCard::default()
        };
        // 0.4 + 0.3 + 0.2 + 0.3 + 0.1 caps at 1.0
        assert!((diversity_score(&broad) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_licensing_tiers() {
        assert!((licensing_score(&DatasetCard::default()) - 0.2).abs() < 1e-9);

        let open = DatasetCard {
            license: list(&["apache-2.0"]),
            ..DatasetCard::default()
        };
        assert!((licensing_score(&open) - 0.8).abs() < 1e-9);

        let restrictive = DatasetCard {
            license: list(&["proprietary"]),
            ..DatasetCard::default()
        };
        assert!((licensing_score(&restrictive) - 0.5).abs() < 1e-9);

        let ethical = DatasetCard {
            license: list(&["apache-2.0"]),
            tags: list(&["bias", "nlp"]),
            ..DatasetCard::default()
        };
        assert!((licensing_score(&ethical) - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_no_datasets_scores_zero() {
        let metric = DatasetQuality::new(Arc::new(NullHub), 5);
        let bundle = ResourceBundle::new("org/model", vec![], vec![]).unwrap();

        let result = metric.compute(&bundle).await;
        assert!((result.score() - 0.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_offline_hub_with_datasets_scores_floor() {
        let metric = DatasetQuality::new(Arc::new(NullHub), 5);
        let bundle = ResourceBundle::new("org/model", vec![], vec!["https://huggingface.co/datasets/squad".to_string()]).unwrap();

        let result = metric.compute(&bundle).await;
        assert!((result.score() - 0.1).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_bare_metadata_dataset_lands_near_floor() {
        // Fetchable dataset with empty metadata and a short readme scores
        // 0.30 * 0.5 (readme) + 0.10 * 0.2 (no license) = 0.17
        let hub = CannedHub {
            info: DatasetInfo::default(),
            card: DatasetCard::default(),
            readme: Some("minimal".to_string()),
        };
        let metric = DatasetQuality::new(Arc::new(hub), 5);
        let bundle = ResourceBundle::new("org/model", vec![], vec!["squad".to_string()]).unwrap();

        let result = metric.compute(&bundle).await;
        assert!((result.score() - 0.17).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_rich_dataset_scores_high() {
        let readme = format!(
            "# Dataset Description\n\n## Usage\n\n## Citation\n\n## License\n\n{}",
            "x".repeat(300)
        );
        let hub = CannedHub {
            info: DatasetInfo {
                downloads: 5_000_000,
                likes: 800,
                ..DatasetInfo::default()
            },
            card: DatasetCard {
                task_categories: list(&["qa", "summarization"]),
                language: list(&["en", "fr"]),
                size_categories: list(&["1M<n<10M"]),
                tags: list(&["nlp", "bias"]),
                task_ids: list(&["extractive-qa"]),
                multilinguality: list(&["multilingual"]),
                source_datasets: list(&["a", "b"]),
                license: list(&["cc-by"]),
            },
            readme: Some(readme),
        };
        let metric = DatasetQuality::new(Arc::new(hub), 5);
        let bundle = ResourceBundle::new("org/model", vec![], vec!["squad".to_string()]).unwrap();

        let result = metric.compute(&bundle).await;
        assert!(result.score() > 0.85);
        assert!(result.score() <= 1.0);
    }
}
