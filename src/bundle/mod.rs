//! Resource bundles and URL classification.
//!
//! A [`ResourceBundle`] describes one model resource on the hub together with
//! the code repositories and datasets associated with it. Bundles are built by
//! the caller, are immutable for the duration of a scoring pass, and are only
//! ever read by metrics.

use ohno::app_err;
use url::Url;

/// The kind of resource a URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum UrlKind {
    /// A code repository (GitHub).
    Code,

    /// A dataset hosted on the model hub.
    Dataset,

    /// Anything we can't classify.
    Unknown,
}

/// Classify a URL as pointing at code, a dataset, or something else.
#[must_use]
pub fn categorize_url(url: &str) -> UrlKind {
    if url.contains("github.com") {
        return UrlKind::Code;
    }

    if url.contains("huggingface.co/datasets") {
        return UrlKind::Dataset;
    }

    UrlKind::Unknown
}

/// Extract the short model identifier (`org/name` or `name`) from a hub model URL.
///
/// Bare identifiers such as `org/model` are accepted as-is so callers can pass
/// either form.
#[must_use]
pub fn parse_model_id(model_url: &str) -> Option<String> {
    if !model_url.starts_with("http://") && !model_url.starts_with("https://") && !model_url.starts_with("huggingface.co") {
        // Already a bare identifier
        let trimmed = model_url.trim_matches('/');
        return (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    let normalized = if model_url.starts_with("http") {
        model_url.to_string()
    } else {
        format!("https://{model_url}")
    };

    let parsed = Url::parse(&normalized).ok()?;
    if parsed.host_str() != Some("huggingface.co") {
        return None;
    }

    let segments: Vec<&str> = parsed.path().trim_matches('/').split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        // https://huggingface.co/datasets/... is not a model URL
        ["datasets", ..] => None,
        [name] => Some((*name).to_string()),
        [org, name, ..] => Some(format!("{org}/{name}")),
        [] => None,
    }
}

/// Extract a dataset identifier from a hub dataset URL.
///
/// Accepts bare identifiers (`squad`, `glue/cola`) as well as full URLs such
/// as `https://huggingface.co/datasets/org/name`.
#[must_use]
pub fn parse_dataset_id(dataset_url: &str) -> Option<String> {
    if dataset_url.is_empty() {
        return None;
    }

    if !dataset_url.starts_with("http") {
        return Some(dataset_url.trim_matches('/').to_string());
    }

    let parsed = Url::parse(dataset_url).ok()?;
    if parsed.host_str() != Some("huggingface.co") {
        return None;
    }

    let segments: Vec<&str> = parsed.path().trim_matches('/').split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        ["datasets", name] => Some((*name).to_string()),
        // datasets/org/name or datasets/name/config: keep the first two components
        ["datasets", first, second, ..] => Some(format!("{first}/{second}")),
        _ => None,
    }
}

/// The input value object passed to every metric.
#[derive(Debug, Clone)]
pub struct ResourceBundle {
    model_url: String,
    model_id: String,
    code_urls: Vec<String>,
    dataset_urls: Vec<String>,
}

impl ResourceBundle {
    /// Create a bundle for a model URL with its associated code and dataset URLs.
    ///
    /// # Errors
    ///
    /// Returns an error if a model identifier cannot be derived from `model_url`.
    pub fn new(
        model_url: impl Into<String>,
        code_urls: impl IntoIterator<Item = String>,
        dataset_urls: impl IntoIterator<Item = String>,
    ) -> crate::Result<Self> {
        let model_url = model_url.into();
        let model_id =
            parse_model_id(&model_url).ok_or_else(|| app_err!("could not derive a model identifier from '{model_url}'"))?;

        Ok(Self {
            model_url,
            model_id,
            code_urls: code_urls.into_iter().collect(),
            dataset_urls: dataset_urls.into_iter().collect(),
        })
    }

    /// The original model URL, as supplied by the caller.
    #[must_use]
    pub fn model_url(&self) -> &str {
        &self.model_url
    }

    /// The short model identifier derived from the model URL.
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Associated code repository URLs, in caller order. May be empty.
    #[must_use]
    pub fn code_urls(&self) -> &[String] {
        &self.code_urls
    }

    /// Associated dataset URLs or identifiers, in caller order. May be empty.
    #[must_use]
    pub fn dataset_urls(&self) -> &[String] {
        &self.dataset_urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_url() {
        assert_eq!(categorize_url("https://github.com/org/repo"), UrlKind::Code);
        assert_eq!(categorize_url("https://huggingface.co/datasets/squad"), UrlKind::Dataset);
        assert_eq!(categorize_url("https://example.com/whatever"), UrlKind::Unknown);
        assert_eq!(categorize_url(""), UrlKind::Unknown);
    }

    #[test]
    fn test_parse_model_id_from_url() {
        assert_eq!(parse_model_id("https://huggingface.co/org/model").as_deref(), Some("org/model"));
        assert_eq!(parse_model_id("https://huggingface.co/gpt2").as_deref(), Some("gpt2"));
        assert_eq!(parse_model_id("huggingface.co/org/model").as_deref(), Some("org/model"));
    }

    #[test]
    fn test_parse_model_id_bare_identifier() {
        assert_eq!(parse_model_id("org/model").as_deref(), Some("org/model"));
        assert_eq!(parse_model_id("gpt2").as_deref(), Some("gpt2"));
        assert_eq!(parse_model_id(""), None);
    }

    #[test]
    fn test_parse_model_id_rejects_datasets_and_foreign_hosts() {
        assert_eq!(parse_model_id("https://huggingface.co/datasets/squad"), None);
        assert_eq!(parse_model_id("https://example.com/org/model"), None);
    }

    #[test]
    fn test_parse_dataset_id() {
        assert_eq!(parse_dataset_id("https://huggingface.co/datasets/squad").as_deref(), Some("squad"));
        assert_eq!(
            parse_dataset_id("https://huggingface.co/datasets/glue/cola").as_deref(),
            Some("glue/cola")
        );
        assert_eq!(parse_dataset_id("squad").as_deref(), Some("squad"));
        assert_eq!(parse_dataset_id("org/name").as_deref(), Some("org/name"));
        assert_eq!(parse_dataset_id("https://example.com/datasets/squad"), None);
        assert_eq!(parse_dataset_id(""), None);
    }

    #[test]
    fn test_bundle_accessors() {
        let bundle = ResourceBundle::new(
            "https://huggingface.co/org/model",
            vec!["https://github.com/org/repo".to_string()],
            vec!["https://huggingface.co/datasets/squad".to_string()],
        )
        .unwrap();

        assert_eq!(bundle.model_url(), "https://huggingface.co/org/model");
        assert_eq!(bundle.model_id(), "org/model");
        assert_eq!(bundle.code_urls().len(), 1);
        assert_eq!(bundle.dataset_urls().len(), 1);
    }

    #[test]
    fn test_bundle_rejects_unparseable_model_url() {
        let result = ResourceBundle::new("https://example.com/not/a/model", vec![], vec![]);
        assert!(result.is_err());
    }
}
