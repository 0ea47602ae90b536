//! Model-hub metadata collaborator.
//!
//! Metrics never talk to the hub directly; they hold an `Arc<dyn ModelHub>`
//! injected at construction time. The HTTP implementation lives in
//! [`http::HttpHub`]; [`NullHub`] is the stub selected when the tool runs
//! offline.

mod http;
mod types;

pub use http::HttpHub;
pub use types::{DatasetCard, DatasetInfo, ModelCard, ModelInfo, StringList};

use async_trait::async_trait;
use core::fmt::Debug;
use std::sync::Arc;

/// Outcome of a single collaborator fetch.
///
/// Metrics treat anything other than `Found` as "absent" and degrade to their
/// documented floor score; they never propagate the error.
#[derive(Debug, Clone)]
pub enum FetchResult<T> {
    /// The operation succeeded and data was found.
    Found(T),

    /// The requested resource does not exist on the hub.
    NotFound,

    /// An error occurred during the operation.
    Error(Arc<ohno::AppError>),
}

impl<T> FetchResult<T> {
    /// Returns `true` if the result is `Found`.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Converts this result into an `Option`, returning `Some` only for `Found`.
    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Found(data) => Some(data),
            _ => None,
        }
    }

    /// Returns a string describing the status of this result.
    #[must_use]
    pub const fn status_str(&self) -> &'static str {
        match self {
            Self::Found(_) => "Found",
            Self::NotFound => "NotFound",
            Self::Error(_) => "Error",
        }
    }
}

/// Read-only metadata access to the model hub.
///
/// All methods report failures through [`FetchResult`] rather than `Result`:
/// an unreachable hub is an expected condition for the metrics built on top of
/// this trait, not an error to propagate.
#[async_trait]
pub trait ModelHub: Debug + Send + Sync {
    /// Whether this implementation can actually reach a hub.
    ///
    /// The null implementation returns `false`, which some metrics use to
    /// distinguish "client unavailable" from "data absent".
    fn is_available(&self) -> bool {
        true
    }

    /// Fetch metadata for a model.
    async fn get_model_info(&self, model_id: &str) -> FetchResult<ModelInfo>;

    /// Fetch the model's README text.
    async fn get_model_readme(&self, model_id: &str) -> FetchResult<String>;

    /// Fetch metadata for a dataset.
    async fn get_dataset_info(&self, dataset_id: &str) -> FetchResult<DatasetInfo>;

    /// Fetch the structured card metadata attached to a dataset.
    async fn get_dataset_card_data(&self, dataset_id: &str) -> FetchResult<DatasetCard>;

    /// Fetch the dataset's README text.
    async fn get_dataset_readme(&self, dataset_id: &str) -> FetchResult<String>;
}

/// Stub hub used when running offline or when no hub is configured.
///
/// Reports itself as unavailable and returns `NotFound` for every query.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHub;

#[async_trait]
impl ModelHub for NullHub {
    fn is_available(&self) -> bool {
        false
    }

    async fn get_model_info(&self, _model_id: &str) -> FetchResult<ModelInfo> {
        FetchResult::NotFound
    }

    async fn get_model_readme(&self, _model_id: &str) -> FetchResult<String> {
        FetchResult::NotFound
    }

    async fn get_dataset_info(&self, _dataset_id: &str) -> FetchResult<DatasetInfo> {
        FetchResult::NotFound
    }

    async fn get_dataset_card_data(&self, _dataset_id: &str) -> FetchResult<DatasetCard> {
        FetchResult::NotFound
    }

    async fn get_dataset_readme(&self, _dataset_id: &str) -> FetchResult<String> {
        FetchResult::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_hub_reports_unavailable() {
        let hub = NullHub;
        assert!(!hub.is_available());
        assert!(!hub.get_model_info("org/model").await.is_found());
        assert!(!hub.get_model_readme("org/model").await.is_found());
        assert!(!hub.get_dataset_info("squad").await.is_found());
    }

    #[test]
    fn test_fetch_result_accessors() {
        let found: FetchResult<u32> = FetchResult::Found(7);
        assert!(found.is_found());
        assert_eq!(found.status_str(), "Found");
        assert_eq!(found.ok(), Some(7));

        let missing: FetchResult<u32> = FetchResult::NotFound;
        assert!(!missing.is_found());
        assert_eq!(missing.ok(), None);

        let error: FetchResult<u32> = FetchResult::Error(Arc::new(ohno::app_err!("boom")));
        assert_eq!(error.status_str(), "Error");
        assert_eq!(error.ok(), None);
    }
}
