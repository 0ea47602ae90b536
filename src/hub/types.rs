//! Wire types for hub metadata.
//!
//! Every field is optional or defaulted: the hub omits fields freely, and a
//! malformed document must never abort a metric.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Metadata for one model, as returned by the hub's model endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelInfo {
    pub author: Option<String>,

    /// Download count. Kept signed because the hub has been observed to return
    /// sentinel values; scoring treats anything below zero as zero.
    pub downloads: i64,

    pub likes: i64,
    pub last_modified: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub card_data: Option<ModelCard>,
}

/// Structured card metadata attached to a model.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModelCard {
    /// Link to an external source repository, when the card declares one.
    pub repository: Option<String>,
}

/// Metadata for one dataset, as returned by the hub's dataset endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetInfo {
    pub id: Option<String>,
    pub downloads: i64,
    pub likes: i64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Structured card metadata attached to a dataset.
///
/// Card authors write these fields as either a single string or a list, so
/// every field is a [`StringList`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatasetCard {
    pub task_categories: Option<StringList>,
    pub language: Option<StringList>,
    pub size_categories: Option<StringList>,
    pub tags: Option<StringList>,
    pub license: Option<StringList>,
    pub task_ids: Option<StringList>,
    pub multilinguality: Option<StringList>,
    pub source_datasets: Option<StringList>,
}

/// A card field that may be written as a single string or a list of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    One(String),
    Many(Vec<String>),
}

impl StringList {
    /// View the field uniformly as a slice of strings.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::One(s) => core::slice::from_ref(s),
            Self::Many(v) => v.as_slice(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    /// Case-insensitive substring match against any value of the field.
    #[must_use]
    pub fn any_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.values().iter().any(|v| v.to_lowercase().contains(&needle))
    }
}
