use super::{DatasetCard, DatasetInfo, FetchResult, ModelHub, ModelInfo};
use async_trait::async_trait;
use core::time::Duration;
use ohno::app_err;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

const LOG_TARGET: &str = "       hub";

/// Envelope used to pull the card data out of a dataset document.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DatasetEnvelope {
    card_data: Option<DatasetCard>,
}

/// HTTP implementation of [`ModelHub`] against the hub's REST API.
#[derive(Debug, Clone)]
pub struct HttpHub {
    client: reqwest::Client,
    base_url: String,
}

impl HttpHub {
    /// Create a new hub client with a bounded per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder().user_agent("hub-rank").timeout(timeout).build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            let _ = base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    /// The base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> FetchResult<T> {
        let resp = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Request to '{url}' failed: {e:#}");
                return FetchResult::Error(Arc::new(e.into()));
            }
        };

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            log::debug!(target: LOG_TARGET, "Resource at '{url}' not found (404)");
            return FetchResult::NotFound;
        }

        if !status.is_success() {
            log::debug!(target: LOG_TARGET, "Request to '{url}' failed with status {status}");
            return FetchResult::Error(Arc::new(app_err!("request to '{url}' failed with status {status}")));
        }

        match resp.json::<T>().await {
            Ok(value) => FetchResult::Found(value),
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Could not parse response from '{url}': {e:#}");
                FetchResult::Error(Arc::new(e.into()))
            }
        }
    }

    async fn get_text(&self, url: String) -> FetchResult<String> {
        let resp = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Request to '{url}' failed: {e:#}");
                return FetchResult::Error(Arc::new(e.into()));
            }
        };

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return FetchResult::NotFound;
        }

        if !status.is_success() {
            return FetchResult::Error(Arc::new(app_err!("request to '{url}' failed with status {status}")));
        }

        match resp.text().await {
            Ok(text) => FetchResult::Found(text),
            Err(e) => FetchResult::Error(Arc::new(e.into())),
        }
    }
}

#[async_trait]
impl ModelHub for HttpHub {
    async fn get_model_info(&self, model_id: &str) -> FetchResult<ModelInfo> {
        log::debug!(target: LOG_TARGET, "Querying hub for model '{model_id}'");
        self.get_json(format!("{}/api/models/{model_id}", self.base_url)).await
    }

    async fn get_model_readme(&self, model_id: &str) -> FetchResult<String> {
        self.get_text(format!("{}/{model_id}/resolve/main/README.md", self.base_url)).await
    }

    async fn get_dataset_info(&self, dataset_id: &str) -> FetchResult<DatasetInfo> {
        log::debug!(target: LOG_TARGET, "Querying hub for dataset '{dataset_id}'");
        self.get_json(format!("{}/api/datasets/{dataset_id}", self.base_url)).await
    }

    async fn get_dataset_card_data(&self, dataset_id: &str) -> FetchResult<DatasetCard> {
        let envelope: FetchResult<DatasetEnvelope> = self.get_json(format!("{}/api/datasets/{dataset_id}", self.base_url)).await;

        match envelope {
            // A dataset without card metadata is treated as having an empty card
            FetchResult::Found(envelope) => FetchResult::Found(envelope.card_data.unwrap_or_default()),
            FetchResult::NotFound => FetchResult::NotFound,
            FetchResult::Error(e) => FetchResult::Error(e),
        }
    }

    async fn get_dataset_readme(&self, dataset_id: &str) -> FetchResult<String> {
        self.get_text(format!("{}/datasets/{dataset_id}/resolve/main/README.md", self.base_url))
            .await
    }
}
