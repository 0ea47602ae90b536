//! Minimal GitHub REST client for the repository signals the metrics consult:
//! contributor counts and latest-commit recency.

use crate::Result;
use crate::hosting::RepoSpec;
use chrono::{DateTime, Utc};
use core::time::Duration;
use ohno::IntoAppError;
use regex::Regex;
use reqwest::header::LINK;
use serde::Deserialize;
use std::sync::LazyLock;

const LOG_TARGET: &str = "   hosting";

const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Pattern to extract the last page number from a GitHub API Link header
static PAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"page=(\d+)>; rel=.last.").expect("invalid regex"));

#[derive(Debug, Deserialize)]
struct CommitEntry {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    author: Option<CommitSignature>,
    committer: Option<CommitSignature>,
}

#[derive(Debug, Deserialize)]
struct CommitSignature {
    date: Option<DateTime<Utc>>,
}

/// Hosting API client (GitHub)
#[derive(Debug, Clone)]
pub struct HostingClient {
    client: reqwest::Client,
    base_url: String,
}

impl HostingClient {
    /// Create a new hosting client with an optional authentication token and a
    /// bounded per-request timeout.
    pub fn new(token: Option<&str>, timeout: Duration) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_BASE_URL, timeout)
    }

    /// Like [`HostingClient::new`], targeting a non-default API base URL.
    pub fn with_base_url(token: Option<&str>, base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

        let mut client_builder = reqwest::Client::builder().user_agent("hub-rank").timeout(timeout);

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}"))?;
            auth_val.set_sensitive(true);

            let mut headers = HeaderMap::new();
            let _ = headers.insert(AUTHORIZATION, auth_val);

            client_builder = client_builder.default_headers(headers);
        }

        Ok(Self {
            client: client_builder.build()?,
            base_url: base_url.into(),
        })
    }

    /// Count the contributors to a repository.
    ///
    /// Asks for one contributor per page and reads the total page count from
    /// the `Link` response header, which avoids downloading the full listing.
    pub async fn contributors_count(&self, repo: &RepoSpec) -> Result<u64> {
        let url = format!(
            "{}/repos/{}/{}/contributors?per_page=1&anon=true",
            self.base_url,
            repo.owner(),
            repo.repo()
        );
        self.get_count_via_link_header(&url).await
    }

    /// When the most recent commit on the default branch was made, if any.
    pub async fn latest_commit_at(&self, repo: &RepoSpec) -> Result<Option<DateTime<Utc>>> {
        let url = format!("{}/repos/{}/{}/commits?per_page=1", self.base_url, repo.owner(), repo.repo());

        log::debug!(target: LOG_TARGET, "Fetching latest commit for '{repo}'");

        let resp = self.client.get(&url).send().await?;
        let resp = resp.error_for_status()?;

        let commits: Vec<CommitEntry> = resp
            .json()
            .await
            .into_app_err_with(|| format!("could not parse commit listing for '{repo}'"))?;

        Ok(commits
            .first()
            .and_then(|entry| entry.commit.author.as_ref().or(entry.commit.committer.as_ref()))
            .and_then(|sig| sig.date))
    }

    async fn get_count_via_link_header(&self, url: &str) -> Result<u64> {
        log::debug!(target: LOG_TARGET, "Fetching count via Link header from '{url}'");

        let resp = self.client.get(url).send().await?;
        let resp = resp.error_for_status()?;

        if let Some(link_header) = resp.headers().get(LINK) {
            let link_str = link_header.to_str()?;
            if let Some(count) = PAGE_REGEX.captures(link_str).and_then(|caps| caps.get(1)) {
                return Ok(count.as_str().parse()?);
            }
        }

        // No Link header: the listing fits on one page, count the elements
        let bytes = resp
            .bytes()
            .await
            .into_app_err_with(|| format!("could not read response body from '{url}'"))?;

        count_json_array_elements(&bytes).into_app_err_with(|| format!("could not count items in JSON response from '{url}'"))
    }
}

/// Count elements in a JSON array without allocating parsed values.
/// Uses `IgnoredAny` to skip deserialization of element contents, only counting them.
fn count_json_array_elements(json: &[u8]) -> Result<u64> {
    use serde::de::IgnoredAny;

    let array: Vec<IgnoredAny> = serde_json::from_slice(json).into_app_err("malformed JSON while counting array elements")?;

    Ok(array.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_json_array_elements() {
        assert_eq!(count_json_array_elements(b"[]").unwrap(), 0);
        assert_eq!(count_json_array_elements(br#"[{"id": 1}]"#).unwrap(), 1);
        assert_eq!(count_json_array_elements(br#"[{"id": 1}, {"id": 2}, {"id": 3}]"#).unwrap(), 3);

        let _ = count_json_array_elements(b"[{broken").unwrap_err();
    }

    #[test]
    fn test_commit_entry_deserialize() {
        let json = r#"[{
            "sha": "abc123",
            "commit": {
                "author": { "name": "a", "date": "2024-05-01T12:00:00Z" },
                "committer": { "name": "b", "date": "2024-05-01T12:01:00Z" }
            }
        }]"#;

        let commits: Vec<CommitEntry> = serde_json::from_str(json).unwrap();
        let date = commits[0].commit.author.as_ref().and_then(|sig| sig.date).unwrap();
        assert_eq!(date.timestamp(), 1_714_564_800);
    }

    #[test]
    fn test_commit_entry_missing_author_falls_back_to_committer() {
        let json = r#"[{ "commit": { "committer": { "date": "2024-05-01T12:00:00Z" } } }]"#;

        let commits: Vec<CommitEntry> = serde_json::from_str(json).unwrap();
        let entry = &commits[0].commit;
        assert!(entry.author.is_none());
        assert!(entry.committer.as_ref().unwrap().date.is_some());
    }

    #[test]
    fn test_page_regex_extracts_last_page() {
        let link = r#"<https://api.github.com/repos/o/r/contributors?per_page=1&page=2>; rel="next", <https://api.github.com/repos/o/r/contributors?per_page=1&page=57>; rel="last""#;
        let count = PAGE_REGEX.captures(link).and_then(|caps| caps.get(1)).unwrap();
        assert_eq!(count.as_str(), "57");
    }

    #[tokio::test]
    async fn test_client_new_with_and_without_token() {
        let _ = HostingClient::new(None, Duration::from_secs(10)).unwrap();
        let _ = HostingClient::new(Some("test_token"), Duration::from_secs(10)).unwrap();
    }
}
