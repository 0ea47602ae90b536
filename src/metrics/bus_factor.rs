//! Bus-factor metric: how exposed is a model to the disappearance of its
//! maintainers?
//!
//! When a code repository is linked, contributor count and commit recency from
//! the code host are the strongest signal. Without one, the metric falls back
//! to hub metadata: authorship, popularity, and how recently the model was
//! touched.

use super::{Metric, MetricResult};
use crate::bundle::ResourceBundle;
use crate::hosting::{HostingClient, RepoSpec};
use crate::hub::{ModelHub, ModelInfo};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

const LOG_TARGET: &str = "   metrics";

/// Score returned when no signal at all is available.
const FLOOR_SCORE: f64 = 0.1;

#[derive(Debug)]
pub struct BusFactor {
    hub: Arc<dyn ModelHub>,
    hosting: Arc<HostingClient>,
    known_orgs: Vec<String>,
}

impl BusFactor {
    #[must_use]
    pub fn new(hub: Arc<dyn ModelHub>, hosting: Arc<HostingClient>, known_orgs: &[String]) -> Self {
        Self {
            hub,
            hosting,
            known_orgs: known_orgs.to_vec(),
        }
    }

    fn author_is_known_org(&self, author: Option<&str>) -> bool {
        author.is_some_and(|a| self.known_orgs.iter().any(|org| org.eq_ignore_ascii_case(a)))
    }

    /// Score a linked repository from contributor count and commit recency.
    ///
    /// Returns `None` when the code host cannot be queried, in which case the
    /// caller falls back to the metadata path.
    async fn repository_score(&self, repo: &RepoSpec, known_org: bool) -> Option<(f64, String)> {
        let (contributors_res, commit_res) = tokio::join!(self.hosting.contributors_count(repo), self.hosting.latest_commit_at(repo));

        let contributors = match contributors_res {
            Ok(count) => count,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Could not fetch contributors for '{repo}': {e:#}");
                return None;
            }
        };

        // A failed commit query degrades to "no recent activity" rather than
        // discarding the contributor signal
        let last_commit = commit_res.unwrap_or_else(|e| {
            log::debug!(target: LOG_TARGET, "Could not fetch latest commit for '{repo}': {e:#}");
            None
        });

        let days_since_commit = last_commit.map(|at| (Utc::now() - at).num_days());
        let score = repository_activity_score(contributors, days_since_commit, known_org);

        let recency = days_since_commit.map_or_else(|| "no commit activity found".to_string(), |d| format!("last commit {d} days ago"));
        let notes = format!("Repository {repo}: {contributors} contributor(s), {recency}.");
        Some((score, notes))
    }
}

#[async_trait]
impl Metric for BusFactor {
    fn name(&self) -> &'static str {
        "bus_factor"
    }

    fn description(&self) -> &'static str {
        "Maintainer redundancy, inferred from repository activity or hub metadata"
    }

    async fn compute(&self, resource: &ResourceBundle) -> MetricResult {
        let info = self.hub.get_model_info(resource.model_id()).await.ok();
        let known_org = self.author_is_known_org(info.as_ref().and_then(|i| i.author.as_deref()));

        // Prefer a repository linked in the bundle, then one declared in the model card
        let repo = resource
            .code_urls()
            .iter()
            .find_map(|url| RepoSpec::parse(url))
            .or_else(|| {
                info.as_ref()
                    .and_then(|i| i.card_data.as_ref())
                    .and_then(|card| card.repository.as_deref())
                    .and_then(RepoSpec::parse)
            });

        if let Some(repo) = &repo
            && let Some((score, notes)) = self.repository_score(repo, known_org).await
        {
            return MetricResult::new(score, notes);
        }

        match info {
            Some(info) => {
                let score = metadata_score(&info, known_org, repo.is_some(), Utc::now());
                let author = info.author.as_deref().unwrap_or("unknown");
                let notes = format!(
                    "Hub metadata for {}: author '{author}', {} download(s), {} like(s).",
                    resource.model_id(),
                    info.downloads.max(0),
                    info.likes.max(0)
                );
                MetricResult::new(score, notes)
            }
            None => MetricResult::new(
                FLOOR_SCORE,
                format!("No metadata available for {}. Bus factor cannot be assessed.", resource.model_id()),
            ),
        }
    }
}

/// Repository path: base 0.2; contributors and commit recency carry most of
/// the weight, known-org authorship adds a small bonus.
fn repository_activity_score(contributors: u64, days_since_commit: Option<i64>, known_org: bool) -> f64 {
    let mut score: f64 = 0.2;

    if contributors > 5 {
        score += 0.4;
    } else if contributors > 1 {
        score += 0.2;
    }

    match days_since_commit {
        Some(days) if days < 30 => score += 0.4,
        Some(days) if days < 180 => score += 0.2,
        _ => {}
    }

    if known_org {
        score += 0.1;
    }

    score.min(1.0)
}

/// Metadata path: base 0.1 plus tiered bonuses for authorship, popularity,
/// recency, and the presence of an external code repo link.
fn metadata_score(info: &ModelInfo, known_org: bool, has_repo_link: bool, now: DateTime<Utc>) -> f64 {
    let mut score = 0.1;

    if known_org {
        score += 0.4;
    } else if info.author.as_deref().is_some_and(|a| !a.is_empty()) {
        score += 0.2;
    }

    score += downloads_bonus(info.downloads);
    score += likes_bonus(info.likes);

    if let Some(last_modified) = info.last_modified {
        score += recency_bonus((now - last_modified).num_days());
    }

    if has_repo_link {
        score += 0.1;
    }

    score.min(1.0)
}

fn downloads_bonus(downloads: i64) -> f64 {
    match downloads {
        d if d >= 1_000_000 => 0.3,
        d if d >= 100_000 => 0.25,
        d if d >= 10_000 => 0.2,
        d if d >= 1_000 => 0.15,
        d if d >= 100 => 0.1,
        _ => 0.0,
    }
}

fn likes_bonus(likes: i64) -> f64 {
    match likes {
        l if l >= 1_000 => 0.2,
        l if l >= 100 => 0.1,
        l if l >= 10 => 0.05,
        _ => 0.0,
    }
}

fn recency_bonus(days: i64) -> f64 {
    match days {
        d if d <= 30 => 0.2,
        d if d <= 180 => 0.15,
        d if d <= 365 => 0.1,
        _ => 0.0,
    }
}
