//! Code-quality metric: clone the linked repositories and inspect what the
//! working tree actually contains.
//!
//! Two local signals are combined: repository structure (README, license,
//! dependency manifest, configuration files) and a shallow sample of the
//! source files themselves. Nothing is executed; only file presence and
//! content prefixes are examined.

use super::{Metric, MetricResult};
use crate::Result;
use crate::bundle::{ResourceBundle, UrlKind, categorize_url};
use crate::hosting::{RepoSpec, shallow_clone};
use async_trait::async_trait;
use core::time::Duration;
use ohno::IntoAppError;
use std::path::Path;

const LOG_TARGET: &str = "   metrics";

/// Weight of the structure signal versus the source-sample signal.
const STRUCTURE_WEIGHT: f64 = 0.6;
const SAMPLE_WEIGHT: f64 = 0.4;

/// How many source files are sampled per repository.
const SAMPLE_LIMIT: usize = 5;

#[derive(Debug)]
pub struct CodeQuality {
    clone_timeout: Duration,
    max_repos: usize,
}

impl CodeQuality {
    #[must_use]
    pub const fn new(clone_timeout: Duration, max_repos: usize) -> Self {
        Self { clone_timeout, max_repos }
    }

    /// Clone and score a single repository. Errors here (unreachable repo,
    /// clone timeout) make the repository drop out of the average.
    async fn analyze_repository(&self, repo_url: &str) -> Result<f64> {
        let scratch = tempfile::tempdir().into_app_err("could not create scratch directory for clone")?;
        let dest = scratch.path().join("repo");

        shallow_clone(repo_url, &dest, self.clone_timeout).await?;

        let structure = structure_score(&dest)?;
        let sample = sample_score(&dest)?;
        Ok(structure * STRUCTURE_WEIGHT + sample * SAMPLE_WEIGHT)
    }
}

#[async_trait]
impl Metric for CodeQuality {
    fn name(&self) -> &'static str {
        "code_quality"
    }

    fn description(&self) -> &'static str {
        "Engineering hygiene of the linked code repositories"
    }

    async fn compute(&self, resource: &ResourceBundle) -> MetricResult {
        // The diversity bonus counts every linked GitHub repo, including those
        // past the analysis limit or whose clone later fails
        let linked_repos = resource
            .code_urls()
            .iter()
            .filter(|url| categorize_url(url) == UrlKind::Code)
            .count();

        // Normalize through RepoSpec so deep links (/tree/..., .git) clone cleanly
        let repos: Vec<String> = resource
            .code_urls()
            .iter()
            .filter(|url| categorize_url(url) == UrlKind::Code)
            .filter_map(|url| RepoSpec::parse(url))
            .map(|spec| spec.clone_url())
            .take(self.max_repos)
            .collect();

        if repos.is_empty() {
            return MetricResult::new(
                0.0,
                format!("No code repositories found for {}. Quality assessment not possible.", resource.model_url()),
            );
        }

        let mut total = 0.0;
        let mut analyzed = 0usize;
        for repo_url in &repos {
            match self.analyze_repository(repo_url).await {
                Ok(score) => {
                    log::debug!(target: LOG_TARGET, "Repository '{repo_url}' scored {score:.3}");
                    total += score;
                    analyzed += 1;
                }
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Could not analyze repository '{repo_url}': {e:#}");
                }
            }
        }

        if analyzed == 0 {
            return MetricResult::new(
                0.0,
                format!("None of the {} linked repositories could be cloned for analysis.", repos.len()),
            );
        }

        let score = total / analyzed as f64 + multi_repo_bonus(linked_repos);

        MetricResult::new(score, format!("Analyzed {analyzed} of {linked_repos} linked repository(ies)."))
    }
}

/// Small bonus when quality is corroborated across multiple linked
/// repositories. Based on how many GitHub repos the bundle links, not on how
/// many were successfully cloned.
fn multi_repo_bonus(linked_repos: usize) -> f64 {
    ((linked_repos.saturating_sub(1)) as f64 * 0.05).min(0.1)
}

/// Score the top-level layout of a cloned working tree, normalized to `[0, 1]`.
fn structure_score(root: &Path) -> Result<f64> {
    let mut points: f64 = 0.0;

    let mut has_readme = false;
    let mut has_license = false;
    let mut has_manifest = false;
    let mut has_config = false;

    for entry in std::fs::read_dir(root).into_app_err("could not list cloned repository root")? {
        let entry = entry.into_app_err("could not read directory entry")?;
        let name = entry.file_name().to_string_lossy().to_lowercase();

        if name.starts_with("readme") {
            has_readme = true;
        }

        if name.starts_with("license") || name.starts_with("licence") {
            has_license = true;
        }

        if name.starts_with("requirements") && name.ends_with(".txt")
            || name == "setup.py"
            || name == "pyproject.toml"
            || name == "pipfile"
            || name == "package.json"
            || name == "environment.yml"
            || name.ends_with(".toml")
        {
            has_manifest = true;
        }

        if name.ends_with(".cfg")
            || name.ends_with(".ini")
            || name.ends_with(".toml")
            || name == ".gitignore"
            || name.ends_with(".json")
            || name.ends_with(".yaml")
            || name.ends_with(".yml")
        {
            has_config = true;
        }
    }

    if has_readme {
        points += 3.0;
    }
    if has_license {
        points += 1.0;
    }
    if has_manifest {
        points += 1.5;
    }
    if has_config {
        points += 0.75;
    }
    if count_files_with_extension(root, "py") > 3 {
        points += 0.75;
    }

    Ok((points / 7.0).min(1.0))
}

/// Sample a handful of source files and look for the basics: documentation
/// strings, imports, and whether the code spans more than one file.
fn sample_score(root: &Path) -> Result<f64> {
    let py_files: Vec<_> = source_files(root, "py");

    if py_files.is_empty() {
        // Non-Python source still earns partial credit for having code at all
        let other = ["js", "java", "cpp", "c", "r", "R", "ipynb"]
            .iter()
            .any(|ext| count_files_with_extension(root, ext) > 0);
        return Ok(if other { 2.0 / 7.0 } else { 0.0 });
    }

    let mut points: f64 = 2.0;
    let mut has_docs = false;
    let mut has_imports = false;

    for path in py_files.iter().take(SAMPLE_LIMIT) {
        let Ok(contents) = std::fs::read_to_string(path) else {
            continue;
        };

        if contents.contains("\"\"\"") || contents.contains("'''") || contents.contains("def ") {
            has_docs = true;
        }
        if contents.contains("import ") || contents.contains("from ") {
            has_imports = true;
        }
    }

    if has_docs {
        points += 1.5;
    }
    if has_imports {
        points += 1.0;
    }
    if py_files.len() > 1 {
        points += 0.5;
    }

    Ok((points / 7.0).min(1.0))
}

fn source_files(root: &Path, extension: &str) -> Vec<std::path::PathBuf> {
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == extension))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn count_files_with_extension(root: &Path, extension: &str) -> usize {
    source_files(root, extension).len()
}
