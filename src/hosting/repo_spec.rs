use core::fmt;
use regex::Regex;
use std::sync::LazyLock;

/// Pattern to extract the owner and repository name from a GitHub URL
static REPO_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"github\.com[:/]([^/\s?#]+)/([^/\s?#]+)").expect("invalid regex"));

/// Identifies one repository on the code host by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    owner: String,
    repo: String,
}

impl RepoSpec {
    /// Parse a repository spec out of a GitHub URL.
    ///
    /// Accepts `https`, `git@`-style, and scheme-less forms; a trailing `.git`
    /// suffix is stripped. Returns `None` for anything that is not a GitHub
    /// repository URL.
    #[must_use]
    pub fn parse(url: &str) -> Option<Self> {
        let captures = REPO_REGEX.captures(url)?;
        let owner = captures.get(1)?.as_str().to_string();
        let repo = captures.get(2)?.as_str().trim_end_matches(".git").to_string();

        if owner.is_empty() || repo.is_empty() {
            return None;
        }

        Some(Self { owner, repo })
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Canonical `https` clone URL for this repository.
    #[must_use]
    pub fn clone_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
