use camino::Utf8Path;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// Default configuration file name searched for in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "hubrank.toml";

/// Default base URL of the model hub API.
fn default_hub_base_url() -> String {
    "https://huggingface.co".to_string()
}

/// Default timeout for individual hub and hosting API requests, in seconds.
const fn default_api_timeout_secs() -> u64 {
    10
}

/// Default timeout for a shallow repository clone, in seconds.
const fn default_clone_timeout_secs() -> u64 {
    60
}

/// Maximum number of code repositories analyzed per bundle.
const fn default_max_code_repos() -> usize {
    3
}

/// Maximum number of datasets analyzed per bundle.
const fn default_max_datasets() -> usize {
    5
}

/// Score thresholds for console coloring: `[orange_threshold, green_threshold]`.
/// Scores < 0.4 are red, 0.4-0.69 are orange, >= 0.7 are green.
const fn default_scoring_bands() -> [f64; 2] {
    [0.4, 0.7]
}

/// Organizations whose authorship earns full bus-factor credit.
fn default_known_orgs() -> Vec<String> {
    [
        "google",
        "openai",
        "meta-llama",
        "facebook",
        "microsoft",
        "nvidia",
        "huggingface",
        "mistralai",
        "stabilityai",
        "bigscience",
        "allenai",
        "EleutherAI",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Tool configuration, loaded from an optional TOML file.
///
/// Every field has a default, so an absent configuration file is equivalent to
/// an empty one.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Base URL of the model hub API.
    pub hub_base_url: String,

    /// Timeout for individual API requests, in seconds.
    pub api_timeout_secs: u64,

    /// Timeout for a shallow repository clone, in seconds.
    pub clone_timeout_secs: u64,

    /// Maximum number of code repositories analyzed per bundle.
    pub max_code_repos: usize,

    /// Maximum number of datasets analyzed per bundle.
    pub max_datasets: usize,

    /// Score thresholds for console coloring: `[orange_threshold, green_threshold]`.
    pub scoring_bands: [f64; 2],

    /// Organizations whose authorship earns full bus-factor credit.
    pub known_orgs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hub_base_url: default_hub_base_url(),
            api_timeout_secs: default_api_timeout_secs(),
            clone_timeout_secs: default_clone_timeout_secs(),
            max_code_repos: default_max_code_repos(),
            max_datasets: default_max_datasets(),
            scoring_bands: default_scoring_bands(),
            known_orgs: default_known_orgs(),
        }
    }
}

impl Config {
    /// Load the configuration from an explicit path, or from `hubrank.toml` in the
    /// working directory when present, falling back to defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly specified file cannot be read, or if any
    /// configuration file fails to parse.
    pub fn load(explicit_path: Option<&Utf8Path>) -> crate::Result<Self> {
        let content = if let Some(path) = explicit_path {
            fs::read_to_string(path).into_app_err_with(|| format!("could not read configuration file '{path}'"))?
        } else {
            match fs::read_to_string(DEFAULT_CONFIG_FILE) {
                Ok(content) => content,
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => {
                    return Err(e).into_app_err_with(|| format!("could not read configuration file '{DEFAULT_CONFIG_FILE}'"));
                }
            }
        };

        let config: Self = toml::from_str(&content).into_app_err("could not parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Render the default configuration as a TOML document.
    #[must_use]
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }

    /// Index into the scoring bands for a score: 0 = red, 1 = orange, 2 = green.
    #[must_use]
    pub fn band_for_score(&self, score: f64) -> usize {
        if score >= self.scoring_bands[1] {
            2
        } else if score >= self.scoring_bands[0] {
            1
        } else {
            0
        }
    }

    fn validate(&self) -> crate::Result<()> {
        if self.scoring_bands[0] > self.scoring_bands[1] {
            ohno::bail!(
                "scoring_bands must be non-decreasing, got [{}, {}]",
                self.scoring_bands[0],
                self.scoring_bands[1]
            );
        }

        if self.api_timeout_secs == 0 || self.clone_timeout_secs == 0 {
            ohno::bail!("timeouts must be greater than zero");
        }

        Ok(())
    }
}
