use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Full run configuration, deserialized from a TOML file.
///
/// Keyword lists and every numeric cap live here rather than in module
/// constants, so two runs with different term sets are independent.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub reddit: RedditConfig,
    pub scan: ScanConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Communities to scan, without the r/ prefix.
    pub subreddits: Vec<String>,
    /// Terms used both to search and to match posts locally.
    #[serde(default)]
    pub influencer_terms: Vec<String>,
    /// Phrases whose presence sets the disclaimer flag.
    #[serde(default)]
    pub disclaimer_terms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Search result cap per subreddit.
    pub posts_per_subreddit: u32,
    /// Comment summaries kept per post.
    pub comments_per_post: usize,
    /// Hot listing cap for the fallback scan.
    pub hot_fallback_posts: u32,
    /// Search yield below which the hot fallback runs.
    pub fallback_threshold: usize,
    /// Courtesy pause between subreddits, in seconds.
    pub subreddit_delay_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            posts_per_subreddit: 1000,
            comments_per_post: 40,
            hot_fallback_posts: 100,
            fallback_threshold: 5,
            subreddit_delay_secs: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("sublens_metrics.csv"),
            json_path: PathBuf::from("sublens_data.json"),
        }
    }
}

fn default_user_agent() -> String {
    format!("sublens/{}", env!("CARGO_PKG_VERSION"))
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let config: AppConfig = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Credential check, run before any network I/O.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reddit.client_id.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "reddit.client_id".to_string(),
            });
        }
        if self.reddit.client_secret.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "reddit.client_secret".to_string(),
            });
        }
        Ok(())
    }
}
