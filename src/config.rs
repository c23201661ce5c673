//! Configuration for the fantasy cycling leaderboard.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Locations of the three input tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_races_path")]
    pub races: PathBuf,
    #[serde(default = "default_scoring_path")]
    pub scoring: PathBuf,
    #[serde(default = "default_riders_path")]
    pub riders: PathBuf,
}

fn default_races_path() -> PathBuf {
    PathBuf::from("races2025.csv")
}

fn default_scoring_path() -> PathBuf {
    PathBuf::from("scoringrules.csv")
}

fn default_riders_path() -> PathBuf {
    PathBuf::from("riders.csv")
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            races: default_races_path(),
            scoring: default_scoring_path(),
            riders: default_riders_path(),
        }
    }
}

/// Scraper configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Number of finishers read from each results table
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Pause between two network fetches
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    #[serde(default = "default_retries")]
    pub retries: u32,
}

fn default_base_url() -> String {
    crate::scraper::BASE_URL.to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_max_results() -> usize {
    crate::scraper::DEFAULT_MAX_RESULTS
}

fn default_min_delay_ms() -> u64 {
    500
}

fn default_retries() -> u32 {
    2
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            min_delay_ms: default_min_delay_ms(),
            retries: default_retries(),
        }
    }
}

/// Race result cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
    /// Seconds a cached race result stays valid
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: i64,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".cache/results")
}

fn default_ttl_secs() -> i64 {
    3600
}

impl CacheConfig {
    /// Entry lifetime; out-of-range values fall back to the default
    pub fn ttl(&self) -> Duration {
        Duration::try_seconds(self.ttl_secs).unwrap_or_else(|| {
            warn!(
                "cache.ttl_secs = {} is out of range, using {}",
                self.ttl_secs,
                default_ttl_secs()
            );
            Duration::seconds(default_ttl_secs())
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            dir: default_cache_dir(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional `fantasy.*` file and the environment
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name("fantasy").required(false))
            // FANTASY__SCRAPER__MAX_RESULTS=5, FANTASY__CACHE__ENABLED=false, ...
            .add_source(
                config::Environment::with_prefix("FANTASY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
