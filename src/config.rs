//! Configuration for the race program service.

use serde::{Deserialize, Serialize};

use crate::leaderboard::WinPolicy;
use crate::scraper;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
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

/// Data source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_program_url")]
    pub program_url: String,
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,
    #[serde(default = "default_secondary_api_url")]
    pub secondary_api_url: String,
    #[serde(default = "default_venue_slug")]
    pub venue_slug: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_program_url() -> String {
    scraper::PROGRAM_URL.to_string()
}

fn default_proxy_url() -> String {
    scraper::PROXY_URL.to_string()
}

fn default_secondary_api_url() -> String {
    scraper::SECONDARY_API_URL.to_string()
}

fn default_venue_slug() -> String {
    scraper::VENUE_SLUG.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; RacingBot/1.0)".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            program_url: default_program_url(),
            proxy_url: default_proxy_url(),
            secondary_api_url: default_secondary_api_url(),
            venue_slug: default_venue_slug(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Synthetic generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Pinned RNG seed; unset means a fresh seed per process.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Whether generated data may stand in before the reference card.
    #[serde(default = "default_synthetic_fallback")]
    pub synthetic_fallback: bool,
}

fn default_synthetic_fallback() -> bool {
    true
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            synthetic_fallback: default_synthetic_fallback(),
        }
    }
}

/// Leaderboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    #[serde(default = "default_leaderboard_size")]
    pub size: usize,
    #[serde(default)]
    pub win_policy: WinPolicy,
}

fn default_leaderboard_size() -> usize {
    8
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            size: default_leaderboard_size(),
            win_policy: WinPolicy::default(),
        }
    }
}

/// Refresh configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    300
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional config file and
    /// `SLUZEWIEC_*` environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("SLUZEWIEC")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
