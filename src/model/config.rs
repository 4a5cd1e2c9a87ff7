use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Config {
    pub reddit: RedditCredentials,
    pub firebase: FirebaseConfig,
    #[serde(default)]
    pub bot: BotSettings,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct RedditCredentials {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

/// Accepts pyrebase-style keys; everything but the database URL is ignored.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct FirebaseConfig {
    #[serde(rename = "databaseURL", alias = "database_url")]
    pub database_url: String,
    /// Database secret or ID token, sent as `?auth=`.
    #[serde(default)]
    pub auth: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct BotSettings {
    pub name: String,
    /// Subreddits joined with `+`.
    pub subreddits: String,
    pub submission_limit: usize,
    pub comment_limit: usize,
    pub source_link: String,
    pub catalog_base: String,
    pub user_agent: String,
    pub reply_pause_secs: u64,
    pub poll_interval_secs: u64,
}

impl Default for BotSettings {
    fn default() -> Self {
        BotSettings {
            name: "CourseBot".to_string(),
            subreddits: "uoft+dcs_uoft+utsc+utm+skule".to_string(),
            submission_limit: 25,
            comment_limit: 100,
            source_link: "https://github.com/zuhayrx/coursebot".to_string(),
            catalog_base: "http://calendar.artsci.utoronto.ca".to_string(),
            user_agent: "CourseBot v0.1".to_string(),
            reply_pause_secs: 1,
            poll_interval_secs: 60,
        }
    }
}

impl BotSettings {
    pub fn reply_pause(&self) -> Duration {
        Duration::from_secs(self.reply_pause_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

fn default_auth_url() -> String {
    "https://www.reddit.com/api/v1/access_token".to_string()
}

fn default_api_base() -> String {
    "https://oauth.reddit.com".to_string()
}

impl Config {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Invalid config file")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&json)
    }
}
