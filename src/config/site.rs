//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the Velog account to mirror
pub const ACCOUNT_ENV: &str = "VELOG_USERNAME";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Directory
    pub content_dir: String,
    pub velog_dir: String,
    pub post_extension: String,

    // Velog
    pub velog_endpoint: String,
    pub velog_username: Option<String>,
    pub list_limit: u32,
    pub sync_limit: u32,
    pub sync_delay_ms: u64,
    pub cache_ttl_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            content_dir: "posts".to_string(),
            velog_dir: "velog".to_string(),
            post_extension: "mdx".to_string(),

            velog_endpoint: "https://v2cdn.velog.io/graphql".to_string(),
            velog_username: None,
            list_limit: 20,
            sync_limit: 100,
            sync_delay_ms: 500,
            cache_ttl_secs: 3600,
            request_timeout_secs: 30,
        }
    }
}

impl BlogConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: BlogConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the account handle: `env_value` first, then `velog_username`.
    /// Blank values count as absent.
    pub fn account_handle(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|h| !h.trim().is_empty())
            .or_else(|| self.velog_username.clone())
            .map(|h| h.trim().trim_start_matches('@').to_string())
            .filter(|h| !h.is_empty())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("VELOG_USERNAME is not set (environment, .env.local or velog_username in _config.yml)")]
    MissingAccount,
}

/// Options for a single sync run
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Velog account handle, without the leading `@`
    pub account_handle: String,
    /// Maximum number of posts fetched from the listing
    pub limit: u32,
    /// Pause between successive detail fetches
    pub delay: Duration,
}

impl SyncConfig {
    pub fn new(account_handle: impl Into<String>) -> Self {
        let defaults = BlogConfig::default();
        Self {
            account_handle: account_handle.into(),
            limit: defaults.sync_limit,
            delay: Duration::from_millis(defaults.sync_delay_ms),
        }
    }

    /// Build sync options from the site configuration and an optional
    /// account handle taken from the environment.
    pub fn resolve(config: &BlogConfig, env_value: Option<String>) -> Result<Self, ConfigError> {
        let account_handle = config
            .account_handle(env_value)
            .ok_or(ConfigError::MissingAccount)?;

        Ok(Self {
            account_handle,
            limit: config.sync_limit,
            delay: Duration::from_millis(config.sync_delay_ms),
        })
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BlogConfig::default();
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.velog_dir, "velog");
        assert_eq!(config.sync_limit, 100);
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
content_dir: content
velog_username: alice
sync_delay_ms: 0
"#;
        let config: BlogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.velog_username.as_deref(), Some("alice"));
        assert_eq!(config.sync_delay_ms, 0);
        assert_eq!(config.post_extension, "mdx");
    }

    #[test]
    fn test_resolve_sync_config() {
        let config = BlogConfig {
            velog_username: Some("from-file".to_string()),
            ..Default::default()
        };

        let sync = SyncConfig::resolve(&config, Some("@alice".to_string())).unwrap();
        assert_eq!(sync.account_handle, "alice");
        assert_eq!(sync.delay, Duration::from_millis(500));

        let sync = SyncConfig::resolve(&config, None).unwrap();
        assert_eq!(sync.account_handle, "from-file");
    }

    #[test]
    fn test_missing_account() {
        let config = BlogConfig::default();
        assert_eq!(
            SyncConfig::resolve(&config, None).unwrap_err(),
            ConfigError::MissingAccount
        );
        assert_eq!(
            SyncConfig::resolve(&config, Some("  ".to_string())).unwrap_err(),
            ConfigError::MissingAccount
        );
    }
}
