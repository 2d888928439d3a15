//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the chat service, the data providers, and the bot's timing.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes to `null`, which serde_yaml rejects for structs.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Configuration for the connected services.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ServicesConfig {
    #[serde(default)]
    pub webex: WebexConfig,
    #[serde(default)]
    pub iss: IssConfig,
    #[serde(default)]
    pub geocode: GeocodeConfig,
    #[serde(default)]
    pub launches: LaunchesConfig,
}

/// Chat service settings. Either `room` or `room_title` selects the monitored room.
#[derive(Debug, Deserialize, Clone)]
pub struct WebexConfig {
    #[serde(default = "default_webex_url")]
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_webex_token_env")]
    pub token_env: String,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub room_title: Option<String>,
}

impl Default for WebexConfig {
    fn default() -> Self {
        Self {
            base_url: default_webex_url(),
            token: None,
            token_env: default_webex_token_env(),
            room: None,
            room_title: None,
        }
    }
}

impl WebexConfig {
    /// Resolves the access token: the inline value wins over the environment.
    pub fn resolve_token(&self) -> Result<String> {
        resolve_secret(self.token.as_deref(), &self.token_env)
            .with_context(|| format!("No Webex token - set services.webex.token or {}", self.token_env))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct IssConfig {
    #[serde(default = "default_iss_url")]
    pub url: String,
}

impl Default for IssConfig {
    fn default() -> Self {
        Self {
            url: default_iss_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodeConfig {
    #[serde(default = "default_geocode_url")]
    pub url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_geocode_key_env")]
    pub api_key_env: String,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            url: default_geocode_url(),
            api_key: None,
            api_key_env: default_geocode_key_env(),
        }
    }
}

impl GeocodeConfig {
    pub fn resolve_api_key(&self) -> Result<String> {
        resolve_secret(self.api_key.as_deref(), &self.api_key_env).with_context(|| {
            format!(
                "No geocoding key - set services.geocode.api_key or {}",
                self.api_key_env
            )
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LaunchesConfig {
    #[serde(default = "default_launches_url")]
    pub base_url: String,
}

impl Default for LaunchesConfig {
    fn default() -> Self {
        Self {
            base_url: default_launches_url(),
        }
    }
}

/// Command surface and loop timing.
#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    #[serde(default = "default_trigger")]
    pub trigger: char,
    #[serde(default = "default_launch_keyword")]
    pub launch_keyword: String,
    #[serde(default = "default_max_wait")]
    pub max_wait_secs: u64,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_cooldown")]
    pub cooldown_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            trigger: default_trigger(),
            launch_keyword: default_launch_keyword(),
            max_wait_secs: default_max_wait(),
            poll_interval_secs: default_poll_interval(),
            cooldown_secs: default_cooldown(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_true")]
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            console: true,
        }
    }
}

fn resolve_secret(inline: Option<&str>, env_var: &str) -> Result<String> {
    if let Some(value) = inline.filter(|v| !v.trim().is_empty()) {
        return Ok(value.trim().to_string());
    }
    let value = std::env::var(env_var).with_context(|| format!("{env_var} not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("{env_var} is empty");
    }
    Ok(value.trim().to_string())
}

fn default_webex_url() -> String {
    "https://webexapis.com/v1".to_string()
}
fn default_webex_token_env() -> String {
    "WEBEX_TOKEN".to_string()
}
fn default_iss_url() -> String {
    "http://api.open-notify.org/iss-now.json".to_string()
}
fn default_geocode_url() -> String {
    "https://api.geoapify.com/v1/geocode/reverse".to_string()
}
fn default_geocode_key_env() -> String {
    "GEOAPIFY_API_KEY".to_string()
}
fn default_launches_url() -> String {
    "https://api.spacexdata.com/v4".to_string()
}
fn default_trigger() -> char {
    '/'
}
fn default_launch_keyword() -> String {
    "launch".to_string()
}
fn default_max_wait() -> u64 {
    5
}
fn default_poll_interval() -> u64 {
    1
}
fn default_cooldown() -> u64 {
    3
}
fn default_request_timeout() -> u64 {
    10
}
fn default_log_file() -> Option<String> {
    Some("data/session.log".to_string())
}
fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.bot.trigger, '/');
        assert_eq!(config.bot.launch_keyword, "launch");
        assert_eq!(config.bot.max_wait_secs, 5);
        assert_eq!(config.services.webex.base_url, "https://webexapis.com/v1");
        assert_eq!(config.logging.file.as_deref(), Some("data/session.log"));
        assert!(config.logging.console);
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let yaml = r#"
services:
  webex:
    token: abc
    room_title: ISS
bot:
  cooldown_secs: 7
logging:
  file: ~
"#;
        let config = AppConfig::parse(yaml).unwrap();
        assert_eq!(config.services.webex.token.as_deref(), Some("abc"));
        assert_eq!(config.services.webex.room_title.as_deref(), Some("ISS"));
        assert_eq!(config.services.webex.token_env, "WEBEX_TOKEN");
        assert_eq!(config.bot.cooldown_secs, 7);
        assert_eq!(config.bot.poll_interval_secs, 1);
        assert_eq!(config.services.iss.url, "http://api.open-notify.org/iss-now.json");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_example_config_parses() {
        let config = AppConfig::parse(include_str!("../../data/config.example.yaml")).unwrap();
        assert_eq!(config.services.webex.room_title.as_deref(), Some("ISS"));
        assert_eq!(config.bot.cooldown_secs, 3);
        assert_eq!(config.services.launches.base_url, "https://api.spacexdata.com/v4");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bot:\n  trigger: '!'\n  launch_keyword: next").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.bot.trigger, '!');
        assert_eq!(config.bot.launch_keyword, "next");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(&dir.path().join("nope.yaml")).is_err());
    }

    #[test]
    fn test_inline_token_wins() {
        let webex = WebexConfig {
            token: Some(" secret ".to_string()),
            token_env: "ORBIT_HERALD_TEST_UNSET_TOKEN".to_string(),
            ..WebexConfig::default()
        };
        assert_eq!(webex.resolve_token().unwrap(), "secret");
    }

    #[test]
    fn test_missing_token_is_an_error() {
        let webex = WebexConfig {
            token_env: "ORBIT_HERALD_TEST_UNSET_TOKEN".to_string(),
            ..WebexConfig::default()
        };
        assert!(webex.resolve_token().is_err());
    }
}
