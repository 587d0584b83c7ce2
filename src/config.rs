// Runtime configuration.
// Read from environment variables (and an optional .env file), with defaults for every value.

use std::time::Duration;

use reqwest::Url;

use crate::cache::DEFAULT_TTL;
use crate::discourse::LookbackWindow;
use crate::discourse::forum::DEFAULT_MAX_PAGES;
use crate::error::{ForumError, Result};

pub const DEFAULT_BASE_URL: &str = "https://discuss.streamlit.io";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Config {
    /// Forum root that endpoint paths are joined onto.
    pub base_url: Url,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
    /// Page bound for the topic window walk; `None` is unbounded.
    pub max_pages: Option<u32>,
    pub lookback: LookbackWindow,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            cache_ttl: DEFAULT_TTL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_pages: Some(DEFAULT_MAX_PAGES),
            lookback: LookbackWindow::default(),
        }
    }
}

impl Config {
    /// Load from the process environment, after reading `.env` if one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(base) = lookup("FORUM_BASE_URL") {
            config.base_url = Url::parse(base.trim())
                .map_err(|e| ForumError::Config(format!("FORUM_BASE_URL {:?}: {}", base, e)))?;
        }
        if let Some(secs) = lookup("FORUM_CACHE_TTL_SECS") {
            config.cache_ttl = positive_secs("FORUM_CACHE_TTL_SECS", &secs)?;
        }
        if let Some(secs) = lookup("FORUM_REQUEST_TIMEOUT_SECS") {
            config.request_timeout = positive_secs("FORUM_REQUEST_TIMEOUT_SECS", &secs)?;
        }
        if let Some(pages) = lookup("FORUM_MAX_PAGES") {
            config.max_pages = parse_max_pages(&pages)?;
        }
        if let Some(days) = lookup("FORUM_LOOKBACK_DAYS") {
            let days = days.trim().parse::<u32>().map_err(|e| {
                ForumError::Config(format!("FORUM_LOOKBACK_DAYS {:?}: {}", days, e))
            })?;
            config.lookback = LookbackWindow::from_days(days)?;
        }

        Ok(config)
    }
}

fn positive_secs(name: &str, value: &str) -> Result<Duration> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ForumError::Config(format!("{} must be greater than zero", name))),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ForumError::Config(format!("{} {:?}: {}", name, value, e))),
    }
}

/// `0` or `none` lifts the bound.
fn parse_max_pages(value: &str) -> Result<Option<u32>> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    match value.parse::<u32>() {
        Ok(0) => Ok(None),
        Ok(pages) => Ok(Some(pages)),
        Err(e) => Err(ForumError::Config(format!("FORUM_MAX_PAGES {:?}: {}", value, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.base_url.as_str(), "https://discuss.streamlit.io/");
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_pages, Some(100));
        assert_eq!(config.lookback.days(), 7);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("FORUM_BASE_URL", "https://forum.example.org"),
            ("FORUM_CACHE_TTL_SECS", "60"),
            ("FORUM_REQUEST_TIMEOUT_SECS", " 5 "),
            ("FORUM_MAX_PAGES", "none"),
            ("FORUM_LOOKBACK_DAYS", "30"),
        ])
        .unwrap();
        assert_eq!(config.base_url.host_str(), Some("forum.example.org"));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.max_pages, None);
        assert_eq!(config.lookback.days(), 30);

        assert_eq!(load(&[("FORUM_MAX_PAGES", "0")]).unwrap().max_pages, None);
        assert_eq!(load(&[("FORUM_MAX_PAGES", "12")]).unwrap().max_pages, Some(12));
    }

    #[test]
    fn test_invalid_values() {
        for vars in [
            [("FORUM_BASE_URL", "not a url")],
            [("FORUM_CACHE_TTL_SECS", "0")],
            [("FORUM_REQUEST_TIMEOUT_SECS", "soon")],
            [("FORUM_MAX_PAGES", "-1")],
            [("FORUM_LOOKBACK_DAYS", "5")],
        ] {
            assert!(
                matches!(load(&vars), Err(ForumError::Config(_))),
                "{:?} should be rejected",
                vars
            );
        }
    }
}
