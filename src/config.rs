use std::time::Duration;

use thiserror::Error;

use crate::display::AnimationTiming;

const DEFAULT_REFRESH_SECS: u64 = 5 * 60;
const DEFAULT_ANIMATION_MS: u64 = 1500;
const DEFAULT_TICK_MS: u64 = 20;
const DEFAULT_RESULT_DELAY_MS: u64 = 500;
const DEFAULT_CURRENCY_LABEL: &str = "KSh";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set (use .env, the environment or --feed-url)")]
    Missing(&'static str),
    #[error("{var} must be a whole number, got '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Runtime settings, read from the environment after `.env` is loaded
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub feed_url: String,
    pub refresh_interval: Duration,
    pub animation: AnimationTiming,
    pub verify_result_delay: Duration,
    pub currency_label: String,
}

impl Config {
    /// Read settings from the process environment; `feed_url_override` wins
    /// over `FEED_URL`.
    pub fn from_env(feed_url_override: Option<String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), feed_url_override)
    }

    pub fn from_lookup<F>(lookup: F, feed_url_override: Option<String>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let feed_url = feed_url_override
            .or_else(|| lookup("FEED_URL"))
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("FEED_URL"))?;

        let number = |var: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(var) {
                None => Ok(default),
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid { var, value }),
            }
        };

        Ok(Config {
            feed_url,
            refresh_interval: Duration::from_secs(number("REFRESH_INTERVAL_SECS", DEFAULT_REFRESH_SECS)?),
            animation: AnimationTiming {
                duration: Duration::from_millis(number("ANIMATION_DURATION_MS", DEFAULT_ANIMATION_MS)?),
                tick: Duration::from_millis(number("ANIMATION_TICK_MS", DEFAULT_TICK_MS)?),
            },
            verify_result_delay: Duration::from_millis(number(
                "VERIFY_RESULT_DELAY_MS",
                DEFAULT_RESULT_DELAY_MS,
            )?),
            currency_label: lookup("CURRENCY_LABEL").unwrap_or_else(|| DEFAULT_CURRENCY_LABEL.to_string()),
        })
    }
}
