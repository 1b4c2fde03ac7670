use dotenv::dotenv;
use dotenv::from_path;
use std::env;
use std::time::Duration;

pub const DEFAULT_BANNER_SHOW_DELAY_MS: u64 = 100;
pub const DEFAULT_BANNER_HIDE_DELAY_MS: u64 = 4000;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub banner_show_delay: Duration,
    pub banner_hide_delay: Duration,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            banner_show_delay: Duration::from_millis(DEFAULT_BANNER_SHOW_DELAY_MS),
            banner_hide_delay: Duration::from_millis(DEFAULT_BANNER_HIDE_DELAY_MS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a specified `.env` file path or default to the root `.env` file.
    /// A missing file is not an error; every setting has a default.
    pub fn from_env(env_path: Option<&str>) -> Self {
        match env_path {
            Some(path) => {
                from_path(path).ok();
            }
            None => {
                dotenv().ok();
            }
        }

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Malformed numbers fall back to defaults.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let millis = |key: &str, default: u64| {
            lookup(key)
                .and_then(|value| value.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        let banner_show_delay =
            Duration::from_millis(millis("BANNER_SHOW_DELAY_MS", DEFAULT_BANNER_SHOW_DELAY_MS));
        let banner_hide_delay =
            Duration::from_millis(millis("BANNER_HIDE_DELAY_MS", DEFAULT_BANNER_HIDE_DELAY_MS));

        Self {
            banner_show_delay,
            // The banner cannot disappear before it appears
            banner_hide_delay: banner_hide_delay.max(banner_show_delay),
            log_filter: lookup("LOG_FILTER")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}
