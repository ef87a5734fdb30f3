use std::env;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the backend lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Read `COURSEHUB_API_URL` and `COURSEHUB_HTTP_TIMEOUT_SECS`, falling back
    /// to defaults for missing or unparsable values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("COURSEHUB_API_URL").filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(url);
        }

        if let Some(raw) = lookup("COURSEHUB_HTTP_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(value = %raw, "ignoring invalid COURSEHUB_HTTP_TIMEOUT_SECS"),
            }
        }

        config
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().trim_end_matches('/').to_string();
        self
    }

    /// Absolute URL for an API path such as `/courses/`.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let config = ApiConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn reads_url_and_timeout() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("COURSEHUB_API_URL", "https://learn.example.com/api/ "),
            ("COURSEHUB_HTTP_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.base_url, "https://learn.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_timeout_keeps_default() {
        let config = ApiConfig::from_lookup(lookup(&[("COURSEHUB_HTTP_TIMEOUT_SECS", "0")]));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn url_for_joins_with_single_slash() {
        let config = ApiConfig::default().with_base_url("http://host/api/");
        assert_eq!(config.url_for("/courses/"), "http://host/api/courses/");
        assert_eq!(config.url_for("courses/3/"), "http://host/api/courses/3/");
    }
}
