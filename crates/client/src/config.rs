use std::time::Duration;

use crate::error::ClientError;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL without trailing slash (default: `http://localhost:8080`).
    pub base_url: String,
    /// Bearer token sent as `Authorization`, if any.
    pub token: Option<String>,
    /// Per-request timeout in seconds (default: `30`).
    pub timeout_secs: u64,
    /// Default page size for list controllers (default: `10`).
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            token: None,
            timeout_secs: 30,
            page_size: 10,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `LAB_API_BASE_URL`     | `http://localhost:8080`  |
    /// | `LAB_API_TOKEN`        | unset                    |
    /// | `LAB_API_TIMEOUT_SECS` | `30`                     |
    /// | `LAB_PAGE_SIZE`        | `10`                     |
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup("LAB_API_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.base_url);

        let token = lookup("LAB_API_TOKEN")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let timeout_secs = match lookup("LAB_API_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("LAB_API_TIMEOUT_SECS must be a valid u64, got '{raw}'"))
            })?,
            None => defaults.timeout_secs,
        };

        let page_size = match lookup("LAB_PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse()
                .ok()
                .filter(|n: &u32| *n > 0)
                .ok_or_else(|| {
                    ClientError::Config(format!(
                        "LAB_PAGE_SIZE must be a positive integer, got '{raw}'"
                    ))
                })?,
            None => defaults.page_size,
        };

        Ok(Self {
            base_url,
            token,
            timeout_secs,
            page_size,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.page_size, 10);
        assert!(config.token.is_none());
    }

    #[test]
    fn trims_trailing_slash_and_reads_token() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("LAB_API_BASE_URL", "https://lab.example.edu/api/"),
            ("LAB_API_TOKEN", "abc"),
            ("LAB_PAGE_SIZE", "20"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://lab.example.edu/api");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(ClientConfig::from_lookup(lookup(&[("LAB_API_TIMEOUT_SECS", "soon")])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[("LAB_PAGE_SIZE", "0")])).is_err());
    }
}
