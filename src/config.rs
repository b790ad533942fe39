//! Connection and resolution settings.

use crate::error::{ResolveError, Result};
use crate::place::classifier::PLACE_INDICATORS;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 9200;
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;

/// Minimum Jaro-Winkler score between query and title for a hit to survive.
pub const SIMILARITY_THRESHOLD: f64 = 0.4;

pub const WIKI_BASE_URL: &str = "https://en.wikipedia.org/wiki/";

/// Where the search index lives and how to talk to it.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub host: String,
    pub port: u16,
    /// Path prefix in front of the index name (reverse-proxied clusters).
    pub url_prefix: String,
    pub index_name: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Applied to every request; there is no hidden client default.
    pub timeout: Duration,
    /// Extra attempts after a transport failure.
    pub retries: u32,
}

impl IndexConfig {
    pub fn new(host: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            url_prefix: String::new(),
            index_name: index_name.into(),
            username: None,
            password: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retries: 0,
        }
    }

    /// `http://host:port[/prefix]`. A host that already carries a scheme is kept as-is.
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        let mut url = if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}:{}", host, self.port)
        } else {
            format!("http://{}:{}", host, self.port)
        };
        let prefix = self.url_prefix.trim_matches('/');
        if !prefix.is_empty() {
            url.push('/');
            url.push_str(prefix);
        }
        url
    }

    pub fn search_url(&self) -> String {
        format!("{}/{}/_search", self.base_url(), self.index_name)
    }

    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pwd)) => Some((user.as_str(), pwd.as_str())),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ResolveError::Config("host must not be empty".into()));
        }
        if self.index_name.trim().is_empty() {
            return Err(ResolveError::Config("index name must not be empty".into()));
        }
        if self.username.is_some() && self.password.is_none() {
            return Err(ResolveError::Config(
                "a password is required when a user is given".into(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ResolveError::Config("timeout must be greater than 0".into()));
        }
        Ok(())
    }
}

/// Knobs of the resolution pipeline itself.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub similarity_threshold: f64,
    /// Lower-case substrings; a category containing any of them marks a place.
    pub place_indicators: Vec<String>,
    pub wiki_base_url: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: SIMILARITY_THRESHOLD,
            place_indicators: PLACE_INDICATORS.iter().map(|s| s.to_string()).collect(),
            wiki_base_url: WIKI_BASE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_plain_host() {
        let cfg = IndexConfig::new("localhost", "enwiki");
        assert_eq!(cfg.search_url(), "http://localhost:9200/enwiki/_search");
    }

    #[test]
    fn test_search_url_with_prefix_and_scheme() {
        let mut cfg = IndexConfig::new("https://search.example.org/", "enwiki");
        cfg.port = 443;
        cfg.url_prefix = "/es/".into();
        assert_eq!(cfg.search_url(), "https://search.example.org:443/es/enwiki/_search");
    }

    #[test]
    fn test_validate_rejects_user_without_password() {
        let mut cfg = IndexConfig::new("localhost", "enwiki");
        cfg.username = Some("reader".into());
        assert!(cfg.validate().is_err());
        cfg.password = Some("secret".into());
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.credentials(), Some(("reader", "secret")));
    }

    #[test]
    fn test_validate_rejects_empty_index() {
        let cfg = IndexConfig::new("localhost", " ");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_default_resolver_config() {
        let cfg = ResolverConfig::default();
        assert_eq!(cfg.similarity_threshold, 0.4);
        assert!(cfg.place_indicators.iter().any(|p| p == "universit"));
        assert_eq!(cfg.wiki_base_url, "https://en.wikipedia.org/wiki/");
    }
}
