//! Client configuration.
//!
//! Values are resolved in three layers: built-in defaults, then the
//! environment ([`ClientConfig::from_env`]), then command-line flags applied
//! through the `with_*` setters.

use std::time::Duration;

/// Default backend address
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Environment variable overriding the backend address
pub const API_URL_ENV: &str = "ORGSCOUT_API_URL";

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "ORGSCOUT_LOG";

/// Environment variables holding the summary credentials
pub const EMAIL_ENV: &str = "ORGSCOUT_EMAIL";
pub const PASSWORD_ENV: &str = "ORGSCOUT_PASSWORD";

/// Configuration for [`crate::client::ScoutClient`] and output rendering.
///
/// # Example
///
/// ```ignore
/// use orgscout::config::ClientConfig;
///
/// let config = ClientConfig::from_env()
///     .with_api_base_url("http://localhost:5000")
///     .with_hyperlinks(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub api_base_url: String,
    /// Connect timeout for backend requests
    pub request_timeout: Duration,
    /// Emit OSC 8 hyperlinks when rendering
    pub hyperlinks: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            hyperlinks: true,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`.
    ///
    /// Blank values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config = config.with_api_base_url(url);
        }
        config
    }

    /// Set the backend base URL. A trailing slash is removed.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.api_base_url = url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_hyperlinks(mut self, enabled: bool) -> Self {
        self.hyperlinks = enabled;
        self
    }

    /// Full URL for an API path such as `/api/get_orgs`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

/// Login used by the summary endpoint.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Read from `ORGSCOUT_EMAIL` and `ORGSCOUT_PASSWORD`. Missing values are empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            email: lookup(EMAIL_ENV).unwrap_or_default(),
            password: lookup(PASSWORD_ENV).unwrap_or_default(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://127.0.0.1:5000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.hyperlinks);
    }

    #[test]
    fn test_env_overrides_default() {
        let config = ClientConfig::from_lookup(lookup_from(&[(API_URL_ENV, "http://scout:8080/")]));
        assert_eq!(config.api_base_url, "http://scout:8080");
    }

    #[test]
    fn test_blank_env_ignored() {
        let config = ClientConfig::from_lookup(lookup_from(&[(API_URL_ENV, "  ")]));
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_flag_overrides_env() {
        let config = ClientConfig::from_lookup(lookup_from(&[(API_URL_ENV, "http://env:1")]))
            .with_api_base_url("http://flag:2");
        assert_eq!(config.api_base_url, "http://flag:2");
    }

    #[test]
    fn test_endpoint_url() {
        let config = ClientConfig::new().with_api_base_url("http://localhost:5000/");
        assert_eq!(
            config.endpoint_url("/api/get_orgs"),
            "http://localhost:5000/api/get_orgs"
        );
    }

    #[test]
    fn test_credentials_from_lookup() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (EMAIL_ENV, "me@example.com"),
            (PASSWORD_ENV, "hunter2"),
        ]));
        assert!(creds.is_complete());
        assert!(!format!("{:?}", creds).contains("hunter2"));

        let partial = Credentials::from_lookup(lookup_from(&[(EMAIL_ENV, "me@example.com")]));
        assert!(!partial.is_complete());
    }
}
