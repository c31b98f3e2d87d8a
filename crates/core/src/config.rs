//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the app session. Pages
//! never read environment variables themselves.

use crate::constants::DEFAULT_API_URL;
use crate::{ScribeError, ScribeResult};
use api_client::Url;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    api_base_url: Url,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`ScribeError::InvalidInput`] unless `api_base_url` is an `http` or `https` URL
    /// with a host.
    pub fn new(api_base_url: Url) -> ScribeResult<Self> {
        if !matches!(api_base_url.scheme(), "http" | "https") {
            return Err(ScribeError::InvalidInput(format!(
                "API URL must use http or https, got '{}'",
                api_base_url.scheme()
            )));
        }

        if api_base_url.host_str().is_none() {
            return Err(ScribeError::InvalidInput(
                "API URL must include a host".into(),
            ));
        }

        if api_base_url.query().is_some() || api_base_url.fragment().is_some() {
            return Err(ScribeError::InvalidInput(
                "API URL must not carry a query or fragment".into(),
            ));
        }

        Ok(Self { api_base_url })
    }

    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    /// Resolves the configuration from a command-line value, falling back to the environment
    /// value and then to [`DEFAULT_API_URL`].
    pub fn resolve(flag: Option<String>, env_value: Option<String>) -> ScribeResult<Self> {
        let value = flag.filter(|v| !v.trim().is_empty()).or(env_value);
        Self::new(api_base_url_from_env_value(value)?)
    }
}

/// Parse the API base URL from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_API_URL`].
pub fn api_base_url_from_env_value(value: Option<String>) -> ScribeResult<Url> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    Url::parse(&value).map_err(|e| ScribeError::InvalidInput(format!("invalid API URL '{value}': {e}")))
}
