// (C) Copyright IBM Corp. 2025.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

use crate::errors::{Error, Result};

pub const DEFAULT_API_VERSION: &str = "4.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings of the provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Instance URL, e.g. `https://example.looker.com:19999`.
    pub base_url: String,
    pub api_version: String,
    pub access_token: String,
    pub timeout: Duration,
    pub verify_ssl: bool,
    /// Whether `default = true` is applied when updating a theme, not only on creation.
    pub theme_default_on_update: bool,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("access_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("verify_ssl", &self.verify_ssl)
            .field("theme_default_on_update", &self.theme_default_on_update)
            .finish()
    }
}

impl ProviderConfig {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            access_token: access_token.to_string(),
            timeout: DEFAULT_TIMEOUT,
            verify_ssl: true,
            theme_default_on_update: true,
        }
    }

    pub fn with_api_version(mut self, api_version: &str) -> Self {
        self.api_version = api_version.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    pub fn with_theme_default_on_update(mut self, enabled: bool) -> Self {
        self.theme_default_on_update = enabled;
        self
    }

    /// Reads the configuration from `LOOKER_*` environment variables.
    ///
    /// `LOOKER_BASE_URL` and `LOOKER_ACCESS_TOKEN` are mandatory, the rest
    /// fall back to their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::ConfigurationError(format!("{key} should be set")))
        };

        let base_url = required("LOOKER_BASE_URL")?;
        let access_token = required("LOOKER_ACCESS_TOKEN")?;
        let mut config = Self::new(&base_url, &access_token);

        if let Some(api_version) = lookup("LOOKER_API_VERSION") {
            if api_version.is_empty() {
                return Err(Error::ConfigurationError(
                    "LOOKER_API_VERSION must not be empty".to_string(),
                ));
            }
            config.api_version = api_version;
        }
        if let Some(timeout) = lookup("LOOKER_TIMEOUT") {
            let seconds = timeout.parse::<u64>().map_err(|_| {
                Error::ConfigurationError(format!(
                    "LOOKER_TIMEOUT must be a number of seconds, got '{timeout}'"
                ))
            })?;
            config.timeout = Duration::from_secs(seconds);
        }
        if let Some(verify_ssl) = lookup("LOOKER_VERIFY_SSL") {
            config.verify_ssl = parse_flag("LOOKER_VERIFY_SSL", &verify_ssl)?;
        }
        if let Some(enabled) = lookup("LOOKER_THEME_DEFAULT_ON_UPDATE") {
            config.theme_default_on_update =
                parse_flag("LOOKER_THEME_DEFAULT_ON_UPDATE", &enabled)?;
        }
        Ok(config)
    }

    /// Root of the versioned REST API, e.g. `https://example.looker.com/api/4.0`.
    pub fn api_url(&self) -> String {
        format!("{}/api/{}", self.base_url, self.api_version)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(Error::ConfigurationError(format!(
            "{key} must be a boolean, got '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::from_lookup(lookup(&[
            ("LOOKER_BASE_URL", "https://example.looker.com:19999/"),
            ("LOOKER_ACCESS_TOKEN", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.api_url(), "https://example.looker.com:19999/api/4.0");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.verify_ssl);
        assert!(config.theme_default_on_update);
    }

    #[test]
    fn test_overrides() {
        let config = ProviderConfig::from_lookup(lookup(&[
            ("LOOKER_BASE_URL", "https://example.looker.com"),
            ("LOOKER_ACCESS_TOKEN", "secret"),
            ("LOOKER_API_VERSION", "3.1"),
            ("LOOKER_TIMEOUT", "30"),
            ("LOOKER_VERIFY_SSL", "false"),
            ("LOOKER_THEME_DEFAULT_ON_UPDATE", "0"),
        ]))
        .unwrap();

        assert_eq!(config.api_url(), "https://example.looker.com/api/3.1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.verify_ssl);
        assert!(!config.theme_default_on_update);
    }

    #[test]
    fn test_missing_and_invalid_values() {
        let result = ProviderConfig::from_lookup(lookup(&[("LOOKER_ACCESS_TOKEN", "secret")]));
        assert!(matches!(result, Err(Error::ConfigurationError(_))));

        let result = ProviderConfig::from_lookup(lookup(&[
            ("LOOKER_BASE_URL", "https://example.looker.com"),
            ("LOOKER_ACCESS_TOKEN", "secret"),
            ("LOOKER_TIMEOUT", "soon"),
        ]));
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_empty_api_version_is_rejected() {
        let result = ProviderConfig::from_lookup(lookup(&[
            ("LOOKER_BASE_URL", "https://example.looker.com"),
            ("LOOKER_ACCESS_TOKEN", "secret"),
            ("LOOKER_API_VERSION", ""),
        ]));
        assert!(matches!(
            result,
            Err(Error::ConfigurationError(ref message)) if message.contains("LOOKER_API_VERSION")
        ));
    }

    #[test]
    fn test_debug_hides_token() {
        let config = ProviderConfig::new("https://example.looker.com", "secret");
        assert!(!format!("{config:?}").contains("secret"));
    }
}
