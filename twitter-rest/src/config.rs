//! Service configuration for the pipeline client.
//!
//! The collection, storage, and analytics services sit behind one gateway,
//! so a single base URL addresses all of them. The CA chain used to verify
//! that gateway is read from `ca_chain.crt` in the working directory.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the gateway base URL.
pub const BASE_URL_ENV: &str = "BASE_URL";

/// File name of the CA chain, resolved against the working directory.
pub const CA_BUNDLE_FILE: &str = "ca_chain.crt";

/// Overall request timeout applied to every call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required environment variable.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },

    /// The working directory could not be determined.
    #[error("Cannot resolve working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),
}

/// Configuration for the pipeline services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL prefixed to every endpoint (e.g. "https://gateway.internal:9443").
    pub base_url: String,

    /// PEM bundle of the certificate authorities trusted for the gateway.
    pub ca_bundle_path: PathBuf,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ServiceConfig {
    /// Create a configuration for `base_url` with the default CA path and timeout.
    ///
    /// The CA path is relative, so it resolves against whatever the working
    /// directory is when the transport is built.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ca_bundle_path: PathBuf::from(CA_BUNDLE_FILE),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from the environment.
    ///
    /// Environment variables:
    /// - `BASE_URL`: Gateway URL (required)
    ///
    /// The CA bundle is pinned to `ca_chain.crt` in the current working
    /// directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::WorkingDirectory)?;
        Self::from_parts(std::env::var(BASE_URL_ENV).ok(), &cwd)
    }

    fn from_parts(base_url: Option<String>, cwd: &Path) -> Result<Self, ConfigError> {
        let base_url = base_url
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(BASE_URL_ENV.to_string()))?;

        Url::parse(&base_url).map_err(|e| ConfigError::InvalidValue {
            key: BASE_URL_ENV.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            base_url,
            ca_bundle_path: cwd.join(CA_BUNDLE_FILE),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build a full URL by appending a path to the base URL.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

/// Join a base URL and an absolute path without doubling the slash.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config_defaults() {
        let config = ServiceConfig::new("https://gateway.local");
        assert_eq!(config.timeout(), Duration::from_secs(120));
        assert_eq!(config.ca_bundle_path, PathBuf::from("ca_chain.crt"));
    }

    #[test]
    fn test_from_parts_resolves_ca_against_cwd() {
        let base_url = Some("https://gateway.local".to_string());
        let config = ServiceConfig::from_parts(base_url, Path::new("/srv/app")).unwrap();
        assert_eq!(config.base_url, "https://gateway.local");
        assert_eq!(config.ca_bundle_path, PathBuf::from("/srv/app/ca_chain.crt"));
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_from_parts_requires_base_url() {
        let err = ServiceConfig::from_parts(None, Path::new("/srv/app")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "BASE_URL"));

        let err = ServiceConfig::from_parts(Some("   ".to_string()), Path::new("/srv/app"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn test_from_parts_rejects_relative_url() {
        let err = ServiceConfig::from_parts(Some("gateway.local/api".to_string()), Path::new("/"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "BASE_URL"));
    }

    #[test]
    fn test_url_trailing_slash() {
        let config = ServiceConfig::new("https://gateway.local/");
        assert_eq!(
            config.url("/ri-storage-twitter/observables"),
            "https://gateway.local/ri-storage-twitter/observables"
        );
        assert_eq!(
            config.url("ri-storage-twitter/store/tweet/"),
            "https://gateway.local/ri-storage-twitter/store/tweet/"
        );
    }
}
