//! Configuration types for zonesync
//!
//! This module defines the provider configuration consumed by
//! [`ProviderRegistry`](crate::ProviderRegistry) and provider factories.

use serde::{Deserialize, Serialize};

/// Default HTTP timeout for provider API requests (in seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Zone provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// dynv6 provider
    Dynv6 {
        /// dynv6 HTTP token
        api_token: String,
        /// API base URL (defaults to the public dynv6 endpoint)
        #[serde(default)]
        base_url: Option<String>,
        /// HTTP timeout in seconds
        #[serde(default)]
        timeout_secs: Option<u64>,
        /// Log mutations instead of sending them
        #[serde(default)]
        dry_run: bool,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ProviderConfig {
    /// Create a dynv6 configuration with defaults for everything but the token
    pub fn dynv6(api_token: impl Into<String>) -> Self {
        ProviderConfig::Dynv6 {
            api_token: api_token.into(),
            base_url: None,
            timeout_secs: None,
            dry_run: false,
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Dynv6 {
                api_token,
                base_url,
                timeout_secs,
                ..
            } => {
                if api_token.trim().is_empty() {
                    return Err(crate::Error::config("dynv6 API token cannot be empty"));
                }
                if let Some(url) = base_url
                    && !url.starts_with("https://")
                    && !url.starts_with("http://")
                {
                    return Err(crate::Error::config(format!(
                        "dynv6 base URL must use HTTP or HTTPS scheme. Got: {}",
                        url
                    )));
                }
                if let Some(secs) = timeout_secs
                    && !(1..=300).contains(secs)
                {
                    return Err(crate::Error::config(format!(
                        "HTTP timeout must be between 1 and 300 seconds. Got: {}",
                        secs
                    )));
                }
                Ok(())
            }
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom provider config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Dynv6 { .. } => "dynv6",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Dynv6 {
                base_url,
                timeout_secs,
                dry_run,
                ..
            } => f
                .debug_struct("Dynv6")
                .field("api_token", &"<REDACTED>")
                .field("base_url", base_url)
                .field("timeout_secs", timeout_secs)
                .field("dry_run", dry_run)
                .finish(),
            ProviderConfig::Custom { factory, config } => f
                .debug_struct("Custom")
                .field("factory", factory)
                .field("config", config)
                .finish(),
        }
    }
}
