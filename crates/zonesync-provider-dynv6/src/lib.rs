// # dynv6 Zone Provider
//
// This crate provides the dynv6 implementation of `ZoneProvider`.
//
// ## Layout
//
// - `models`: typed remote records (`RecordContent` tagged union) and the flat API JSON
// - `codec`: generic record <-> dynv6 record translation (pure)
// - `matcher`: (type, name) identity lookup in a listing
// - `store`: the `RemoteDnsStore` capability the reconciler depends on
// - `client`: reqwest implementation of `RemoteDnsStore`
// - `reconciler`: get/append/set/delete on top of any `RemoteDnsStore`
//
// ## Constraints
//
// - One listing fetch per operation, then one mutation per input record, in input order
// - No retry, backoff or rollback; the first error aborts the operation
// - No caching across operations
//
// ## API Reference
//
// - dynv6 REST API: https://dynv6.github.io/api-spec/

pub mod client;
pub mod codec;
pub mod matcher;
pub mod models;
pub mod reconciler;
pub mod store;

pub use client::Dynv6Client;
pub use models::{RecordContent, RecordId, RemoteRecord, RemoteRecordRequest, ZoneHandle};
pub use reconciler::Reconciler;
pub use store::RemoteDnsStore;

use zonesync_core::{Error, ProviderConfig, ProviderRegistry, Result, ZoneProvider, ZoneProviderFactory};

/// Name this provider is registered under
pub const PROVIDER_NAME: &str = "dynv6";

/// dynv6 zone provider backed by the REST API
pub type Dynv6Provider = Reconciler<Dynv6Client>;

impl Dynv6Provider {
    /// Create a live provider for the given token
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the token is empty.
    pub fn from_token(api_token: impl Into<String>) -> Result<Self> {
        Ok(Reconciler::new(Dynv6Client::new(api_token)?))
    }
}

/// Factory for creating dynv6 providers
pub struct Dynv6Factory;

impl ZoneProviderFactory for Dynv6Factory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn ZoneProvider>> {
        match config {
            ProviderConfig::Dynv6 { .. } => {
                let client = Dynv6Client::from_config(config)?;
                Ok(Box::new(Reconciler::new(client)))
            }
            _ => Err(Error::config("Invalid config for dynv6 provider")),
        }
    }
}

/// Register the dynv6 provider with a registry
///
/// # Example
///
/// ```rust
/// use zonesync_core::ProviderRegistry;
///
/// let registry = ProviderRegistry::new();
/// zonesync_provider_dynv6::register(&registry);
/// assert!(registry.has_provider("dynv6"));
/// ```
pub fn register(registry: &ProviderRegistry) {
    registry.register_provider(PROVIDER_NAME, Box::new(Dynv6Factory));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_creation() {
        let factory = Dynv6Factory;

        let config = ProviderConfig::Dynv6 {
            api_token: "test_token".to_string(),
            base_url: Some("http://127.0.0.1:9".to_string()),
            timeout_secs: Some(5),
            dry_run: false,
        };

        let provider = factory.create(&config).unwrap();
        assert_eq!(provider.provider_name(), "dynv6");
    }

    #[test]
    fn test_factory_missing_token() {
        let provider = Dynv6Factory.create(&ProviderConfig::dynv6(""));
        assert!(provider.is_err());
    }

    #[test]
    fn test_factory_rejects_custom_config() {
        let config = ProviderConfig::Custom {
            factory: "dynv6".to_string(),
            config: serde_json::json!({"token": "abc"}),
        };
        assert!(Dynv6Factory.create(&config).is_err());
    }

    #[test]
    fn test_register_and_create() {
        let registry = ProviderRegistry::new();
        register(&registry);

        assert!(registry.has_provider("dynv6"));
        let provider = registry
            .create_provider(&ProviderConfig::dynv6("test_token"))
            .unwrap();
        assert_eq!(provider.provider_name(), PROVIDER_NAME);
    }

    #[test]
    fn test_from_token() {
        assert!(Dynv6Provider::from_token("").unwrap_err().is_config());
        let provider = Dynv6Provider::from_token("token").unwrap();
        assert!(!provider.store().is_dry_run());
    }
}
