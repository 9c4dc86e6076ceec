// # zonesync-core
//
// Core library for zone record management.
//
// ## Architecture Overview
//
// This library provides the provider-agnostic half of zonesync:
// - **GenericRecord**: The caller-facing record representation
// - **ZoneProvider**: Trait for reading and reconciling the records of a zone
// - **ProviderRegistry**: Plugin-based registry for zone providers
// - **ProviderConfig**: Serializable provider configuration
//
// Provider crates (e.g. `zonesync-provider-dynv6`) translate generic records
// into their own API representation and register a factory here.
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Record model is separate from provider wire formats
// 2. **Plugin-Based**: Providers are registered dynamically, no hard-coded if-else
// 3. **Library-First**: All functionality can be used as a library
// 4. **No Hidden Retries**: Remote failures are returned to the caller as-is

pub mod config;
pub mod error;
pub mod record;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use config::ProviderConfig;
pub use error::{Error, Result};
pub use record::{DEFAULT_TTL, GenericRecord, RecordType, Zone};
pub use registry::ProviderRegistry;
pub use traits::{ZoneProvider, ZoneProviderFactory};

pub use tokio_util::sync::CancellationToken;
