// # Zone Provider Trait
//
// Defines the interface the automation layer uses to manage zone records.
//
// ## Implementations
//
// - dynv6: `zonesync-provider-dynv6` crate
//
// ## Usage
//
// ```rust,ignore
// use zonesync_core::{CancellationToken, GenericRecord, RecordType, ZoneProvider};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* ZoneProvider implementation */;
//     let cancel = CancellationToken::new();
//
//     provider.set_records(
//         &cancel,
//         "example.dynv6.net",
//         &[GenericRecord::new("www", RecordType::A, "192.0.2.1")],
//     ).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::record::{GenericRecord, Zone};

/// Trait for zone provider implementations
///
/// Every operation resolves the zone, fetches its current listing once and
/// then applies one remote mutation per input record, in input order.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Cancellation
///
/// Each operation takes a [`CancellationToken`]. Cancelling it aborts the
/// in-flight remote call and the operation returns
/// [`Error::Cancelled`](crate::Error::Cancelled). Mutations that already
/// completed are left in place.
///
/// # Failure Semantics
///
/// Providers never retry and never roll back. The first failure aborts the
/// operation and is returned to the caller.
#[async_trait]
pub trait ZoneProvider: Send + Sync {
    /// List the zones visible to the configured credential
    async fn list_zones(&self, cancel: &CancellationToken) -> Result<Vec<Zone>, crate::Error>;

    /// Return every record in the zone, in the provider's listing order
    async fn get_records(
        &self,
        cancel: &CancellationToken,
        zone: &str,
    ) -> Result<Vec<GenericRecord>, crate::Error>;

    /// Create the records that do not exist yet
    ///
    /// A record whose (type, name) already exists is skipped, never
    /// overwritten. Returns only the records that were created.
    async fn append_records(
        &self,
        cancel: &CancellationToken,
        zone: &str,
        records: &[GenericRecord],
    ) -> Result<Vec<GenericRecord>, crate::Error>;

    /// Create or update every record so the zone reflects the input
    ///
    /// Returns one record per input, in input order.
    async fn set_records(
        &self,
        cancel: &CancellationToken,
        zone: &str,
        records: &[GenericRecord],
    ) -> Result<Vec<GenericRecord>, crate::Error>;

    /// Delete the records that exist in the zone
    ///
    /// Inputs without a matching remote record are ignored. Returns only the
    /// records that were deleted.
    async fn delete_records(
        &self,
        cancel: &CancellationToken,
        zone: &str,
        records: &[GenericRecord],
    ) -> Result<Vec<GenericRecord>, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing zone providers from configuration
pub trait ZoneProviderFactory: Send + Sync {
    /// Create a ZoneProvider instance from configuration
    ///
    /// Fails with [`Error::Config`](crate::Error::Config) when required
    /// settings such as the API token are missing.
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<Box<dyn ZoneProvider>, crate::Error>;
}
