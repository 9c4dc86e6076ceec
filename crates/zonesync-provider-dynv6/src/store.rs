// # Remote DNS Store Trait
//
// The narrow capability the reconciler needs from the dynv6 API.
//
// ## Implementations
//
// - [`Dynv6Client`](crate::Dynv6Client): reqwest client for the REST API
// - Test doubles in `tests/common`
//
// Implementations perform exactly one API call per method and never retry.

use async_trait::async_trait;
use zonesync_core::Result;

use crate::models::{RecordId, RemoteRecord, RemoteRecordRequest, ZoneHandle};

/// Record storage operations of a DNS hosting provider
///
/// All record operations are addressed by a [`ZoneHandle`] obtained from
/// [`resolve_zone`](RemoteDnsStore::resolve_zone) or
/// [`list_zones`](RemoteDnsStore::list_zones).
#[async_trait]
pub trait RemoteDnsStore: Send + Sync {
    /// List every zone visible to the credential
    async fn list_zones(&self) -> Result<Vec<ZoneHandle>>;

    /// Resolve a zone name to its handle
    ///
    /// Fails with [`Error::NotFound`](zonesync_core::Error::NotFound) if the
    /// zone does not exist.
    async fn resolve_zone(&self, name: &str) -> Result<ZoneHandle>;

    /// List the records of a zone in the store's order
    async fn list_records(&self, zone: &ZoneHandle) -> Result<Vec<RemoteRecord>>;

    /// Create a record, returning it with its assigned id
    async fn create_record(
        &self,
        zone: &ZoneHandle,
        request: &RemoteRecordRequest,
    ) -> Result<RemoteRecord>;

    /// Replace the content of an existing record
    async fn update_record(
        &self,
        zone: &ZoneHandle,
        id: &RecordId,
        request: &RemoteRecordRequest,
    ) -> Result<RemoteRecord>;

    /// Delete a record
    async fn delete_record(&self, zone: &ZoneHandle, id: &RecordId) -> Result<()>;
}
