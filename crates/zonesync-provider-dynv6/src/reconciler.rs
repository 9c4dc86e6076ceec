//! Zone reconciliation
//!
//! [`Reconciler`] implements [`ZoneProvider`] on top of any
//! [`RemoteDnsStore`]. Each operation:
//!
//! 1. Resolves the zone name to a handle
//! 2. Fetches the complete record listing once
//! 3. Walks the input records in order, matching each against that snapshot
//! 4. Issues at most one mutation per input record
//!
//! Matching always uses the snapshot from step 2, so records created earlier
//! in the same call are never seen by later inputs. The first error aborts the
//! operation; mutations already applied stay applied.

use async_trait::async_trait;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use zonesync_core::{Error, GenericRecord, Result, Zone, ZoneProvider};

use crate::codec;
use crate::matcher;
use crate::models::{RemoteRecord, ZoneHandle};
use crate::store::RemoteDnsStore;
use crate::PROVIDER_NAME;

/// Zone provider backed by a remote DNS store
#[derive(Debug)]
pub struct Reconciler<S> {
    store: S,
}

impl<S: RemoteDnsStore> Reconciler<S> {
    /// Create a reconciler over an initialized store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve the zone and fetch its current listing
    async fn snapshot(
        &self,
        cancel: &CancellationToken,
        zone: &str,
    ) -> Result<(ZoneHandle, Vec<RemoteRecord>)> {
        let handle = guarded(cancel, self.store.resolve_zone(zone)).await?;
        let listing = guarded(cancel, self.store.list_records(&handle)).await?;

        debug!(
            zone = %handle.name,
            zone_id = %handle.id,
            records = listing.len(),
            "Fetched zone listing"
        );

        Ok((handle, listing))
    }
}

#[async_trait]
impl<S: RemoteDnsStore> ZoneProvider for Reconciler<S> {
    async fn list_zones(&self, cancel: &CancellationToken) -> Result<Vec<Zone>> {
        let zones = guarded(cancel, self.store.list_zones()).await?;
        Ok(zones.into_iter().map(|zone| Zone::new(zone.name)).collect())
    }

    async fn get_records(&self, cancel: &CancellationToken, zone: &str) -> Result<Vec<GenericRecord>> {
        let (_, listing) = self.snapshot(cancel, zone).await?;
        Ok(listing.iter().map(codec::decode).collect())
    }

    async fn append_records(
        &self,
        cancel: &CancellationToken,
        zone: &str,
        records: &[GenericRecord],
    ) -> Result<Vec<GenericRecord>> {
        let (handle, listing) = self.snapshot(cancel, zone).await?;
        let mut created = Vec::with_capacity(records.len());

        for record in records {
            if let Some(existing) = matcher::find(&listing, record) {
                debug!(
                    zone = %handle.name,
                    name = %record.name,
                    kind = %record.record_type,
                    record_id = %existing.id,
                    "Record already exists, skipping"
                );
                continue;
            }

            let request = codec::encode(record)?;

            info!(
                zone = %handle.name,
                name = %record.name,
                kind = %record.record_type,
                "Creating record"
            );
            let remote = guarded(cancel, self.store.create_record(&handle, &request)).await?;
            debug!(record_id = %remote.id, "Created record");

            created.push(record.clone());
        }

        Ok(created)
    }

    async fn set_records(
        &self,
        cancel: &CancellationToken,
        zone: &str,
        records: &[GenericRecord],
    ) -> Result<Vec<GenericRecord>> {
        let (handle, listing) = self.snapshot(cancel, zone).await?;
        let mut set = Vec::with_capacity(records.len());

        for record in records {
            let request = codec::encode(record)?;

            let remote = match matcher::find(&listing, record) {
                Some(existing) => {
                    info!(
                        zone = %handle.name,
                        name = %record.name,
                        kind = %record.record_type,
                        record_id = %existing.id,
                        "Updating record"
                    );
                    guarded(
                        cancel,
                        self.store.update_record(&handle, &existing.id, &request),
                    )
                    .await?
                }
                None => {
                    info!(
                        zone = %handle.name,
                        name = %record.name,
                        kind = %record.record_type,
                        "Creating record"
                    );
                    guarded(cancel, self.store.create_record(&handle, &request)).await?
                }
            };
            debug!(record_id = %remote.id, "Record set");

            set.push(record.clone());
        }

        Ok(set)
    }

    async fn delete_records(
        &self,
        cancel: &CancellationToken,
        zone: &str,
        records: &[GenericRecord],
    ) -> Result<Vec<GenericRecord>> {
        let (handle, listing) = self.snapshot(cancel, zone).await?;
        let mut deleted = Vec::with_capacity(records.len());

        for record in records {
            let Some(existing) = matcher::find(&listing, record) else {
                continue;
            };

            info!(
                zone = %handle.name,
                name = %record.name,
                kind = %record.record_type,
                record_id = %existing.id,
                "Deleting record"
            );
            guarded(cancel, self.store.delete_record(&handle, &existing.id)).await?;

            deleted.push(record.clone());
        }

        Ok(deleted)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Run a remote call unless the token is (or becomes) cancelled
async fn guarded<T>(cancel: &CancellationToken, call: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = call => result,
    }
}
