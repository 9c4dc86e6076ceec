//! Test doubles and common utilities for reconciliation contract tests
//!
//! This module provides an in-memory `RemoteDnsStore` that records every
//! call in order, so tests can assert on the exact remote side effects.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use zonesync_core::{Error, GenericRecord, RecordType, Result};
use zonesync_provider_dynv6::{
    RecordContent, RecordId, Reconciler, RemoteDnsStore, RemoteRecord, RemoteRecordRequest,
    ZoneHandle,
};

pub const ZONE: &str = "example.dynv6.net";

/// A remote call observed by [`MockRemoteStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    ListZones,
    ResolveZone(String),
    ListRecords(String),
    Create { name: String, kind: RecordType },
    Update { id: String, name: String, kind: RecordType },
    Delete { id: String },
}

impl StoreCall {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            StoreCall::Create { .. } | StoreCall::Update { .. } | StoreCall::Delete { .. }
        )
    }
}

/// An in-memory remote store with a fixed listing
pub struct MockRemoteStore {
    zones: Vec<ZoneHandle>,
    listing: Vec<RemoteRecord>,
    calls: Arc<Mutex<Vec<StoreCall>>>,
    next_id: AtomicUsize,
    /// Fail the mutation with this zero-based index
    fail_mutation: Option<usize>,
    /// Never complete mutations from this zero-based index on
    hang_from: Option<usize>,
    mutation_count: AtomicUsize,
}

impl MockRemoteStore {
    /// Create a store holding one zone with the given listing
    pub fn new(listing: Vec<RemoteRecord>) -> Self {
        Self {
            zones: vec![ZoneHandle {
                id: "7".to_string(),
                name: ZONE.to_string(),
            }],
            listing,
            calls: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicUsize::new(1000),
            fail_mutation: None,
            hang_from: None,
            mutation_count: AtomicUsize::new(0),
        }
    }

    /// Make the n-th mutation (zero-based) fail with a remote call error
    pub fn failing_mutation(mut self, index: usize) -> Self {
        self.fail_mutation = Some(index);
        self
    }

    /// Make the n-th mutation (zero-based) and every later one wait forever
    pub fn hang_from(mut self, index: usize) -> Self {
        self.hang_from = Some(index);
        self
    }

    /// All calls in the order they were made
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Only the create/update/delete calls, in order
    pub fn mutations(&self) -> Vec<StoreCall> {
        self.calls().into_iter().filter(StoreCall::is_mutation).collect()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }

    async fn mutate(&self, call: StoreCall) -> Result<()> {
        self.record(call);
        let index = self.mutation_count.fetch_add(1, Ordering::SeqCst);

        if self.hang_from.is_some_and(|from| index >= from) {
            std::future::pending::<()>().await;
        }
        if self.fail_mutation == Some(index) {
            return Err(Error::remote_call("mock", "Remote store unavailable"));
        }
        Ok(())
    }

    fn find_zone(&self, name: &str) -> Result<ZoneHandle> {
        self.zones
            .iter()
            .find(|zone| zone.name == name)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Zone not found: {}", name)))
    }
}

#[async_trait::async_trait]
impl RemoteDnsStore for MockRemoteStore {
    async fn list_zones(&self) -> Result<Vec<ZoneHandle>> {
        self.record(StoreCall::ListZones);
        Ok(self.zones.clone())
    }

    async fn resolve_zone(&self, name: &str) -> Result<ZoneHandle> {
        self.record(StoreCall::ResolveZone(name.to_string()));
        self.find_zone(name)
    }

    async fn list_records(&self, zone: &ZoneHandle) -> Result<Vec<RemoteRecord>> {
        self.record(StoreCall::ListRecords(zone.id.clone()));
        Ok(self.listing.clone())
    }

    async fn create_record(
        &self,
        _zone: &ZoneHandle,
        request: &RemoteRecordRequest,
    ) -> Result<RemoteRecord> {
        self.mutate(StoreCall::Create {
            name: request.name.clone(),
            kind: request.record_type(),
        })
        .await?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(request.clone().into_record(RecordId(id.to_string())))
    }

    async fn update_record(
        &self,
        _zone: &ZoneHandle,
        id: &RecordId,
        request: &RemoteRecordRequest,
    ) -> Result<RemoteRecord> {
        self.mutate(StoreCall::Update {
            id: id.to_string(),
            name: request.name.clone(),
            kind: request.record_type(),
        })
        .await?;

        Ok(request.clone().into_record(id.clone()))
    }

    async fn delete_record(&self, _zone: &ZoneHandle, id: &RecordId) -> Result<()> {
        self.mutate(StoreCall::Delete { id: id.to_string() }).await
    }
}

/// Build a reconciler over a mock store holding `listing`
pub fn reconciler(listing: Vec<RemoteRecord>) -> Reconciler<MockRemoteStore> {
    Reconciler::new(MockRemoteStore::new(listing))
}

/// A remote A record
pub fn remote_a(id: &str, name: &str, address: &str) -> RemoteRecord {
    RemoteRecord {
        id: RecordId::from(id),
        name: name.to_string(),
        content: RecordContent::A(address.to_string()),
    }
}

/// A remote record with arbitrary content
pub fn remote(id: &str, name: &str, content: RecordContent) -> RemoteRecord {
    RemoteRecord {
        id: RecordId::from(id),
        name: name.to_string(),
        content,
    }
}

/// A desired A record
pub fn desired_a(name: &str, address: &str) -> GenericRecord {
    GenericRecord::new(name, RecordType::A, address)
}
