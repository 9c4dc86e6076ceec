//! Record identity matching
//!
//! A generic record and a remote record are "the same" when their type and
//! name are equal. Data is never compared.

use zonesync_core::GenericRecord;

use crate::models::RemoteRecord;

/// Find the remote record that `candidate` refers to
///
/// Returns the first entry of `listing` with the candidate's (type, name).
/// To restrict the search to a prefix of the listing, pass a sub-slice.
pub fn find<'a>(listing: &'a [RemoteRecord], candidate: &GenericRecord) -> Option<&'a RemoteRecord> {
    listing
        .iter()
        .find(|remote| remote.name == candidate.name && remote.record_type() == candidate.record_type)
}
