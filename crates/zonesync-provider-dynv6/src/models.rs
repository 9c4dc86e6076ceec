//! dynv6 record representations
//!
//! Two layers live here:
//!
//! - [`RemoteRecord`] / [`RemoteRecordRequest`]: the typed form the codec and
//!   reconciler work with. Type-specific fields are carried by
//!   [`RecordContent`], so an MX record cannot carry a CAA tag.
//! - `Api*` structs: the flat JSON shape of the dynv6 REST API, where every
//!   record has every field and only some are meaningful.

use serde::{Deserialize, Serialize};
use std::fmt;
use zonesync_core::RecordType;

/// Identifier assigned to a record by the remote store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId(value.to_string())
    }
}

/// A zone as known to the remote store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneHandle {
    /// Store-specific zone identifier
    pub id: String,
    /// Zone name
    pub name: String,
}

/// Type-specific record payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordContent {
    A(String),
    Aaaa(String),
    Cname(String),
    Txt(String),
    Spf(String),
    Caa {
        flags: u8,
        tag: String,
        value: String,
    },
    Mx {
        priority: u16,
        target: String,
    },
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
}

impl RecordContent {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordContent::A(_) => RecordType::A,
            RecordContent::Aaaa(_) => RecordType::Aaaa,
            RecordContent::Cname(_) => RecordType::Cname,
            RecordContent::Txt(_) => RecordType::Txt,
            RecordContent::Spf(_) => RecordType::Spf,
            RecordContent::Caa { .. } => RecordType::Caa,
            RecordContent::Mx { .. } => RecordType::Mx,
            RecordContent::Srv { .. } => RecordType::Srv,
        }
    }
}

/// A record stored by dynv6
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRecord {
    pub id: RecordId,
    pub name: String,
    pub content: RecordContent,
}

impl RemoteRecord {
    pub fn record_type(&self) -> RecordType {
        self.content.record_type()
    }
}

/// Payload for creating or updating a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRecordRequest {
    pub name: String,
    pub content: RecordContent,
}

impl RemoteRecordRequest {
    pub fn record_type(&self) -> RecordType {
        self.content.record_type()
    }

    /// The record the store would hold after accepting this request
    pub fn into_record(self, id: RecordId) -> RemoteRecord {
        RemoteRecord {
            id,
            name: self.name,
            content: self.content,
        }
    }
}

/// Zone as returned by `GET /zones` and `GET /zones/by-name/:name`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiZone {
    pub id: u64,
    pub name: String,
}

impl From<ApiZone> for ZoneHandle {
    fn from(value: ApiZone) -> Self {
        ZoneHandle {
            id: value.id.to_string(),
            name: value.name,
        }
    }
}

/// Record as returned by `GET /zones/:zone_id/records`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiRecord {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub flags: Option<u8>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub priority: Option<u16>,
    #[serde(default)]
    pub weight: Option<u16>,
    #[serde(default)]
    pub port: Option<u16>,
}

/// The listing only ever contains types this crate can also encode; any
/// other type means the store broke its contract.
impl From<ApiRecord> for RemoteRecord {
    fn from(value: ApiRecord) -> Self {
        let content = match value.record_type.as_str() {
            "A" => RecordContent::A(value.data),
            "AAAA" => RecordContent::Aaaa(value.data),
            "CNAME" => RecordContent::Cname(value.data),
            "TXT" => RecordContent::Txt(value.data),
            "SPF" => RecordContent::Spf(value.data),
            "CAA" => RecordContent::Caa {
                flags: value.flags.unwrap_or(0),
                tag: value.tag.unwrap_or_default(),
                value: value.data,
            },
            "MX" => RecordContent::Mx {
                priority: value.priority.unwrap_or(0),
                target: value.data,
            },
            "SRV" => RecordContent::Srv {
                priority: value.priority.unwrap_or(0),
                weight: value.weight.unwrap_or(0),
                port: value.port.unwrap_or(0),
                target: value.data,
            },
            other => unreachable!("dynv6 returned unsupported record type {other}"),
        };

        RemoteRecord {
            id: RecordId(value.id.to_string()),
            name: value.name,
            content,
        }
    }
}

/// Body of `POST /zones/:zone_id/records` and `PATCH /zones/:zone_id/records/:id`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub(crate) struct ApiRecordRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl From<&RemoteRecordRequest> for ApiRecordRequest {
    fn from(value: &RemoteRecordRequest) -> Self {
        let mut body = ApiRecordRequest {
            name: value.name.clone(),
            record_type: value.record_type().to_string(),
            data: String::new(),
            flags: None,
            tag: None,
            priority: None,
            weight: None,
            port: None,
        };

        match &value.content {
            RecordContent::A(data)
            | RecordContent::Aaaa(data)
            | RecordContent::Cname(data)
            | RecordContent::Txt(data)
            | RecordContent::Spf(data) => body.data = data.clone(),
            RecordContent::Caa { flags, tag, value } => {
                body.flags = Some(*flags);
                body.tag = Some(tag.clone());
                body.data = value.clone();
            }
            RecordContent::Mx { priority, target } => {
                body.priority = Some(*priority);
                body.data = target.clone();
            }
            RecordContent::Srv {
                priority,
                weight,
                port,
                target,
            } => {
                body.priority = Some(*priority);
                body.weight = Some(*weight);
                body.port = Some(*port);
                body.data = target.clone();
            }
        }

        body
    }
}
