//! Provider-agnostic record model
//!
//! [`GenericRecord`] is the representation every caller works with. Its
//! `data` field carries the type-specific payload in presentation format,
//! e.g. `10 mail.example.com` for MX or `0 issue "letsencrypt.org"` for CAA.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};

/// TTL reported for records whose provider does not surface one
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// DNS record type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Txt,
    Spf,
    Caa,
    Mx,
    Srv,
    Ns,
    Ptr,
    /// Any other type, kept in its upper-case presentation form
    Other(String),
}

impl RecordType {
    /// Presentation name of the type (e.g. "AAAA")
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Cname => "CNAME",
            RecordType::Txt => "TXT",
            RecordType::Spf => "SPF",
            RecordType::Caa => "CAA",
            RecordType::Mx => "MX",
            RecordType::Srv => "SRV",
            RecordType::Ns => "NS",
            RecordType::Ptr => "PTR",
            RecordType::Other(name) => name,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Ok(match upper.as_str() {
            "" => return Err(Error::Other("record type cannot be empty".to_string())),
            "A" => RecordType::A,
            "AAAA" => RecordType::Aaaa,
            "CNAME" => RecordType::Cname,
            "TXT" => RecordType::Txt,
            "SPF" => RecordType::Spf,
            "CAA" => RecordType::Caa,
            "MX" => RecordType::Mx,
            "SRV" => RecordType::Srv,
            "NS" => RecordType::Ns,
            "PTR" => RecordType::Ptr,
            _ => RecordType::Other(upper),
        })
    }
}

impl TryFrom<String> for RecordType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RecordType> for String {
    fn from(value: RecordType) -> Self {
        value.as_str().to_string()
    }
}

/// A DNS record in provider-independent form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericRecord {
    /// Record name relative to the zone (e.g. "www" or "_sip._tcp")
    pub name: String,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Time-to-live
    #[serde(with = "ttl_secs", default = "default_ttl")]
    pub ttl: Duration,

    /// Type-specific payload in presentation format
    pub data: String,
}

impl GenericRecord {
    /// Create a record with the default TTL
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        data: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            ttl: DEFAULT_TTL,
            data: data.into(),
        }
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl fmt::Display for GenericRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name,
            self.ttl.as_secs(),
            self.record_type,
            self.data
        )
    }
}

/// Parses `<name> [ttl] <TYPE> <data...>`.
///
/// Whitespace inside the data is normalized to single spaces.
impl FromStr for GenericRecord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = s.split_whitespace();

        let name = tokens
            .next()
            .ok_or_else(|| Error::Other("record line is empty".to_string()))?;

        let mut type_token = tokens
            .next()
            .ok_or_else(|| Error::Other(format!("record '{}' has no type", s.trim())))?;

        let mut ttl = DEFAULT_TTL;
        if let Ok(secs) = type_token.parse::<u64>() {
            ttl = Duration::from_secs(secs);
            type_token = tokens
                .next()
                .ok_or_else(|| Error::Other(format!("record '{}' has no type", s.trim())))?;
        }

        let record_type: RecordType = type_token.parse()?;
        let data = tokens.collect::<Vec<_>>().join(" ");

        Ok(GenericRecord::new(name, record_type, data).with_ttl(ttl))
    }
}

/// A DNS zone visible to a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone name (e.g. "example.dynv6.net")
    pub name: String,
}

impl Zone {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

fn default_ttl() -> Duration {
    DEFAULT_TTL
}

mod ttl_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(ttl.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
