//! Conversion between generic records and dynv6 records
//!
//! Both directions are pure. `decode` cannot fail because [`RecordContent`]
//! only has variants for types dynv6 stores; `encode` rejects types outside
//! that set and payloads that do not follow their presentation format.

use std::fmt::Display;
use std::str::FromStr;

use zonesync_core::{DEFAULT_TTL, Error, GenericRecord, RecordType, Result};

use crate::models::{RecordContent, RemoteRecord, RemoteRecordRequest};

const CAA_FORM: &str = "flags tag \"value\"";
const MX_FORM: &str = "preference target";
const SRV_FORM: &str = "priority weight port target";

/// Convert a dynv6 record into its generic form
///
/// dynv6 does not report per-record TTLs, so every record gets [`DEFAULT_TTL`].
/// Multi-field types whose fields are all zero or empty decode to an empty
/// payload.
pub fn decode(record: &RemoteRecord) -> GenericRecord {
    let data = match &record.content {
        RecordContent::A(data)
        | RecordContent::Aaaa(data)
        | RecordContent::Cname(data)
        | RecordContent::Txt(data)
        | RecordContent::Spf(data) => data.clone(),

        RecordContent::Caa { flags, tag, value } => {
            if *flags != 0 || !tag.is_empty() || !value.is_empty() {
                format!("{} {} \"{}\"", flags, tag, value)
            } else {
                String::new()
            }
        }

        RecordContent::Mx { priority, target } => {
            if *priority != 0 || !target.is_empty() {
                format!("{} {}", priority, target)
            } else {
                String::new()
            }
        }

        RecordContent::Srv {
            priority,
            weight,
            port,
            target,
        } => {
            if *priority != 0 || *weight != 0 || *port != 0 || !target.is_empty() {
                format!("{} {} {} {}", priority, weight, port, target)
            } else {
                String::new()
            }
        }
    };

    GenericRecord {
        name: record.name.clone(),
        record_type: record.record_type(),
        ttl: DEFAULT_TTL,
        data,
    }
}

/// Build the dynv6 create/update payload for a generic record
///
/// # Errors
///
/// - [`Error::UnsupportedType`] for types dynv6 cannot store
/// - [`Error::MalformedValue`] when the payload has the wrong number of
///   fields or a numeric field does not parse
pub fn encode(record: &GenericRecord) -> Result<RemoteRecordRequest> {
    let content = match &record.record_type {
        RecordType::A => RecordContent::A(record.data.clone()),
        RecordType::Aaaa => RecordContent::Aaaa(record.data.clone()),
        RecordType::Cname => RecordContent::Cname(record.data.clone()),
        RecordType::Txt => RecordContent::Txt(record.data.clone()),
        RecordType::Spf => RecordContent::Spf(record.data.clone()),

        RecordType::Caa => {
            let fields = split_fields(record, 3, CAA_FORM)?;
            RecordContent::Caa {
                flags: parse_field(record, "flags", fields[0])?,
                tag: fields[1].to_string(),
                value: unquote(fields[2]).to_string(),
            }
        }

        RecordType::Mx => {
            let fields = split_fields(record, 2, MX_FORM)?;
            RecordContent::Mx {
                priority: parse_field(record, "priority", fields[0])?,
                target: fields[1].to_string(),
            }
        }

        RecordType::Srv => {
            let fields = split_fields(record, 4, SRV_FORM)?;
            RecordContent::Srv {
                priority: parse_field(record, "priority", fields[0])?,
                weight: parse_field(record, "weight", fields[1])?,
                port: parse_field(record, "port", fields[2])?,
                target: fields[3].to_string(),
            }
        }

        other => return Err(Error::unsupported_type(other)),
    };

    Ok(RemoteRecordRequest {
        name: record.name.clone(),
        content,
    })
}

fn split_fields<'a>(record: &'a GenericRecord, expected: usize, form: &str) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = record.data.split_whitespace().collect();
    if fields.len() != expected {
        return Err(Error::malformed(
            &record.record_type,
            format!(
                "expected {} fields in the form '{}', got {}",
                expected,
                form,
                fields.len()
            ),
        ));
    }
    Ok(fields)
}

fn parse_field<T>(record: &GenericRecord, field: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    // Unsigned fields are plain digits, with no explicit sign.
    if value.starts_with('+') {
        return Err(Error::malformed(
            &record.record_type,
            format!("invalid {} {}: sign not allowed", field, value),
        ));
    }

    value.parse().map_err(|err| {
        Error::malformed(
            &record.record_type,
            format!("invalid {} {}: {}", field, value, err),
        )
    })
}

// Strips at most one quote on each side; internal quotes are kept as-is.
fn unquote(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}
