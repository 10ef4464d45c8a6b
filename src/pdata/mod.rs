//! OpenTelemetry pipeline data consumed by the exporter.
//!
//! A batch of any signal kind is a forest of `Resource` →
//! `InstrumentationLibrary` → record triples. Every level of the hierarchy
//! can be absent, mirroring the wire representation: collection elements
//! are `Option`s and the iteration driver decides what a missing node
//! means.

mod logs;
mod metrics;
mod trace;

pub use logs::*;
pub use metrics::*;
pub use trace::*;

use serde::Serialize;
use std::collections::BTreeMap;

/// A value attached to a record attribute.
///
/// Serializes to the equivalent plain JSON value, which is also the
/// canonical string form used when a structured value has to be stored in
/// a string property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer value.
    Int(i64),
    /// 64-bit floating point value.
    Double(f64),
    /// UTF-8 string value.
    String(String),
    /// Nested key-value map.
    Map(BTreeMap<String, AttributeValue>),
    /// Homogeneous or heterogeneous list of values.
    Array(Vec<AttributeValue>),
}

/// Attribute map attached to spans and log records.
pub type AttributeMap = BTreeMap<String, AttributeValue>;

/// The entity producing telemetry. Resource attribute values are always
/// strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    /// Attributes describing the telemetry source, e.g. `service.name`.
    pub attributes: BTreeMap<String, String>,
}

/// Name and version of the library that produced a batch of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstrumentationLibrary {
    /// Library name; empty means unnamed.
    pub name: String,
    /// Library version; empty means unversioned.
    pub version: String,
}

/// W3C trace id. The all-zero id is the invalid placeholder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceId(pub [u8; 16]);

impl TraceId {
    /// Lower-hex rendering, always 32 characters.
    pub fn to_hex(self) -> String {
        format!("{:032x}", u128::from_be_bytes(self.0))
    }
}

/// W3C span id. The all-zero id is the invalid placeholder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanId(pub [u8; 8]);

impl SpanId {
    /// Lower-hex rendering, always 16 characters.
    pub fn to_hex(self) -> String {
        format!("{:016x}", u64::from_be_bytes(self.0))
    }
}

/// A batch of records of one signal kind.
#[derive(Debug, Clone, Default)]
pub struct Batch<R> {
    /// Per-resource groups; an absent element is skipped during iteration.
    pub resource_records: Vec<Option<ResourceRecords<R>>>,
}

/// Records produced by a single resource.
#[derive(Debug, Clone, Default)]
pub struct ResourceRecords<R> {
    /// The resource; required, a group without one is skipped entirely.
    pub resource: Option<Resource>,
    /// Per-library groups; an absent element is skipped during iteration.
    pub library_records: Vec<Option<LibraryRecords<R>>>,
}

/// Records produced by a single instrumentation library.
#[derive(Debug, Clone, Default)]
pub struct LibraryRecords<R> {
    /// The producing library; optional.
    pub library: Option<InstrumentationLibrary>,
    /// The records themselves; an absent element is skipped during
    /// iteration but still counts towards [`Batch::record_count`].
    pub records: Vec<Option<R>>,
}

impl<R> Batch<R> {
    /// An empty batch.
    pub fn new() -> Self {
        Batch {
            resource_records: Vec::new(),
        }
    }

    /// A batch with a single resource/library group holding `records`.
    pub fn with_group(
        resource: Resource,
        library: Option<InstrumentationLibrary>,
        records: Vec<R>,
    ) -> Self {
        Batch {
            resource_records: vec![Some(ResourceRecords {
                resource: Some(resource),
                library_records: vec![Some(LibraryRecords {
                    library,
                    records: records.into_iter().map(Some).collect(),
                })],
            })],
        }
    }

    /// Number of record slots in the batch, absent leaves included.
    ///
    /// This is the count the exporter facades measure drops against, so a
    /// record that exists on the wire but never reaches the visitor still
    /// shows up as dropped.
    pub fn record_count(&self) -> usize {
        self.resource_records
            .iter()
            .flatten()
            .flat_map(|rr| rr.library_records.iter().flatten())
            .map(|lr| lr.records.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_id_formats_as_32_hex_chars() {
        let id = TraceId([
            0x4b, 0xf9, 0x2f, 0x35, 0x77, 0xb3, 0x4d, 0xa6, 0xa3, 0xce, 0x92, 0x9d, 0x0e, 0x0e,
            0x47, 0x36,
        ]);
        assert_eq!(id.to_hex(), "4bf92f3577b34da6a3ce929d0e0e4736");
        assert_eq!(TraceId::default().to_hex(), "0".repeat(32));
    }

    #[test]
    fn span_id_formats_as_16_hex_chars() {
        let id = SpanId([0x00, 0xf0, 0x67, 0xaa, 0x0b, 0xa9, 0x02, 0xb7]);
        assert_eq!(id.to_hex(), "00f067aa0ba902b7");
        assert_eq!(SpanId::default().to_hex(), "0".repeat(16));
    }

    #[test]
    fn record_count_includes_absent_leaves() {
        let mut batch: Batch<u8> = Batch::with_group(Resource::default(), None, vec![1, 2]);
        batch.resource_records[0]
            .as_mut()
            .unwrap()
            .library_records[0]
            .as_mut()
            .unwrap()
            .records
            .push(None);
        assert_eq!(batch.record_count(), 3);
    }

    #[test]
    fn record_count_skips_absent_containers() {
        let mut batch: Batch<u8> = Batch::new();
        batch.resource_records.push(None);
        batch.resource_records.push(Some(ResourceRecords {
            resource: Some(Resource::default()),
            library_records: vec![None],
        }));
        assert_eq!(batch.record_count(), 0);
    }
}
