use crate::models::{sanitize_optional_field, Data, Sanitize};
use serde::Serialize;
use std::collections::BTreeMap;

/// System variables for a telemetry item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Envelope schema version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ver: Option<i32>,
    /// Type name of the enclosed payload, e.g.
    /// `Microsoft.ApplicationInsights.Request`.
    pub name: &'static str,
    /// Event date time in RFC 3339 format with nanosecond precision.
    pub time: String,
    /// Sampling rate in percent the item was collected under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<f64>,
    /// Sequence field used to track absolute order of uploaded events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq: Option<String>,
    /// The instrumentation key of the Application Insights resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub i_key: Option<String>,
    /// Internal collector flags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<i64>,
    /// Key/value collection of context tags.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    /// The enclosed payload.
    pub data: Data,
}

impl Envelope {
    /// A fresh envelope for `data` stamped with `time`, everything else at
    /// its contract default.
    pub(crate) fn new(data: Data, time: String) -> Self {
        Envelope {
            ver: Some(1),
            name: data.envelope_name(),
            time,
            sample_rate: None,
            seq: None,
            i_key: None,
            flags: None,
            tags: BTreeMap::new(),
            data,
        }
    }
}

impl Sanitize for Envelope {
    fn sanitize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        sanitize_optional_field(&mut warnings, &mut self.seq, 64, "Envelope.Seq");
        warnings
    }
}
