use crate::models::{
    sanitize_field, sanitize_measurements, sanitize_properties, Measurements, Properties,
    Sanitize,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Instances of Event represent structured event records that can be
/// grouped and searched by their properties. Event data item also creates
/// a metric of event count by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventData {
    /// Schema version
    pub ver: i32,

    /// Event name. Keep it low cardinality to allow proper grouping and
    /// useful metrics.
    pub name: String,

    /// Collection of custom properties.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: Properties,

    /// Collection of custom measurements.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub measurements: Measurements,
}

impl Default for EventData {
    fn default() -> Self {
        Self {
            ver: 2,
            name: String::new(),
            properties: Properties::new(),
            measurements: Measurements::new(),
        }
    }
}

impl Sanitize for EventData {
    fn sanitize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        sanitize_field(&mut warnings, &mut self.name, 512, "EventData.Name");
        sanitize_properties(&mut warnings, &mut self.properties, "EventData");
        sanitize_measurements(&mut warnings, &mut self.measurements, "EventData");
        warnings
    }
}
