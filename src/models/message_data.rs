use crate::models::{
    sanitize_field, sanitize_measurements, sanitize_properties, Measurements, Properties,
    Sanitize, SeverityLevel,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Instances of Message represent printf-like trace statements that are
/// text-searched. Log4Net, NLog and other text-based log file entries are
/// translated into instances of this type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageData {
    /// Schema version
    pub ver: i32,

    /// Trace message
    pub message: String,

    /// Trace severity level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_level: Option<SeverityLevel>,

    /// Collection of custom properties.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: Properties,

    /// Collection of custom measurements.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub measurements: Measurements,
}

impl Default for MessageData {
    fn default() -> Self {
        Self {
            ver: 2,
            message: String::new(),
            severity_level: None,
            properties: Properties::new(),
            measurements: Measurements::new(),
        }
    }
}

impl Sanitize for MessageData {
    fn sanitize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        sanitize_field(&mut warnings, &mut self.message, 32768, "MessageData.Message");
        sanitize_properties(&mut warnings, &mut self.properties, "MessageData");
        sanitize_measurements(&mut warnings, &mut self.measurements, "MessageData");
        warnings
    }
}
