use crate::models::{sanitize_properties, DataPoint, Properties, Sanitize};
use serde::Serialize;
use std::collections::BTreeMap;

/// An instance of the Metric item is a list of measurements (single data
/// points) and/or aggregations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricData {
    /// Schema version
    pub ver: i32,

    /// List of metrics. Only one metric in the list is currently supported
    /// by Application Insights storage. If multiple data points were sent
    /// only the first one will be used.
    pub metrics: Vec<DataPoint>,

    /// Collection of custom properties.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: Properties,
}

impl Sanitize for MetricData {
    fn sanitize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        for metric in &mut self.metrics {
            warnings.extend(metric.sanitize());
        }
        sanitize_properties(&mut warnings, &mut self.properties, "MetricData");
        warnings
    }
}
