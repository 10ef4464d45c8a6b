use crate::models::{
    sanitize_field, sanitize_measurements, sanitize_optional_field, sanitize_properties,
    Measurements, Properties, Sanitize,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// An instance of Request represents completion of an external request to
/// the application to do work and contains a summary of that request
/// execution and the results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestData {
    /// Schema version
    pub ver: i32,

    /// Identifier of a request call instance. Used for correlation between
    /// request and other telemetry items.
    pub id: String,

    /// Source of the request. Examples are the instrumentation key of the
    /// caller or the ip address of the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Name of the request. Represents code path taken to process request.
    /// Low cardinality value to allow better grouping of requests.
    pub name: String,

    /// Request duration in format: DD.HH:MM:SS.FFFFFFF. Must be less than
    /// 1000 days.
    pub duration: String,

    /// Result of a request execution. HTTP status code for HTTP requests.
    pub response_code: String,

    /// Indication of successful or unsuccessful call.
    pub success: bool,

    /// Request URL with all query string parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Collection of custom properties.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: Properties,

    /// Collection of custom measurements.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub measurements: Measurements,
}

impl Default for RequestData {
    fn default() -> Self {
        Self {
            ver: 2,
            id: String::new(),
            source: None,
            name: String::new(),
            duration: String::new(),
            response_code: String::new(),
            success: true,
            url: None,
            properties: Properties::new(),
            measurements: Measurements::new(),
        }
    }
}

impl Sanitize for RequestData {
    fn sanitize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        sanitize_field(&mut warnings, &mut self.id, 128, "RequestData.Id");
        sanitize_field(&mut warnings, &mut self.name, 1024, "RequestData.Name");
        sanitize_field(
            &mut warnings,
            &mut self.response_code,
            1024,
            "RequestData.ResponseCode",
        );
        sanitize_optional_field(&mut warnings, &mut self.source, 1024, "RequestData.Source");
        sanitize_optional_field(&mut warnings, &mut self.url, 2048, "RequestData.Url");
        sanitize_properties(&mut warnings, &mut self.properties, "RequestData");
        sanitize_measurements(&mut warnings, &mut self.measurements, "RequestData");
        warnings
    }
}
