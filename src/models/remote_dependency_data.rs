use crate::models::{
    sanitize_field, sanitize_measurements, sanitize_optional_field, sanitize_properties,
    Measurements, Properties, Sanitize,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// An instance of Remote Dependency represents an interaction of the
/// monitored component with a remote component/service like SQL or an HTTP
/// endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDependencyData {
    /// Schema version
    pub ver: i32,

    /// Name of the command initiated with this dependency call. Low
    /// cardinality value. Examples are stored procedure name and URL path
    /// template.
    pub name: String,

    /// Identifier of a dependency call instance. Used for correlation with
    /// the request telemetry item corresponding to this dependency call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Result code of a dependency call. Examples are SQL error code and
    /// HTTP status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_code: Option<String>,

    /// Request duration in format: DD.HH:MM:SS.FFFFFFF. Must be less than
    /// 1000 days.
    pub duration: String,

    /// Indication of successful or unsuccessful call.
    pub success: bool,

    /// Command initiated by this dependency call. Examples are SQL
    /// statement and HTTP URL's with all query parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// Target site of a dependency call. Examples are server name, host
    /// address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Dependency type name. Very low cardinality value for logical
    /// grouping of dependencies and interpretation of other fields like
    /// commandName and resultCode. Examples are SQL, Azure table, and HTTP.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Collection of custom properties.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: Properties,

    /// Collection of custom measurements.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub measurements: Measurements,
}

impl Default for RemoteDependencyData {
    fn default() -> Self {
        Self {
            ver: 2,
            name: String::new(),
            id: None,
            result_code: None,
            duration: String::new(),
            success: true,
            data: None,
            target: None,
            type_: None,
            properties: Properties::new(),
            measurements: Measurements::new(),
        }
    }
}

impl Sanitize for RemoteDependencyData {
    fn sanitize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        sanitize_field(
            &mut warnings,
            &mut self.name,
            1024,
            "RemoteDependencyData.Name",
        );
        sanitize_optional_field(&mut warnings, &mut self.id, 128, "RemoteDependencyData.Id");
        sanitize_optional_field(
            &mut warnings,
            &mut self.result_code,
            1024,
            "RemoteDependencyData.ResultCode",
        );
        sanitize_optional_field(
            &mut warnings,
            &mut self.data,
            8192,
            "RemoteDependencyData.Data",
        );
        sanitize_optional_field(
            &mut warnings,
            &mut self.target,
            1024,
            "RemoteDependencyData.Target",
        );
        sanitize_optional_field(
            &mut warnings,
            &mut self.type_,
            1024,
            "RemoteDependencyData.Type",
        );
        sanitize_properties(&mut warnings, &mut self.properties, "RemoteDependencyData");
        sanitize_measurements(&mut warnings, &mut self.measurements, "RemoteDependencyData");
        warnings
    }
}
