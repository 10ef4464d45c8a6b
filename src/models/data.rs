use crate::models::{
    EventData, MessageData, MetricData, Properties, RemoteDependencyData, RequestData, Sanitize,
};
use serde::Serialize;

/// Wrapper identifying the payload schema, serialized as the
/// `baseType`/`baseData` pair of the envelope contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "baseType", content = "baseData")]
pub enum Data {
    /// Completion of an incoming request.
    #[serde(rename = "RequestData")]
    Request(RequestData),
    /// Call to a remote component.
    #[serde(rename = "RemoteDependencyData")]
    RemoteDependency(RemoteDependencyData),
    /// Free-text trace statement.
    #[serde(rename = "MessageData")]
    Message(MessageData),
    /// Structured event record.
    #[serde(rename = "EventData")]
    Event(EventData),
    /// Metric measurements.
    #[serde(rename = "MetricData")]
    Metric(MetricData),
}

impl Data {
    /// The envelope type name announcing this payload.
    pub fn envelope_name(&self) -> &'static str {
        match self {
            Data::Request(_) => "Microsoft.ApplicationInsights.Request",
            Data::RemoteDependency(_) => "Microsoft.ApplicationInsights.RemoteDependency",
            Data::Message(_) => "Microsoft.ApplicationInsights.Message",
            Data::Event(_) => "Microsoft.ApplicationInsights.Event",
            Data::Metric(_) => "Microsoft.ApplicationInsights.Metric",
        }
    }

    pub(crate) fn properties_mut(&mut self) -> &mut Properties {
        match self {
            Data::Request(v) => &mut v.properties,
            Data::RemoteDependency(v) => &mut v.properties,
            Data::Message(v) => &mut v.properties,
            Data::Event(v) => &mut v.properties,
            Data::Metric(v) => &mut v.properties,
        }
    }
}

impl Sanitize for Data {
    fn sanitize(&mut self) -> Vec<String> {
        match self {
            Data::Request(v) => v.sanitize(),
            Data::RemoteDependency(v) => v.sanitize(),
            Data::Message(v) => v.sanitize(),
            Data::Event(v) => v.sanitize(),
            Data::Metric(v) => v.sanitize(),
        }
    }
}
