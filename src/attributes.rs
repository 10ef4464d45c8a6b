//! Extraction of well-known semantic convention attributes into typed
//! structures, alongside the verbatim copy of every attribute into the
//! payload's properties and measurements.

use crate::convert::value_to_string;
use crate::models::{Measurements, Properties};
use crate::pdata::{AttributeMap, AttributeValue};
use crate::semconv;

/// Copies one attribute into `properties` or `measurements` following the
/// coercion rules: booleans and strings become string properties, integers
/// and doubles become numeric measurements, structured values become their
/// canonical string form.
pub(crate) fn set_attribute_as_property_or_measurement(
    key: &str,
    value: &AttributeValue,
    properties: &mut Properties,
    measurements: &mut Measurements,
) {
    match value {
        AttributeValue::Bool(v) => {
            properties.insert(key.to_string(), v.to_string());
        }
        AttributeValue::String(v) => {
            properties.insert(key.to_string(), v.clone());
        }
        AttributeValue::Int(v) => {
            measurements.insert(key.to_string(), *v as f64);
        }
        AttributeValue::Double(v) => {
            measurements.insert(key.to_string(), *v);
        }
        AttributeValue::Map(_) | AttributeValue::Array(_) => {
            properties.insert(key.to_string(), value_to_string(value));
        }
    }
}

/// Copies every attribute without extracting anything.
pub(crate) fn copy_attributes(
    attributes: &AttributeMap,
    properties: &mut Properties,
    measurements: &mut Measurements,
) {
    for (key, value) in attributes {
        set_attribute_as_property_or_measurement(key, value, properties, measurements);
    }
}

fn string_value(value: &AttributeValue) -> Option<String> {
    match value {
        AttributeValue::String(v) => Some(v.clone()),
        _ => None,
    }
}

fn int_value(value: &AttributeValue) -> Option<i64> {
    match value {
        AttributeValue::Int(v) => Some(*v),
        _ => None,
    }
}

// A port attribute of 0 means "not recorded".
fn port_value(value: &AttributeValue) -> Option<i64> {
    int_value(value).filter(|port| *port != 0)
}

/// `net.*` attributes shared by all protocol extractors.
#[derive(Debug, Default)]
pub(crate) struct NetworkAttributes {
    pub(crate) peer_ip: Option<String>,
    pub(crate) peer_name: Option<String>,
    pub(crate) peer_port: Option<i64>,
    pub(crate) host_name: Option<String>,
    pub(crate) host_port: Option<i64>,
}

impl NetworkAttributes {
    fn map_attribute(&mut self, key: &str, value: &AttributeValue) {
        match key {
            semconv::NET_PEER_IP => self.peer_ip = string_value(value),
            semconv::NET_PEER_NAME => self.peer_name = string_value(value),
            semconv::NET_PEER_PORT => self.peer_port = port_value(value),
            semconv::NET_HOST_NAME => self.host_name = string_value(value),
            semconv::NET_HOST_PORT => self.host_port = port_value(value),
            _ => {}
        }
    }

    /// `name-or-ip[:port]` of the remote side, favoring the name over the
    /// raw address. `None` when neither is recorded.
    pub(crate) fn peer_address(&self) -> Option<String> {
        let host = self.peer_name.as_ref().or(self.peer_ip.as_ref())?;
        Some(match self.peer_port {
            Some(port) => format!("{}:{}", host, port),
            None => host.clone(),
        })
    }
}

/// `http.*` attributes of a span.
#[derive(Debug, Default)]
pub(crate) struct HttpAttributes {
    pub(crate) method: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) target: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) scheme: Option<String>,
    pub(crate) status_code: Option<i64>,
    pub(crate) server_name: Option<String>,
    pub(crate) route: Option<String>,
    pub(crate) client_ip: Option<String>,
    pub(crate) network: NetworkAttributes,
}

impl HttpAttributes {
    fn map_attribute(&mut self, key: &str, value: &AttributeValue) {
        match key {
            semconv::HTTP_METHOD => self.method = string_value(value),
            semconv::HTTP_URL => self.url = string_value(value),
            semconv::HTTP_TARGET => self.target = string_value(value),
            semconv::HTTP_HOST => self.host = string_value(value),
            semconv::HTTP_SCHEME => self.scheme = string_value(value),
            semconv::HTTP_STATUS_CODE => self.status_code = int_value(value),
            semconv::HTTP_SERVER_NAME => self.server_name = string_value(value),
            semconv::HTTP_ROUTE => self.route = string_value(value),
            semconv::HTTP_CLIENT_IP => self.client_ip = string_value(value),
            _ => self.network.map_attribute(key, value),
        }
    }
}

/// `rpc.*` attributes of a span.
#[derive(Debug, Default)]
pub(crate) struct RpcAttributes {
    pub(crate) system: Option<String>,
    pub(crate) network: NetworkAttributes,
}

impl RpcAttributes {
    fn map_attribute(&mut self, key: &str, value: &AttributeValue) {
        match key {
            semconv::RPC_SYSTEM => self.system = string_value(value),
            _ => self.network.map_attribute(key, value),
        }
    }
}

/// `db.*` attributes of a span.
#[derive(Debug, Default)]
pub(crate) struct DatabaseAttributes {
    pub(crate) system: Option<String>,
    pub(crate) statement: Option<String>,
    pub(crate) operation: Option<String>,
    pub(crate) network: NetworkAttributes,
}

impl DatabaseAttributes {
    fn map_attribute(&mut self, key: &str, value: &AttributeValue) {
        match key {
            semconv::DB_SYSTEM => self.system = string_value(value),
            semconv::DB_STATEMENT => self.statement = string_value(value),
            semconv::DB_OPERATION => self.operation = string_value(value),
            _ => self.network.map_attribute(key, value),
        }
    }
}

/// `messaging.*` attributes of a span.
#[derive(Debug, Default)]
pub(crate) struct MessagingAttributes {
    pub(crate) system: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) network: NetworkAttributes,
}

impl MessagingAttributes {
    fn map_attribute(&mut self, key: &str, value: &AttributeValue) {
        match key {
            semconv::MESSAGING_SYSTEM => self.system = string_value(value),
            semconv::MESSAGING_URL => self.url = string_value(value),
            _ => self.network.map_attribute(key, value),
        }
    }
}

macro_rules! copy_and_extract {
    ($name:ident, $attrs:ty) => {
        pub(crate) fn $name(
            attributes: &AttributeMap,
            properties: &mut Properties,
            measurements: &mut Measurements,
        ) -> $attrs {
            let mut extracted = <$attrs>::default();
            for (key, value) in attributes {
                set_attribute_as_property_or_measurement(key, value, properties, measurements);
                extracted.map_attribute(key, value);
            }
            extracted
        }
    };
}

copy_and_extract!(copy_and_extract_http, HttpAttributes);
copy_and_extract!(copy_and_extract_rpc, RpcAttributes);
copy_and_extract!(copy_and_extract_database, DatabaseAttributes);
copy_and_extract!(copy_and_extract_messaging, MessagingAttributes);

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_attributes() -> AttributeMap {
        AttributeMap::from([
            ("http.method".to_string(), AttributeValue::String("GET".into())),
            ("http.status_code".to_string(), AttributeValue::Int(404)),
            ("enduser.id".to_string(), AttributeValue::String("jo".into())),
            ("retries".to_string(), AttributeValue::Double(1.5)),
            ("cache.hit".to_string(), AttributeValue::Bool(false)),
        ])
    }

    #[test]
    fn every_attribute_lands_in_properties_or_measurements() {
        let mut properties = Properties::new();
        let mut measurements = Measurements::new();
        let attrs =
            copy_and_extract_http(&sample_attributes(), &mut properties, &mut measurements);

        assert_eq!(attrs.method.as_deref(), Some("GET"));
        assert_eq!(attrs.status_code, Some(404));
        assert_eq!(properties["http.method"], "GET");
        assert_eq!(properties["enduser.id"], "jo");
        assert_eq!(properties["cache.hit"], "false");
        assert_eq!(measurements["http.status_code"], 404.0);
        assert_eq!(measurements["retries"], 1.5);
    }

    #[test]
    fn structured_attributes_become_string_properties() {
        let attributes = AttributeMap::from([(
            "ids".to_string(),
            AttributeValue::Array(vec![AttributeValue::Int(1), AttributeValue::Int(2)]),
        )]);
        let mut properties = Properties::new();
        let mut measurements = Measurements::new();
        copy_attributes(&attributes, &mut properties, &mut measurements);
        assert_eq!(properties["ids"], "[1,2]");
        assert!(measurements.is_empty());
    }

    #[test]
    fn peer_address_favors_name_over_ip() {
        let mut network = NetworkAttributes {
            peer_ip: Some("10.0.0.1".into()),
            peer_name: Some("db.internal".into()),
            peer_port: Some(5432),
            ..NetworkAttributes::default()
        };
        assert_eq!(network.peer_address().as_deref(), Some("db.internal:5432"));

        network.peer_name = None;
        assert_eq!(network.peer_address().as_deref(), Some("10.0.0.1:5432"));

        network.peer_port = None;
        assert_eq!(network.peer_address().as_deref(), Some("10.0.0.1"));

        network.peer_ip = None;
        assert_eq!(network.peer_address(), None);
    }

    #[test]
    fn zero_ports_count_as_absent() {
        let attributes = AttributeMap::from([
            ("net.peer.name".to_string(), AttributeValue::String("h".into())),
            ("net.peer.port".to_string(), AttributeValue::Int(0)),
        ]);
        let mut properties = Properties::new();
        let mut measurements = Measurements::new();
        let attrs = copy_and_extract_rpc(&attributes, &mut properties, &mut measurements);
        assert_eq!(attrs.network.peer_port, None);
        assert_eq!(attrs.network.peer_address().as_deref(), Some("h"));
    }

    #[test]
    fn unrelated_keys_are_not_extracted() {
        let attributes = AttributeMap::from([(
            "db.system".to_string(),
            AttributeValue::String("postgresql".into()),
        )]);
        let mut properties = Properties::new();
        let mut measurements = Measurements::new();
        let attrs = copy_and_extract_http(&attributes, &mut properties, &mut measurements);
        assert_eq!(attrs.method, None);
        assert_eq!(properties["db.system"], "postgresql");
    }
}
