//! Translation of spans into Request and RemoteDependency envelopes.

use crate::attributes::{
    copy_and_extract_database, copy_and_extract_http, copy_and_extract_messaging,
    copy_and_extract_rpc, copy_attributes,
};
use crate::channel::TransportChannel;
use crate::convert::{duration_to_string, status_to_result_code, time_to_string};
use crate::error::{Error, ExportOutcome};
use crate::finalize::finalize_envelope;
use crate::iteration::{accept, Visitor};
use crate::models::{Data, Envelope, RemoteDependencyData, RequestData, OPERATION_NAME};
use crate::pdata::{AttributeMap, InstrumentationLibrary, Resource, Span, SpanKind, TraceBatch};
use crate::semconv;
use crate::tags::operation_tags;
use crate::Exporter;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Protocol family of a span, decided by attribute presence in priority
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanType {
    Http,
    Rpc,
    Database,
    Messaging,
    Faas,
    Unknown,
}

fn classify_span(attributes: &AttributeMap) -> SpanType {
    if attributes.contains_key(semconv::HTTP_METHOD) {
        SpanType::Http
    } else if attributes.contains_key(semconv::RPC_SYSTEM) {
        SpanType::Rpc
    } else if attributes.contains_key(semconv::DB_SYSTEM) {
        SpanType::Database
    } else if attributes.contains_key(semconv::MESSAGING_SYSTEM) {
        SpanType::Messaging
    } else if attributes.contains_key(semconv::FAAS_TRIGGER) {
        SpanType::Faas
    } else {
        SpanType::Unknown
    }
}

/// Maps one span to one envelope.
///
/// Server and consumer spans become requests, everything else becomes a
/// remote dependency. FaaS spans have no Application Insights mapping and
/// fail permanently.
pub(crate) fn span_to_envelope(
    resource: &Resource,
    library: Option<&InstrumentationLibrary>,
    span: &Span,
) -> Result<Envelope, Error> {
    let span_type = classify_span(&span.attributes);
    if span_type == SpanType::Faas {
        return Err(Error::UnsupportedSpanType("faas"));
    }

    let mut tags = operation_tags(span.trace_id, span.span_id);

    let data = match span.kind {
        SpanKind::Server | SpanKind::Consumer => {
            let request = span_to_request_data(span, span_type);
            tags.insert(OPERATION_NAME.key().to_string(), request.name.clone());
            Data::Request(request)
        }
        SpanKind::Client | SpanKind::Producer | SpanKind::Internal => {
            let mut dependency = span_to_remote_dependency_data(span, span_type);
            // Internal spans are in-process no matter what the attributes
            // suggested.
            if span.kind == SpanKind::Internal {
                dependency.type_ = Some("InProc".into());
            }
            Data::RemoteDependency(dependency)
        }
    };

    let mut envelope = Envelope::new(data, time_to_string(span.start_time));
    envelope.tags = tags;
    finalize_envelope(&mut envelope, resource, library);
    Ok(envelope)
}

fn span_duration(span: &Span) -> Duration {
    span.end_time
        .duration_since(span.start_time)
        .unwrap_or_default()
}

fn span_to_request_data(span: &Span, span_type: SpanType) -> RequestData {
    let (response_code, success) = status_to_result_code(&span.status);
    let mut data = RequestData {
        id: span.span_id.to_hex(),
        name: span.name.clone(),
        duration: duration_to_string(span_duration(span)),
        response_code,
        success,
        ..RequestData::default()
    };

    match span_type {
        SpanType::Http => fill_request_data_http(span, &mut data),
        SpanType::Rpc => fill_request_data_rpc(span, &mut data),
        SpanType::Messaging => fill_request_data_messaging(span, &mut data),
        _ => copy_attributes(&span.attributes, &mut data.properties, &mut data.measurements),
    }

    data
}

fn span_to_remote_dependency_data(span: &Span, span_type: SpanType) -> RemoteDependencyData {
    let (result_code, success) = status_to_result_code(&span.status);
    let mut data = RemoteDependencyData {
        id: Some(span.span_id.to_hex()),
        name: span.name.clone(),
        duration: duration_to_string(span_duration(span)),
        result_code: Some(result_code),
        success,
        ..RemoteDependencyData::default()
    };

    match span_type {
        SpanType::Http => fill_remote_dependency_data_http(span, &mut data),
        SpanType::Rpc => fill_remote_dependency_data_rpc(span, &mut data),
        SpanType::Database => fill_remote_dependency_data_database(span, &mut data),
        SpanType::Messaging => fill_remote_dependency_data_messaging(span, &mut data),
        _ => copy_attributes(&span.attributes, &mut data.properties, &mut data.measurements),
    }

    data
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn prefix_if_necessary(value: &str, prefix: &str) -> String {
    if value.starts_with(prefix) {
        value.to_string()
    } else {
        format!("{}{}", prefix, value)
    }
}

fn formatted_http_status(status_code: i64) -> (String, bool) {
    (status_code.to_string(), (100..=399).contains(&status_code))
}

fn validated_url(url: &str) -> Option<http::Uri> {
    url.parse().ok()
}

fn fill_request_data_http(span: &Span, data: &mut RequestData) {
    let attrs =
        copy_and_extract_http(&span.attributes, &mut data.properties, &mut data.measurements);

    // A status code of 0 counts as not recorded; the span-status default
    // stands.
    if let Some(status_code) = attrs.status_code.filter(|&c| c != 0) {
        let (response_code, success) = formatted_http_status(status_code);
        data.response_code = response_code;
        data.success = success;
    }

    // Name is `{METHOD} {route template}`, falling back to the span name
    // when no route was recorded.
    let method = attrs.method.as_deref().unwrap_or_default();
    data.name = match non_empty(&attrs.route) {
        Some(route) => format!("{} {}", method, prefix_if_necessary(route, "/")),
        None => format!("{} {}", method, span.name),
    };

    // Url preference order: http.scheme + http.host + http.target, then
    // http.scheme + http.server_name + net.host.port + http.target, then
    // http.scheme + net.host.name + net.host.port + http.target, then a
    // parseable http.url.
    let target = non_empty(&attrs.target).map(|t| prefix_if_necessary(t, "/"));
    data.url = match (non_empty(&attrs.scheme), target.as_deref()) {
        (Some(scheme), Some(target)) => {
            if let Some(host) = non_empty(&attrs.host) {
                Some(format!("{}://{}{}", scheme, host, target))
            } else if let (Some(server_name), Some(port)) =
                (non_empty(&attrs.server_name), attrs.network.host_port)
            {
                Some(format!("{}://{}:{}{}", scheme, server_name, port, target))
            } else if let (Some(host_name), Some(port)) =
                (non_empty(&attrs.network.host_name), attrs.network.host_port)
            {
                Some(format!("{}://{}:{}{}", scheme, host_name, port, target))
            } else {
                raw_url(&attrs.url)
            }
        }
        _ => raw_url(&attrs.url),
    };

    data.source = non_empty(&attrs.client_ip)
        .or(non_empty(&attrs.network.peer_ip))
        .map(str::to_string);
}

fn raw_url(url: &Option<String>) -> Option<String> {
    non_empty(url)
        .filter(|u| validated_url(u).is_some())
        .map(str::to_string)
}

fn fill_remote_dependency_data_http(span: &Span, data: &mut RemoteDependencyData) {
    let attrs =
        copy_and_extract_http(&span.attributes, &mut data.properties, &mut data.measurements);

    data.type_ = Some("HTTP".into());
    if let Some(status_code) = attrs.status_code.filter(|&c| c != 0) {
        let (result_code, success) = formatted_http_status(status_code);
        data.result_code = Some(result_code);
        data.success = success;
    }

    let method = attrs.method.as_deref().unwrap_or_default();
    data.name = match non_empty(&attrs.route) {
        Some(route) => format!("{} {}", method, route),
        None => method.to_string(),
    };

    // Data/Target preference order: a parseable http.url, then http.scheme
    // + http.host + http.target, then http.scheme + net.peer.name +
    // net.peer.port + http.target, then the same with net.peer.ip.
    let target = non_empty(&attrs.target).map(|t| prefix_if_necessary(t, "/"));
    if let Some(url) = non_empty(&attrs.url) {
        if let Some(parsed) = validated_url(url) {
            data.data = Some(url.to_string());
            data.target = parsed.authority().map(|a| a.as_str().to_string());
        }
    } else if let (Some(scheme), Some(target)) = (non_empty(&attrs.scheme), target.as_deref()) {
        if let Some(host) = non_empty(&attrs.host) {
            data.data = Some(format!("{}://{}{}", scheme, host, target));
            data.target = Some(host.to_string());
        } else if let (Some(peer_name), Some(port)) =
            (non_empty(&attrs.network.peer_name), attrs.network.peer_port)
        {
            data.data = Some(format!("{}://{}:{}{}", scheme, peer_name, port, target));
            data.target = Some(format!("{}:{}", peer_name, port));
        } else if let (Some(peer_ip), Some(port)) =
            (non_empty(&attrs.network.peer_ip), attrs.network.peer_port)
        {
            data.data = Some(format!("{}://{}:{}{}", scheme, peer_ip, port, target));
            data.target = Some(format!("{}:{}", peer_ip, port));
        }
    }
}

fn fill_request_data_rpc(span: &Span, data: &mut RequestData) {
    let attrs =
        copy_and_extract_rpc(&span.attributes, &mut data.properties, &mut data.measurements);

    data.name = format!(
        "{} {}",
        attrs.system.as_deref().unwrap_or_default(),
        data.name
    );
    data.url = Some(data.name.clone());
    data.source = attrs.network.peer_address();
}

fn fill_remote_dependency_data_rpc(span: &Span, data: &mut RemoteDependencyData) {
    let attrs =
        copy_and_extract_rpc(&span.attributes, &mut data.properties, &mut data.measurements);

    data.data = Some(data.name.clone());
    data.type_ = attrs.system.clone();
    data.target = attrs.network.peer_address();
}

fn fill_remote_dependency_data_database(span: &Span, data: &mut RemoteDependencyData) {
    let attrs =
        copy_and_extract_database(&span.attributes, &mut data.properties, &mut data.measurements);

    data.type_ = attrs.system.clone();
    data.data = non_empty(&attrs.statement)
        .or(non_empty(&attrs.operation))
        .map(str::to_string);
    data.target = attrs.network.peer_address();
}

fn fill_request_data_messaging(span: &Span, data: &mut RequestData) {
    let attrs =
        copy_and_extract_messaging(&span.attributes, &mut data.properties, &mut data.measurements);

    data.source = non_empty(&attrs.url)
        .map(str::to_string)
        .or_else(|| attrs.network.peer_address());
}

fn fill_remote_dependency_data_messaging(span: &Span, data: &mut RemoteDependencyData) {
    let attrs =
        copy_and_extract_messaging(&span.attributes, &mut data.properties, &mut data.measurements);

    data.data = non_empty(&attrs.url).map(str::to_string);
    data.type_ = attrs.system.clone();
    data.target = non_empty(&attrs.url)
        .map(str::to_string)
        .or_else(|| attrs.network.peer_address());
}

struct TraceVisitor<'a, C> {
    exporter: &'a Exporter<C>,
    processed: usize,
    error: Option<Error>,
}

impl<C: TransportChannel> Visitor<Span> for TraceVisitor<'_, C> {
    fn visit(
        &mut self,
        resource: &Resource,
        library: Option<&InstrumentationLibrary>,
        span: &Span,
    ) -> bool {
        let mut envelope = match span_to_envelope(resource, library, span) {
            Ok(envelope) => envelope,
            Err(error) => {
                self.error = Some(error);
                return false;
            }
        };

        envelope.i_key = Some(self.exporter.config.instrumentation_key.clone());
        self.exporter.channel.send(envelope);
        self.processed += 1;
        true
    }
}

impl<C: TransportChannel> Exporter<C> {
    /// Exports a batch of spans.
    ///
    /// Returns how many spans were dropped and, when a span failed to
    /// translate, the (permanent) error that short-circuited the batch.
    /// Sends are fire-and-forget; a cancelled token drops the whole batch
    /// at entry.
    pub fn export_traces(&self, cancel: &CancellationToken, batch: &TraceBatch) -> ExportOutcome {
        let record_count = batch.record_count();
        if record_count == 0 {
            return ExportOutcome::default();
        }
        if cancel.is_cancelled() {
            return ExportOutcome {
                dropped: record_count,
                error: Some(Error::Cancelled),
            };
        }

        let mut visitor = TraceVisitor {
            exporter: self,
            processed: 0,
            error: None,
        };
        accept(batch, &mut visitor);
        ExportOutcome {
            dropped: record_count - visitor.processed,
            error: visitor.error,
        }
    }
}
