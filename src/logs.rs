//! Translation of log records into Message and Event envelopes.

use crate::attributes::{copy_attributes, set_attribute_as_property_or_measurement};
use crate::channel::TransportChannel;
use crate::convert::{time_to_string, value_to_string};
use crate::error::{Error, ExportOutcome};
use crate::finalize::finalize_envelope;
use crate::iteration::{accept, Visitor};
use crate::models::{Data, Envelope, EventData, MessageData};
use crate::pdata::{AttributeValue, InstrumentationLibrary, LogBatch, LogRecord, Resource};
use crate::severity::severity_level;
use crate::tags::operation_tags;
use crate::Exporter;
use tokio_util::sync::CancellationToken;

/// Reserved property holding the stringified body of a non-map,
/// non-string log.
const MESSAGE_PROPERTY: &str = "Message";
/// Reserved property holding the severity as the source spelled it.
const SEVERITY_TEXT_PROPERTY: &str = "SeverityText";
/// Reserved property holding the numerical severity.
const SEVERITY_NUMBER_PROPERTY: &str = "SeverityNumber";

/// Maps one log record to one envelope.
///
/// A record with a string body and a recognizable severity becomes a trace
/// message; anything else becomes a structured event that preserves the
/// severity in properties and flattens map bodies.
pub(crate) fn log_to_envelope(
    resource: &Resource,
    library: Option<&InstrumentationLibrary>,
    log: &LogRecord,
) -> Envelope {
    let severity = severity_level(log);

    let data = match (&log.body, severity) {
        (Some(AttributeValue::String(body)), Some(level)) => {
            let mut message = MessageData {
                message: body.clone(),
                severity_level: Some(level),
                ..MessageData::default()
            };
            copy_attributes(
                &log.attributes,
                &mut message.properties,
                &mut message.measurements,
            );
            Data::Message(message)
        }
        _ => {
            let mut event = EventData {
                name: log.name.clone(),
                ..EventData::default()
            };
            copy_attributes(
                &log.attributes,
                &mut event.properties,
                &mut event.measurements,
            );

            match &log.body {
                Some(AttributeValue::Map(entries)) => {
                    for (key, value) in entries {
                        set_attribute_as_property_or_measurement(
                            key,
                            value,
                            &mut event.properties,
                            &mut event.measurements,
                        );
                    }
                }
                Some(body) => {
                    event
                        .properties
                        .insert(MESSAGE_PROPERTY.to_string(), value_to_string(body));
                }
                None => {}
            }

            event.properties.insert(
                SEVERITY_TEXT_PROPERTY.to_string(),
                log.severity_text.clone(),
            );
            event.properties.insert(
                SEVERITY_NUMBER_PROPERTY.to_string(),
                (log.severity_number as i32).to_string(),
            );
            Data::Event(event)
        }
    };

    let mut envelope = Envelope::new(data, time_to_string(log.timestamp));
    envelope.tags = operation_tags(log.trace_id, log.span_id);
    finalize_envelope(&mut envelope, resource, library);
    envelope
}

struct LogVisitor<'a, C> {
    exporter: &'a Exporter<C>,
    processed: usize,
    error: Option<Error>,
}

impl<C: TransportChannel> Visitor<LogRecord> for LogVisitor<'_, C> {
    fn visit(
        &mut self,
        resource: &Resource,
        library: Option<&InstrumentationLibrary>,
        log: &LogRecord,
    ) -> bool {
        let mut envelope = log_to_envelope(resource, library, log);
        envelope.i_key = Some(self.exporter.config.instrumentation_key.clone());
        self.exporter.channel.send(envelope);
        self.processed += 1;
        true
    }
}

impl<C: TransportChannel> Exporter<C> {
    /// Exports a batch of log records.
    ///
    /// Log translation is total, so the outcome only reports records that
    /// were absent from the batch. Sends are fire-and-forget; a cancelled
    /// token drops the whole batch at entry.
    pub fn export_logs(&self, cancel: &CancellationToken, batch: &LogBatch) -> ExportOutcome {
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

        let mut visitor = LogVisitor {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeverityLevel;
    use crate::pdata::{SeverityNumber, SpanId, TraceId};
    use std::collections::BTreeMap;
    use std::time::{Duration, SystemTime};

    fn log() -> LogRecord {
        LogRecord {
            trace_id: TraceId([3; 16]),
            span_id: SpanId([4; 8]),
            name: "app.event".into(),
            timestamp: SystemTime::UNIX_EPOCH + Duration::from_secs(12),
            ..LogRecord::default()
        }
    }

    fn translate(log: &LogRecord) -> Envelope {
        log_to_envelope(&Resource::default(), None, log)
    }

    fn message_data(envelope: &Envelope) -> &MessageData {
        match &envelope.data {
            Data::Message(data) => data,
            other => panic!("expected MessageData, got {:?}", other),
        }
    }

    fn event_data(envelope: &Envelope) -> &EventData {
        match &envelope.data {
            Data::Event(data) => data,
            other => panic!("expected EventData, got {:?}", other),
        }
    }

    #[test]
    fn string_body_with_known_severity_becomes_a_message() {
        let mut record = log();
        record.severity_number = SeverityNumber::Info2;
        record.body = Some(AttributeValue::String("hello".into()));
        let envelope = translate(&record);

        assert_eq!(envelope.name, "Microsoft.ApplicationInsights.Message");
        let data = message_data(&envelope);
        assert_eq!(data.message, "hello");
        assert_eq!(data.severity_level, Some(SeverityLevel::Information));
    }

    #[test]
    fn string_body_without_severity_becomes_an_event() {
        let mut record = log();
        record.body = Some(AttributeValue::String("hello".into()));
        let envelope = translate(&record);

        assert_eq!(envelope.name, "Microsoft.ApplicationInsights.Event");
        let data = event_data(&envelope);
        assert_eq!(data.name, "app.event");
        assert_eq!(data.properties["Message"], "hello");
    }

    #[test]
    fn severity_properties_are_always_present_on_events() {
        let envelope = translate(&log());
        let data = event_data(&envelope);
        assert_eq!(data.properties["SeverityText"], "");
        assert_eq!(data.properties["SeverityNumber"], "0");

        let mut record = log();
        record.severity_number = SeverityNumber::Warn;
        record.severity_text = "WARN".into();
        record.body = Some(AttributeValue::Int(42));
        let envelope = translate(&record);
        let data = event_data(&envelope);
        assert_eq!(data.properties["SeverityText"], "WARN");
        assert_eq!(data.properties["SeverityNumber"], "13");
        assert_eq!(data.properties["Message"], "42");
    }

    #[test]
    fn map_body_flattens_into_properties_and_measurements() {
        let mut record = log();
        record.body = Some(AttributeValue::Map(BTreeMap::from([
            ("user".to_string(), AttributeValue::String("jo".into())),
            ("attempt".to_string(), AttributeValue::Int(2)),
            ("ok".to_string(), AttributeValue::Bool(true)),
        ])));
        let envelope = translate(&record);
        let data = event_data(&envelope);
        assert_eq!(data.properties["user"], "jo");
        assert_eq!(data.properties["ok"], "true");
        assert_eq!(data.measurements["attempt"], 2.0);
        assert!(!data.properties.contains_key("Message"));
    }

    #[test]
    fn array_body_is_stored_in_canonical_form() {
        let mut record = log();
        record.body = Some(AttributeValue::Array(vec![
            AttributeValue::Int(1),
            AttributeValue::String("a".into()),
        ]));
        let envelope = translate(&record);
        assert_eq!(event_data(&envelope).properties["Message"], r#"[1,"a"]"#);
    }

    #[test]
    fn log_attributes_are_copied_for_both_payloads() {
        let mut record = log();
        record.severity_number = SeverityNumber::Error;
        record.body = Some(AttributeValue::String("failed".into()));
        record.attributes.insert(
            "code.function".to_string(),
            AttributeValue::String("handle".into()),
        );
        record
            .attributes
            .insert("retry.count".to_string(), AttributeValue::Int(3));
        let envelope = translate(&record);
        let data = message_data(&envelope);
        assert_eq!(data.properties["code.function"], "handle");
        assert_eq!(data.measurements["retry.count"], 3.0);
    }

    #[test]
    fn operation_tags_come_from_the_record_context() {
        let envelope = translate(&log());
        assert_eq!(envelope.tags["ai.operation.id"], "03".repeat(16));
        assert_eq!(
            envelope.tags["ai.operation.parentId"],
            format!("|{}.{}", "03".repeat(16), "04".repeat(8))
        );
    }

    #[test]
    fn uncorrelated_logs_get_zero_placeholders() {
        let envelope = translate(&LogRecord::default());
        assert_eq!(envelope.tags["ai.operation.id"], "0".repeat(32));
        assert_eq!(
            envelope.tags["ai.operation.parentId"],
            format!("|{}.{}", "0".repeat(32), "0".repeat(16))
        );
    }

    #[test]
    fn timestamp_formats_with_nanoseconds() {
        let envelope = translate(&log());
        assert_eq!(envelope.time, "1970-01-01T00:00:12.000000000Z");
    }
}
