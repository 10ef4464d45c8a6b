use crate::pdata::{AttributeMap, AttributeValue, Batch, SpanId, TraceId};
use std::time::SystemTime;

/// A batch of log records.
pub type LogBatch = Batch<LogRecord>;

/// A single log record.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Trace the record was emitted under; all-zero when uncorrelated.
    pub trace_id: TraceId,
    /// Span the record was emitted under; all-zero when uncorrelated.
    pub span_id: SpanId,
    /// Short event name or type.
    pub name: String,
    /// Time the event occurred.
    pub timestamp: SystemTime,
    /// Numerical severity; `Undefined` when the source did not provide one.
    pub severity_number: SeverityNumber,
    /// Severity as the source spelled it, e.g. `WARN` or `Informational`.
    pub severity_text: String,
    /// The logged value. Usually a string, but maps and other shapes are
    /// allowed.
    pub body: Option<AttributeValue>,
    /// Record attributes.
    pub attributes: AttributeMap,
    /// W3C trace flags.
    pub flags: u32,
    /// Attributes discarded upstream due to limits.
    pub dropped_attributes_count: u32,
}

impl Default for LogRecord {
    fn default() -> Self {
        LogRecord {
            trace_id: TraceId::default(),
            span_id: SpanId::default(),
            name: String::new(),
            timestamp: SystemTime::UNIX_EPOCH,
            severity_number: SeverityNumber::Undefined,
            severity_text: String::new(),
            body: None,
            attributes: AttributeMap::new(),
            flags: 0,
            dropped_attributes_count: 0,
        }
    }
}

/// Numerical log severity.
///
/// Values follow the OpenTelemetry log data model: four grades per level,
/// `Trace` (1) through `Fatal4` (24), with 0 meaning the source provided
/// no number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
#[repr(i32)]
pub enum SeverityNumber {
    Undefined = 0,
    Trace = 1,
    Trace2 = 2,
    Trace3 = 3,
    Trace4 = 4,
    Debug = 5,
    Debug2 = 6,
    Debug3 = 7,
    Debug4 = 8,
    Info = 9,
    Info2 = 10,
    Info3 = 11,
    Info4 = 12,
    Warn = 13,
    Warn2 = 14,
    Warn3 = 15,
    Warn4 = 16,
    Error = 17,
    Error2 = 18,
    Error3 = 19,
    Error4 = 20,
    Fatal = 21,
    Fatal2 = 22,
    Fatal3 = 23,
    Fatal4 = 24,
}
