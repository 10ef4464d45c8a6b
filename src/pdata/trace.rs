use crate::pdata::{AttributeMap, Batch, SpanId, TraceId};
use std::time::SystemTime;

/// A batch of spans.
pub type TraceBatch = Batch<Span>;

/// A single finished span.
#[derive(Debug, Clone)]
pub struct Span {
    /// Trace this span belongs to; all-zero when unsampled or detached.
    pub trace_id: TraceId,
    /// Identifier of this span within the trace.
    pub span_id: SpanId,
    /// Operation name.
    pub name: String,
    /// Role of the span in the request flow.
    pub kind: SpanKind,
    /// Start of the operation.
    pub start_time: SystemTime,
    /// End of the operation. An end before the start is treated as a
    /// zero-length span.
    pub end_time: SystemTime,
    /// Final status reported by the instrumentation.
    pub status: SpanStatus,
    /// Span attributes.
    pub attributes: AttributeMap,
}

impl Default for Span {
    fn default() -> Self {
        Span {
            trace_id: TraceId::default(),
            span_id: SpanId::default(),
            name: String::new(),
            kind: SpanKind::Internal,
            start_time: SystemTime::UNIX_EPOCH,
            end_time: SystemTime::UNIX_EPOCH,
            status: SpanStatus::default(),
            attributes: AttributeMap::new(),
        }
    }
}

/// Role of a span in the request flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Handles a synchronous request from a remote caller.
    Server,
    /// Issues a synchronous request to a remote service.
    Client,
    /// Publishes a message to a broker.
    Producer,
    /// Receives a message from a broker.
    Consumer,
    /// Does not cross a process boundary.
    Internal,
}

/// Span status code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusCode {
    /// No status was recorded.
    #[default]
    Unset = 0,
    /// The operation completed successfully.
    Ok = 1,
    /// The operation failed.
    Error = 2,
}

/// Final status of a span.
#[derive(Debug, Clone, Default)]
pub struct SpanStatus {
    /// Status code.
    pub code: StatusCode,
    /// Developer-facing description; only meaningful for errors.
    pub message: String,
}
