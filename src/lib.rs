//! # OpenTelemetry Azure Monitor translation core
//!
//! Converts OpenTelemetry telemetry (traces, metrics and logs) into
//! Azure Application Insights envelopes and hands them to a pluggable
//! transport channel. The crate owns the translation semantics only:
//! queuing, retries and the wire protocol belong to the
//! [`TransportChannel`] implementation, and registration with a host
//! collector is a thin wrapper on top of the [`Exporter`] facade.
//!
//! Spans become `RequestData` or `RemoteDependencyData` depending on their
//! kind, log records become `MessageData` or `EventData` depending on body
//! shape and severity, and metric points expand into `MetricData`
//! envelopes. Every envelope carries operation correlation tags, the cloud
//! role derived from the resource, and has passed the contract sanitizers.
//!
//! ## Example
//!
//! ```
//! use opentelemetry_azure_monitor::models::Envelope;
//! use opentelemetry_azure_monitor::pdata::{Resource, Span, SpanKind, TraceBatch};
//! use opentelemetry_azure_monitor::{Exporter, ExporterConfig, TransportChannel};
//! use std::sync::Mutex;
//! use tokio_util::sync::CancellationToken;
//!
//! #[derive(Default)]
//! struct RecordingChannel(Mutex<Vec<Envelope>>);
//!
//! impl TransportChannel for RecordingChannel {
//!     fn send(&self, envelope: Envelope) {
//!         self.0.lock().unwrap().push(envelope);
//!     }
//! }
//!
//! let exporter = Exporter::new(
//!     ExporterConfig::new("00000000-0000-0000-0000-000000000000"),
//!     RecordingChannel::default(),
//! );
//!
//! let batch = TraceBatch::with_group(
//!     Resource::default(),
//!     None,
//!     vec![Span {
//!         name: "GET /".into(),
//!         kind: SpanKind::Server,
//!         ..Span::default()
//!     }],
//! );
//! let outcome = exporter.export_traces(&CancellationToken::new(), &batch);
//! assert_eq!(outcome.dropped, 0);
//! assert!(outcome.error.is_none());
//! ```

#![warn(missing_docs, unreachable_pub, missing_debug_implementations)]

pub mod iteration;
pub mod models;
pub mod pdata;

mod attributes;
mod channel;
mod config;
mod convert;
mod error;
mod finalize;
mod logs;
mod metrics;
mod semconv;
mod severity;
mod tags;
mod trace;

pub use channel::TransportChannel;
pub use config::ExporterConfig;
pub use error::{Error, ExportOutcome};
pub use finalize::{INSTRUMENTATION_LIBRARY_NAME, INSTRUMENTATION_LIBRARY_VERSION};

/// Azure Monitor exporter facade.
///
/// One instance serves all three signal kinds; see
/// [`export_traces`](Exporter::export_traces),
/// [`export_logs`](Exporter::export_logs) and
/// [`export_metrics`](Exporter::export_metrics). The exporter holds no
/// mutable state, so concurrent exports over the same instance are
/// independent.
#[derive(Debug, Clone)]
pub struct Exporter<C> {
    pub(crate) config: ExporterConfig,
    pub(crate) channel: C,
}

impl<C> Exporter<C> {
    /// An exporter delivering envelopes for `config` through `channel`.
    pub fn new(config: ExporterConfig, channel: C) -> Self {
        Exporter { config, channel }
    }
}
