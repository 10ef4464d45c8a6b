//! Translation of metrics into Metric envelopes.

use crate::channel::TransportChannel;
use crate::convert::time_to_string;
use crate::error::{Error, ExportOutcome};
use crate::finalize::finalize_envelope;
use crate::iteration::{accept, Visitor};
use crate::models::{Data, DataPoint, DataPointType, Envelope, MetricData};
use crate::pdata::{
    HistogramDataPoint, InstrumentationLibrary, Metric, MetricBatch, MetricPoints,
    NumberDataPoint, Resource, SpanId, TraceId,
};
use crate::tags::operation_tags;
use crate::Exporter;
use std::collections::BTreeMap;
use std::time::SystemTime;
use tokio_util::sync::CancellationToken;

/// Property carrying a histogram bucket's inclusive upper bound. The final
/// overflow bucket has no bound and no such property.
const UPPER_BOUND_PROPERTY: &str = "upper_bound";

/// Maps one metric to zero or more envelopes.
///
/// Gauges and sums expand to one envelope per point. Histograms expand per
/// point to a sum envelope, a `_count` envelope and one `_bucket` envelope
/// per bucket. A metric without usable points produces nothing; that is a
/// silent drop, not an error.
pub(crate) fn metric_to_envelopes(
    resource: &Resource,
    library: Option<&InstrumentationLibrary>,
    metric: &Metric,
) -> Vec<Envelope> {
    let Some(points) = metric.data.as_ref() else {
        return Vec::new();
    };

    let mut envelopes = Vec::new();
    match points {
        MetricPoints::IntGauge { points } => push_number_envelopes(metric, points, &mut envelopes),
        MetricPoints::DoubleGauge { points } => {
            push_number_envelopes(metric, points, &mut envelopes)
        }
        MetricPoints::IntSum { points } => push_number_envelopes(metric, points, &mut envelopes),
        MetricPoints::DoubleSum { points } => push_number_envelopes(metric, points, &mut envelopes),
        MetricPoints::IntHistogram { points } => {
            push_histogram_envelopes(metric, points, &mut envelopes)
        }
        MetricPoints::DoubleHistogram { points } => {
            push_histogram_envelopes(metric, points, &mut envelopes)
        }
    }

    for envelope in &mut envelopes {
        finalize_envelope(envelope, resource, library);
    }

    envelopes
}

trait IntoF64: Copy {
    fn into_f64(self) -> f64;
}

impl IntoF64 for i64 {
    fn into_f64(self) -> f64 {
        self as f64
    }
}

impl IntoF64 for f64 {
    fn into_f64(self) -> f64 {
        self
    }
}

fn metric_envelope(
    name: &str,
    value: f64,
    timestamp: SystemTime,
    labels: &BTreeMap<String, String>,
) -> Envelope {
    let data = MetricData {
        ver: 2,
        metrics: vec![DataPoint {
            ns: None,
            name: name.to_string(),
            kind: Some(DataPointType::Measurement),
            value,
        }],
        properties: labels.clone(),
    };
    let mut envelope = Envelope::new(Data::Metric(data), time_to_string(timestamp));
    // Metrics have no trace context; the placeholder ids keep the
    // correlation tags well-formed.
    envelope.tags = operation_tags(TraceId::default(), SpanId::default());
    envelope
}

fn push_number_envelopes<T: IntoF64>(
    metric: &Metric,
    points: &[Option<NumberDataPoint<T>>],
    envelopes: &mut Vec<Envelope>,
) {
    for point in points.iter().flatten() {
        envelopes.push(metric_envelope(
            &metric.name,
            point.value.into_f64(),
            point.timestamp,
            &point.labels,
        ));
    }
}

fn push_histogram_envelopes<T: IntoF64>(
    metric: &Metric,
    points: &[Option<HistogramDataPoint<T>>],
    envelopes: &mut Vec<Envelope>,
) {
    let count_name = format!("{}_count", metric.name);
    let bucket_name = format!("{}_bucket", metric.name);

    for point in points.iter().flatten() {
        envelopes.push(metric_envelope(
            &metric.name,
            point.sum.into_f64(),
            point.timestamp,
            &point.labels,
        ));
        envelopes.push(metric_envelope(
            &count_name,
            point.count as f64,
            point.timestamp,
            &point.labels,
        ));

        for (bucket, bucket_count) in point.bucket_counts.iter().enumerate() {
            let mut envelope = metric_envelope(
                &bucket_name,
                *bucket_count as f64,
                point.timestamp,
                &point.labels,
            );
            if let Some(bound) = point.explicit_bounds.get(bucket) {
                envelope
                    .data
                    .properties_mut()
                    .insert(UPPER_BOUND_PROPERTY.to_string(), bound.to_string());
            }
            envelopes.push(envelope);
        }
    }
}

struct MetricVisitor<'a, C> {
    exporter: &'a Exporter<C>,
    processed: usize,
    error: Option<Error>,
}

impl<C: TransportChannel> Visitor<Metric> for MetricVisitor<'_, C> {
    fn visit(
        &mut self,
        resource: &Resource,
        library: Option<&InstrumentationLibrary>,
        metric: &Metric,
    ) -> bool {
        let envelopes = metric_to_envelopes(resource, library, metric);
        if envelopes.is_empty() {
            // Unknown shape or no points; the metric stays dropped.
            return true;
        }

        for mut envelope in envelopes {
            envelope.i_key = Some(self.exporter.config.instrumentation_key.clone());
            self.exporter.channel.send(envelope);
        }
        self.processed += 1;
        true
    }
}

impl<C: TransportChannel> Exporter<C> {
    /// Exports a batch of metrics.
    ///
    /// A metric counts as processed when it produced at least one
    /// envelope; metrics with unknown shapes or no points show up in the
    /// dropped count without raising an error. Sends are fire-and-forget;
    /// a cancelled token drops the whole batch at entry.
    pub fn export_metrics(&self, cancel: &CancellationToken, batch: &MetricBatch) -> ExportOutcome {
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

        let mut visitor = MetricVisitor {
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
