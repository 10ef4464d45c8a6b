use crate::pdata::Batch;
use std::collections::BTreeMap;
use std::time::SystemTime;

/// A batch of metrics.
pub type MetricBatch = Batch<Metric>;

/// A single metric with its recorded points.
#[derive(Debug, Clone, Default)]
pub struct Metric {
    /// Metric name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Unit of measurement, UCUM style.
    pub unit: String,
    /// Recorded points, keyed by data type. `None` covers both a metric
    /// whose payload is missing and one of a data type this crate does not
    /// know; either way the metric is dropped without error.
    pub data: Option<MetricPoints>,
}

/// The points of a metric, tagged by data type.
#[derive(Debug, Clone)]
pub enum MetricPoints {
    /// Instantaneous integer values.
    IntGauge {
        /// Recorded points; absent points are dropped.
        points: Vec<Option<NumberDataPoint<i64>>>,
    },
    /// Instantaneous floating point values.
    DoubleGauge {
        /// Recorded points; absent points are dropped.
        points: Vec<Option<NumberDataPoint<f64>>>,
    },
    /// Summed integer values.
    IntSum {
        /// Recorded points; absent points are dropped.
        points: Vec<Option<NumberDataPoint<i64>>>,
    },
    /// Summed floating point values.
    DoubleSum {
        /// Recorded points; absent points are dropped.
        points: Vec<Option<NumberDataPoint<f64>>>,
    },
    /// Bucketed integer distributions.
    IntHistogram {
        /// Recorded points; absent points are dropped.
        points: Vec<Option<HistogramDataPoint<i64>>>,
    },
    /// Bucketed floating point distributions.
    DoubleHistogram {
        /// Recorded points; absent points are dropped.
        points: Vec<Option<HistogramDataPoint<f64>>>,
    },
}

/// A single gauge or sum measurement.
#[derive(Debug, Clone)]
pub struct NumberDataPoint<T> {
    /// Time the value was observed.
    pub timestamp: SystemTime,
    /// Labels identifying the series.
    pub labels: BTreeMap<String, String>,
    /// The observed value.
    pub value: T,
    /// Sampled observations; carried but not exported.
    pub exemplars: Vec<Exemplar<T>>,
}

impl<T: Default> Default for NumberDataPoint<T> {
    fn default() -> Self {
        NumberDataPoint {
            timestamp: SystemTime::UNIX_EPOCH,
            labels: BTreeMap::new(),
            value: T::default(),
            exemplars: Vec::new(),
        }
    }
}

/// A single histogram measurement.
#[derive(Debug, Clone)]
pub struct HistogramDataPoint<T> {
    /// Time the distribution was observed.
    pub timestamp: SystemTime,
    /// Labels identifying the series.
    pub labels: BTreeMap<String, String>,
    /// Number of values in the distribution.
    pub count: u64,
    /// Sum of all values in the distribution.
    pub sum: T,
    /// Per-bucket counts. One more entry than `explicit_bounds`; the last
    /// bucket has no upper bound.
    pub bucket_counts: Vec<u64>,
    /// Inclusive upper bounds of the buckets.
    pub explicit_bounds: Vec<f64>,
    /// Sampled observations; carried but not exported.
    pub exemplars: Vec<Exemplar<T>>,
}

impl<T: Default> Default for HistogramDataPoint<T> {
    fn default() -> Self {
        HistogramDataPoint {
            timestamp: SystemTime::UNIX_EPOCH,
            labels: BTreeMap::new(),
            count: 0,
            sum: T::default(),
            bucket_counts: Vec::new(),
            explicit_bounds: Vec::new(),
            exemplars: Vec::new(),
        }
    }
}

/// A sampled observation attached to a point.
#[derive(Debug, Clone)]
pub struct Exemplar<T> {
    /// Time the observation was sampled.
    pub timestamp: SystemTime,
    /// The sampled value.
    pub value: T,
    /// Labels dropped from the point during aggregation.
    pub filtered_labels: BTreeMap<String, String>,
}
