/// Immutable exporter configuration.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// Application Insights instrumentation key, copied verbatim into
    /// every envelope's `iKey`.
    pub instrumentation_key: String,
}

impl ExporterConfig {
    /// Configuration with the given instrumentation key.
    pub fn new(instrumentation_key: impl Into<String>) -> Self {
        ExporterConfig {
            instrumentation_key: instrumentation_key.into(),
        }
    }
}
