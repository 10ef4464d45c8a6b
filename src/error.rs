/// Errors surfaced by the exporter facades.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The record shape is recognized but has no Application Insights
    /// mapping. Permanent: retrying the same batch cannot succeed.
    #[error("unsupported span type: {0}")]
    UnsupportedSpanType(&'static str),

    /// The export was cancelled before any envelope was sent.
    #[error("export cancelled")]
    Cancelled,
}

impl Error {
    /// Whether the host should give up on the batch instead of retrying.
    pub fn is_permanent(&self) -> bool {
        match self {
            Error::UnsupportedSpanType(_) => true,
            Error::Cancelled => false,
        }
    }
}

/// Result of exporting one batch.
///
/// `dropped` is the number of input records that did not make it onto the
/// transport; `error` is set when at least one record hit a translation
/// failure rather than a silent drop.
#[derive(Debug, Default)]
pub struct ExportOutcome {
    /// Records that were not handed to the transport.
    pub dropped: usize,
    /// The failure that stopped the batch, if any.
    pub error: Option<Error>,
}
