use serde::ser::{Serialize, Serializer};

/// Defines the level of severity for a trace event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SeverityLevel {
    /// Verbose or debug level output.
    Verbose,
    /// Informational output.
    Information,
    /// A warning; the operation completed but may need attention.
    Warning,
    /// An error; the operation failed.
    Error,
    /// A critical failure.
    Critical,
}

impl SeverityLevel {
    fn as_contract_value(self) -> i32 {
        match self {
            SeverityLevel::Verbose => 0,
            SeverityLevel::Information => 1,
            SeverityLevel::Warning => 2,
            SeverityLevel::Error => 3,
            SeverityLevel::Critical => 4,
        }
    }
}

impl Serialize for SeverityLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(self.as_contract_value())
    }
}
