//! Classification of log severities into Application Insights levels.

use crate::models::SeverityLevel;
use crate::pdata::{LogRecord, SeverityNumber};
use once_cell::sync::Lazy;
use regex::Regex;

// Spellings various logging frameworks use, matched case-insensitively
// with an optional 2-4 grade suffix (e.g. "WARN3").
static SEVERITY_TEXT_PATTERNS: Lazy<Vec<(SeverityLevel, Regex)>> = Lazy::new(|| {
    [
        (
            SeverityLevel::Verbose,
            r"(?i)^(trace|finest|debug|verbose|finer|fine|config)[2-4]?$",
        ),
        (
            SeverityLevel::Information,
            r"(?i)^(info|informational|information|notice)[2-4]?$",
        ),
        (SeverityLevel::Warning, r"(?i)^(warn|warning)[2-4]?$"),
        (SeverityLevel::Error, r"(?i)^(error|severe)[2-4]?$"),
        (
            SeverityLevel::Critical,
            r"(?i)^(critical|dpanic|emergency|panic|fatal|alert)[2-4]?$",
        ),
    ]
    .into_iter()
    .map(|(level, pattern)| {
        (
            level,
            Regex::new(pattern).expect("severity patterns are valid"),
        )
    })
    .collect()
});

/// The Application Insights severity of a log record, or `None` when
/// neither the severity number nor the severity text identifies one.
pub(crate) fn severity_level(log: &LogRecord) -> Option<SeverityLevel> {
    if log.severity_number != SeverityNumber::Undefined {
        return Some(severity_level_from_number(log.severity_number));
    }
    severity_level_from_text(&log.severity_text)
}

fn severity_level_from_number(number: SeverityNumber) -> SeverityLevel {
    if number <= SeverityNumber::Debug4 {
        SeverityLevel::Verbose
    } else if number <= SeverityNumber::Info4 {
        SeverityLevel::Information
    } else if number <= SeverityNumber::Warn4 {
        SeverityLevel::Warning
    } else if number <= SeverityNumber::Error4 {
        SeverityLevel::Error
    } else {
        SeverityLevel::Critical
    }
}

fn severity_level_from_text(text: &str) -> Option<SeverityLevel> {
    SEVERITY_TEXT_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(level, _)| *level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(SeverityNumber::Trace, SeverityLevel::Verbose ; "trace")]
    #[test_case(SeverityNumber::Debug4, SeverityLevel::Verbose ; "debug4")]
    #[test_case(SeverityNumber::Info, SeverityLevel::Information ; "info")]
    #[test_case(SeverityNumber::Info2, SeverityLevel::Information ; "info2")]
    #[test_case(SeverityNumber::Warn4, SeverityLevel::Warning ; "warn4")]
    #[test_case(SeverityNumber::Error, SeverityLevel::Error ; "error")]
    #[test_case(SeverityNumber::Error4, SeverityLevel::Error ; "error4")]
    #[test_case(SeverityNumber::Fatal, SeverityLevel::Critical ; "fatal")]
    #[test_case(SeverityNumber::Fatal4, SeverityLevel::Critical ; "fatal4")]
    fn numbers_bucket_by_range(number: SeverityNumber, expected: SeverityLevel) {
        assert_eq!(severity_level_from_number(number), expected);
    }

    #[test_case("TRACE", Some(SeverityLevel::Verbose) ; "upper trace")]
    #[test_case("finest", Some(SeverityLevel::Verbose) ; "finest")]
    #[test_case("Config", Some(SeverityLevel::Verbose) ; "config")]
    #[test_case("debug3", Some(SeverityLevel::Verbose) ; "suffixed debug")]
    #[test_case("Informational", Some(SeverityLevel::Information) ; "informational")]
    #[test_case("notice", Some(SeverityLevel::Information) ; "notice")]
    #[test_case("WARN2", Some(SeverityLevel::Warning) ; "suffixed warn")]
    #[test_case("severe", Some(SeverityLevel::Error) ; "severe")]
    #[test_case("dpanic", Some(SeverityLevel::Critical) ; "dpanic")]
    #[test_case("FATAL4", Some(SeverityLevel::Critical) ; "suffixed fatal")]
    #[test_case("warn5", None ; "suffix out of range")]
    #[test_case("", None ; "empty")]
    #[test_case("loud", None ; "unknown word")]
    fn texts_match_the_fixed_patterns(text: &str, expected: Option<SeverityLevel>) {
        assert_eq!(severity_level_from_text(text), expected);
    }

    #[test]
    fn number_wins_over_text() {
        let log = LogRecord {
            severity_number: SeverityNumber::Error,
            severity_text: "DEBUG".into(),
            ..LogRecord::default()
        };
        assert_eq!(severity_level(&log), Some(SeverityLevel::Error));
    }

    #[test]
    fn undefined_number_falls_back_to_text() {
        let log = LogRecord {
            severity_text: "DEBUG".into(),
            ..LogRecord::default()
        };
        assert_eq!(severity_level(&log), Some(SeverityLevel::Verbose));
    }
}
