use crate::pdata::{AttributeValue, SpanStatus, StatusCode};
use chrono::{DateTime, SecondsFormat, Utc};
use std::time::{Duration, SystemTime};

pub(crate) fn time_to_string(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Renders a duration in the `D.HH:MM:SS.FFFFFFF` form the Application
/// Insights contracts expect. The fraction is in 100 ns ticks.
pub(crate) fn duration_to_string(duration: Duration) -> String {
    let ticks = duration.as_nanos() / 100;
    let fraction = ticks % 10_000_000;
    let seconds = ticks / 10_000_000;
    let s = seconds % 60;
    let m = seconds / 60 % 60;
    let h = seconds / 60 / 60 % 24;
    let d = seconds / 60 / 60 / 24;
    format!("{}.{:0>2}:{:0>2}:{:0>2}.{:0>7}", d, h, m, s, fraction)
}

/// Canonical string form of an attribute value. Scalars use their display
/// form; maps and arrays render as compact JSON.
pub(crate) fn value_to_string(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Bool(v) => v.to_string(),
        AttributeValue::Int(v) => v.to_string(),
        AttributeValue::Double(v) => v.to_string(),
        AttributeValue::String(v) => v.clone(),
        AttributeValue::Map(_) | AttributeValue::Array(_) => {
            serde_json::to_string(value).unwrap_or_default()
        }
    }
}

/// Default response/result code and success flag derived from the span
/// status alone. Protocol-specific fills may override both.
pub(crate) fn status_to_result_code(status: &SpanStatus) -> (String, bool) {
    match status.code {
        StatusCode::Unset | StatusCode::Ok => ("0".into(), true),
        StatusCode::Error => ((StatusCode::Error as i32).to_string(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use test_case::test_case;

    #[test_case(Duration::ZERO, "0.00:00:00.0000000" ; "zero")]
    #[test_case(Duration::from_nanos(150), "0.00:00:00.0000001" ; "sub tick rounds down")]
    #[test_case(Duration::from_micros(123), "0.00:00:00.0001230" ; "microseconds")]
    #[test_case(Duration::from_secs(5), "0.00:00:05.0000000" ; "seconds")]
    #[test_case(Duration::from_secs(90 * 60 + 7), "0.01:30:07.0000000" ; "hours and minutes")]
    #[test_case(Duration::from_secs(2 * 24 * 60 * 60 + 1), "2.00:00:01.0000000" ; "days")]
    fn durations_format_as_ticks(duration: Duration, expected: &str) {
        assert_eq!(duration_to_string(duration), expected);
    }

    #[test]
    fn times_format_as_rfc3339_nanos() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_nanos(1_500_000_001);
        assert_eq!(time_to_string(time), "1970-01-01T00:00:01.500000001Z");
    }

    #[test_case(&AttributeValue::Bool(true), "true" ; "bool")]
    #[test_case(&AttributeValue::Int(-17), "-17" ; "int")]
    #[test_case(&AttributeValue::Double(1.5), "1.5" ; "double")]
    #[test_case(&AttributeValue::String("x".into()), "x" ; "string")]
    fn scalars_use_display_form(value: &AttributeValue, expected: &str) {
        assert_eq!(value_to_string(value), expected);
    }

    #[test]
    fn structured_values_render_as_compact_json() {
        let map = AttributeValue::Map(BTreeMap::from([
            ("a".to_string(), AttributeValue::Int(1)),
            ("b".to_string(), AttributeValue::String("x".into())),
        ]));
        assert_eq!(value_to_string(&map), r#"{"a":1,"b":"x"}"#);

        let array = AttributeValue::Array(vec![
            AttributeValue::Int(1),
            AttributeValue::String("a".into()),
            AttributeValue::Bool(true),
        ]);
        assert_eq!(value_to_string(&array), r#"[1,"a",true]"#);
    }

    #[test]
    fn status_defaults_follow_the_code() {
        let ok = SpanStatus {
            code: StatusCode::Ok,
            message: String::new(),
        };
        assert_eq!(status_to_result_code(&ok), ("0".to_string(), true));

        let unset = SpanStatus::default();
        assert_eq!(status_to_result_code(&unset), ("0".to_string(), true));

        let error = SpanStatus {
            code: StatusCode::Error,
            message: "boom".into(),
        };
        assert_eq!(status_to_result_code(&error), ("2".to_string(), false));
    }
}
