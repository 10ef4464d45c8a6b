use crate::models::{OPERATION_ID, OPERATION_PARENT_ID};
use crate::pdata::{SpanId, TraceId};
use std::collections::BTreeMap;

/// Operation correlation tags for a record.
///
/// Every envelope carries these: `ai.operation.id` is the 32-char trace id
/// and `ai.operation.parentId` is `|traceId.spanId`. Invalid ids render as
/// the all-zero placeholder, so records without trace context (metrics,
/// uncorrelated logs) still produce well-formed tags.
pub(crate) fn operation_tags(trace_id: TraceId, span_id: SpanId) -> BTreeMap<String, String> {
    let trace_hex = trace_id.to_hex();
    let parent_id = format!("|{}.{}", trace_hex, span_id.to_hex());

    let mut tags = BTreeMap::new();
    tags.insert(OPERATION_ID.key().to_string(), trace_hex);
    tags.insert(OPERATION_PARENT_ID.key().to_string(), parent_id);
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_carry_trace_and_span_ids() {
        let trace_id = TraceId([0xab; 16]);
        let span_id = SpanId([0xcd; 8]);
        let tags = operation_tags(trace_id, span_id);
        assert_eq!(tags["ai.operation.id"], "ab".repeat(16));
        assert_eq!(
            tags["ai.operation.parentId"],
            format!("|{}.{}", "ab".repeat(16), "cd".repeat(8))
        );
    }

    #[test]
    fn invalid_ids_render_as_zero_placeholders() {
        let tags = operation_tags(TraceId::default(), SpanId::default());
        assert_eq!(tags["ai.operation.id"], "0".repeat(32));
        assert_eq!(
            tags["ai.operation.parentId"],
            format!("|{}.{}", "0".repeat(32), "0".repeat(16))
        );
    }
}
