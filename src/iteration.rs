//! Iteration over the `Resource` → `InstrumentationLibrary` → record
//! hierarchy shared by all signal kinds.

use crate::pdata::{Batch, InstrumentationLibrary, Resource};

/// Callback invoked for each record of a batch.
pub trait Visitor<R> {
    /// Called once per present record. Returning `false` stops the whole
    /// traversal immediately.
    fn visit(
        &mut self,
        resource: &Resource,
        library: Option<&InstrumentationLibrary>,
        record: &R,
    ) -> bool;
}

/// Walks `batch` depth-first in declaration order and hands every present
/// record to `visitor`.
///
/// Skip rules: an absent element at any level is skipped silently; a group
/// without a resource is skipped entirely (the resource is required, the
/// instrumentation library is not); an empty record list never reaches the
/// visitor.
pub fn accept<R, V: Visitor<R>>(batch: &Batch<R>, visitor: &mut V) {
    for resource_records in batch.resource_records.iter().flatten() {
        let Some(resource) = resource_records.resource.as_ref() else {
            continue;
        };

        for library_records in resource_records.library_records.iter().flatten() {
            if library_records.records.is_empty() {
                continue;
            }

            for record in library_records.records.iter().flatten() {
                if !visitor.visit(resource, library_records.library.as_ref(), record) {
                    return;
                }
            }
        }
    }
}
