//! Deterministic table assembly

use crate::walker::RowMap;
use std::collections::BTreeMap;

/// Merge generated and kept rows into the table body.
///
/// Kept rows replace generated rows at the same path. Rows are ordered by
/// path in ascending byte order, which puts a parent directly before its
/// children (`spec.output` before `spec.output.otlp`), and joined with
/// newlines.
pub fn render_table(mut rows: RowMap, keep: &BTreeMap<String, String>) -> String {
    rows.extend(keep.iter().map(|(path, row)| (path.clone(), row.clone())));

    // BTreeMap iterates in key order; that order is the table order.
    rows.into_values().collect::<Vec<_>>().join("\n")
}
