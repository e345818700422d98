//! Override annotations read from an existing document

use crate::markers::Markers;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// How much of the tree a skip annotation suppresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipMode {
    /// Only the row for the path itself; descendants are still generated
    Element,
    /// The row for the path and every row below it
    WithDescendants,
}

/// Keep and skip overrides, keyed by fully-qualified path
///
/// Built once from the document as it exists before regeneration and never
/// modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSet {
    /// Verbatim row text to reuse instead of a generated row
    pub keep: BTreeMap<String, String>,
    pub skip: BTreeMap<String, SkipMode>,
}

impl OverrideSet {
    pub fn is_kept(&self, path: &str) -> bool {
        self.keep.contains_key(path)
    }

    pub fn skip_mode(&self, path: &str) -> Option<SkipMode> {
        self.skip.get(path).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.keep.is_empty() && self.skip.is_empty()
    }
}

/// Read both override sets from a document.
///
/// Absent markers simply give empty sets.
pub fn scan_overrides(document: &str, markers: &Markers) -> OverrideSet {
    let overrides = OverrideSet {
        keep: scan_keep(document, markers),
        skip: scan_skip(document, markers),
    };

    debug!(
        "Found {} rows to keep and {} paths to skip",
        overrides.keep.len(),
        overrides.skip.len()
    );

    overrides
}

/// Collect kept rows from the generated block.
///
/// The path of a row is its first bold token. Rows outside the block are not
/// considered; a later row for the same path replaces an earlier one.
pub fn scan_keep(document: &str, markers: &Markers) -> BTreeMap<String, String> {
    let Some(body) = markers.block_body(document) else {
        trace!("No generated block, nothing to keep");
        return BTreeMap::new();
    };

    markers
        .keep
        .captures_iter(body)
        .filter_map(|caps| {
            let row = caps.get(0)?.as_str();
            let path = caps.get(1)?.as_str().trim();
            trace!("Keeping row for {}", path);
            Some((path.to_string(), row.to_string()))
        })
        .collect()
}

/// Collect skip annotations from the whole document.
///
/// A path that carries both annotations resolves to
/// [`SkipMode::WithDescendants`].
pub fn scan_skip(document: &str, markers: &Markers) -> BTreeMap<String, SkipMode> {
    let mut skip = BTreeMap::new();

    for caps in markers.skip.captures_iter(document) {
        if let Some(path) = caps.get(1) {
            skip.insert(path.as_str().to_string(), SkipMode::Element);
        }
    }

    for caps in markers.skip_with_ancestors.captures_iter(document) {
        if let Some(path) = caps.get(1) {
            skip.insert(path.as_str().to_string(), SkipMode::WithDescendants);
        }
    }

    skip
}
