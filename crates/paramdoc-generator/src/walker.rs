//! Schema traversal into documentation rows

use crate::normalize::normalize_description;
use crate::{Error, Result};
use paramdoc_markdown::{OverrideSet, SkipMode};
use paramdoc_schema::SchemaNode;
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

/// Generated rows keyed by fully-qualified path
pub type RowMap = BTreeMap<String, String>;

/// One line of the parameter table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRow {
    pub full_path: String,
    pub required: bool,
    pub description: String,
}

impl DocRow {
    pub fn new(full_path: impl Into<String>, required: bool, description: impl Into<String>) -> Self {
        Self {
            full_path: full_path.into(),
            required,
            description: description.into(),
        }
    }
}

impl fmt::Display for DocRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "| **{}** | {} | {} |",
            self.full_path,
            yes_no(self.required),
            self.description
        )
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Generate the rows for a schema root and everything below it.
///
/// The root is documented as required.
pub fn generate_rows(
    root: &SchemaNode,
    root_name: &str,
    overrides: &OverrideSet,
) -> Result<RowMap> {
    walk_node(root, root_name, true, "", overrides)
}

/// Generate the rows for `node` and its non-suppressed descendants.
///
/// `parent_path` is either empty or ends with a dot. A path skipped with its
/// descendants yields nothing. A plain-skipped or kept path yields no row of
/// its own but its children are still visited.
///
/// # Errors
///
/// Returns a `MissingType` schema error for the first visited node that has
/// no `type`. Nodes inside a subtree skipped with its descendants are never
/// visited.
pub fn walk_node(
    node: &SchemaNode,
    name: &str,
    required: bool,
    parent_path: &str,
    overrides: &OverrideSet,
) -> Result<RowMap> {
    let mut rows = RowMap::new();
    walk_recursive(node, name, required, parent_path, overrides, &mut rows)?;
    Ok(rows)
}

fn walk_recursive(
    node: &SchemaNode,
    name: &str,
    required: bool,
    parent_path: &str,
    overrides: &OverrideSet,
    rows: &mut RowMap,
) -> Result<()> {
    let full_path = format!("{}{}", parent_path, name);

    let skip = overrides.skip_mode(&full_path);
    if skip == Some(SkipMode::WithDescendants) {
        trace!("Skipping {} with descendants", full_path);
        return Ok(());
    }

    if !node.is_typed() {
        return Err(Error::Schema(paramdoc_schema::Error::missing_type(full_path)));
    }

    if skip == Some(SkipMode::Element) {
        trace!("Skipping row {}", full_path);
    } else if overrides.is_kept(&full_path) {
        trace!("Keeping existing row {}", full_path);
    } else {
        let row = DocRow::new(
            full_path.as_str(),
            required,
            normalize_description(node.description(), name),
        );
        rows.insert(full_path.clone(), row.to_string());
    }

    if !node.is_object() {
        return Ok(());
    }

    // Looked up with the object's own name, not the child's.
    let children_required = node.requires(name);
    let child_prefix = format!("{}.", full_path);
    for (child_name, child) in node.children() {
        walk_recursive(
            child,
            child_name,
            children_required,
            &child_prefix,
            overrides,
            rows,
        )?;
    }

    Ok(())
}
