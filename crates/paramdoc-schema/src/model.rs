//! Schema tree model

use std::collections::{BTreeMap, BTreeSet};

/// Type name that marks a node as having named child fields.
pub const OBJECT_TYPE: &str = "object";

/// A node in the resource schema tree
///
/// Children are kept in a `BTreeMap`, so iterating them is always in
/// ascending name order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// Any non-object field (string, integer, boolean, array, ...)
    Leaf {
        kind: String,
        description: Option<String>,
    },

    /// Object field with named children
    Object {
        description: Option<String>,
        children: BTreeMap<String, SchemaNode>,
        /// Names of the children this object marks as required
        required: BTreeSet<String>,
    },

    /// Field without a `type`; rejected only when a walk reaches it
    Untyped { description: Option<String> },
}

impl SchemaNode {
    /// Create a leaf node of the given type
    pub fn leaf(kind: impl Into<String>) -> Self {
        Self::Leaf {
            kind: kind.into(),
            description: None,
        }
    }

    /// Create a node that carries no type
    pub fn untyped() -> Self {
        Self::Untyped { description: None }
    }

    /// Create an object node without children
    pub fn object() -> Self {
        Self::Object {
            description: None,
            children: BTreeMap::new(),
            required: BTreeSet::new(),
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            Self::Leaf { description, .. }
            | Self::Object { description, .. }
            | Self::Untyped { description } => {
                *description = Some(text.into());
            }
        }
        self
    }

    /// Add a child. Has no effect on leaves.
    #[must_use]
    pub fn with_child(mut self, name: impl Into<String>, child: SchemaNode) -> Self {
        if let Self::Object { children, .. } = &mut self {
            children.insert(name.into(), child);
        }
        self
    }

    /// Mark a name as required. Has no effect on leaves.
    #[must_use]
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        if let Self::Object { required, .. } = &mut self {
            required.insert(name.into());
        }
        self
    }

    /// Schema type name, `"object"` for objects and empty for untyped nodes
    pub fn kind(&self) -> &str {
        match self {
            Self::Leaf { kind, .. } => kind,
            Self::Object { .. } => OBJECT_TYPE,
            Self::Untyped { .. } => "",
        }
    }

    pub fn is_typed(&self) -> bool {
        !matches!(self, Self::Untyped { .. })
    }

    /// Description text, empty when the schema has none
    pub fn description(&self) -> &str {
        match self {
            Self::Leaf { description, .. }
            | Self::Object { description, .. }
            | Self::Untyped { description } => description.as_deref().unwrap_or_default(),
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object { .. })
    }

    /// Iterate children in ascending name order. Leaves have none.
    pub fn children(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        let children = match self {
            Self::Object { children, .. } => Some(children),
            Self::Leaf { .. } | Self::Untyped { .. } => None,
        };
        children
            .into_iter()
            .flat_map(|map| map.iter().map(|(name, child)| (name.as_str(), child)))
    }

    /// Check whether this object lists `name` in its required set
    pub fn requires(&self, name: &str) -> bool {
        match self {
            Self::Object { required, .. } => required.contains(name),
            Self::Leaf { .. } | Self::Untyped { .. } => false,
        }
    }

    /// Count this node and all of its descendants
    pub fn node_count(&self) -> usize {
        1 + self.children().map(|(_, child)| child.node_count()).sum::<usize>()
    }
}
