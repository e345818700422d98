//! CustomResourceDefinition loader
//!
//! Reads a CRD from YAML or JSON and exposes the `spec` schema of selected
//! versions as typed [`SchemaNode`] trees. Fields of the CRD that do not lie on
//! the path `spec.versions[*].schema.openAPIV3Schema.properties.spec` are
//! ignored.

use crate::model::{OBJECT_TYPE, SchemaNode};
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, trace};

/// Name of the property that holds the documented resource spec.
pub const SPEC_PROPERTY: &str = "spec";

/// Serializable CRD format, reduced to what the loader reads
#[derive(Debug, Deserialize)]
struct CrdFile {
    spec: CrdSpecFile,
}

#[derive(Debug, Deserialize)]
struct CrdSpecFile {
    #[serde(default)]
    versions: Vec<VersionFile>,
}

#[derive(Debug, Deserialize)]
struct VersionFile {
    name: String,
    #[serde(default)]
    schema: Option<VersionSchemaFile>,
}

#[derive(Debug, Deserialize)]
struct VersionSchemaFile {
    #[serde(rename = "openAPIV3Schema", default)]
    open_api_v3_schema: Option<NodeFile>,
}

/// One OpenAPI v3 schema node as it appears on disk
#[derive(Debug, Deserialize)]
struct NodeFile {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    properties: BTreeMap<String, NodeFile>,
    #[serde(default)]
    required: Vec<String>,
}

/// A decoded CRD whose version schemas are converted on demand
#[derive(Debug)]
pub struct CustomResourceDefinition {
    versions: Vec<VersionFile>,
}

impl CustomResourceDefinition {
    /// Names of all versions, in source order
    pub fn version_names(&self) -> Vec<&str> {
        self.versions.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn has_version(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v.name == version)
    }

    /// Convert the `spec` schema of every version named `version`.
    ///
    /// Returns an empty list when no version matches; deciding whether that is
    /// an error is left to the caller.
    ///
    /// Nodes without a `type` become [`SchemaNode::Untyped`]; rejecting them
    /// is up to whoever walks the tree.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingSpecSchema` if a matching version has no `spec`
    /// property schema.
    pub fn spec_schemas(&self, version: &str) -> Result<Vec<SchemaNode>> {
        let mut schemas = Vec::new();

        for candidate in &self.versions {
            if candidate.name != version {
                trace!("Skipping version {}", candidate.name);
                continue;
            }

            let spec = candidate
                .schema
                .as_ref()
                .and_then(|s| s.open_api_v3_schema.as_ref())
                .and_then(|root| root.properties.get(SPEC_PROPERTY))
                .ok_or_else(|| Error::MissingSpecSchema {
                    version: candidate.name.clone(),
                })?;

            let node = convert_node(spec);
            debug!(
                "Decoded version {} with {} schema nodes",
                candidate.name,
                node.node_count()
            );
            schemas.push(node);
        }

        Ok(schemas)
    }
}

/// Load a CRD from a file; `.json` is read as JSON, anything else as YAML
///
/// YAML is a superset of JSON, so JSON content without the extension still
/// loads.
pub fn load_from_file(path: &Path) -> Result<CustomResourceDefinition> {
    trace!("Loading schema from file: {:?}", path);
    let content = std::fs::read_to_string(path)?;

    if path.extension().map(|e| e == "json").unwrap_or(false) {
        load_from_json(&content)
    } else {
        load_from_yaml(&content)
    }
}

/// Load a CRD from a YAML string
pub fn load_from_yaml(yaml: &str) -> Result<CustomResourceDefinition> {
    let file: CrdFile = serde_yaml::from_str(yaml)
        .map_err(|e| Error::InvalidFormat(format!("YAML parse error: {}", e)))?;

    Ok(CustomResourceDefinition {
        versions: file.spec.versions,
    })
}

/// Load a CRD from a JSON string
pub fn load_from_json(json: &str) -> Result<CustomResourceDefinition> {
    let file: CrdFile = serde_json::from_str(json)
        .map_err(|e| Error::InvalidFormat(format!("JSON parse error: {}", e)))?;

    Ok(CustomResourceDefinition {
        versions: file.spec.versions,
    })
}

fn convert_node(node: &NodeFile) -> SchemaNode {
    let description = node.description.clone();

    match node.kind.as_deref() {
        None => SchemaNode::Untyped { description },
        Some(OBJECT_TYPE) => SchemaNode::Object {
            description,
            children: node
                .properties
                .iter()
                .map(|(name, child)| (name.clone(), convert_node(child)))
                .collect(),
            required: node.required.iter().cloned().collect(),
        },
        Some(kind) => SchemaNode::Leaf {
            kind: kind.to_string(),
            description,
        },
    }
}
