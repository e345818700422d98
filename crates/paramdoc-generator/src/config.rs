//! Generator configuration

use crate::{Error, Result};
use paramdoc_markdown::markers::DEFAULT_BLOCK_IDENTIFIER;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Schema version documented when none is configured
pub const DEFAULT_API_VERSION: &str = "v1alpha1";

/// What to do when the requested version is not in the schema source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingVersionPolicy {
    /// Abort the run (default)
    #[default]
    Error,
    /// Log a warning and render only the kept rows
    Warn,
}

/// Everything one regeneration run needs
///
/// Can be read from YAML; every key is optional:
///
/// ```yaml
/// schema-path: config/crd/bases/telemetry.kyma-project.io_metricpipelines.yaml
/// document-path: docs/user/04-metrics.md
/// api-version: v1alpha1
/// block-identifier: FUNCTION-SPEC
/// missing-version: warn
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorConfig {
    /// CRD file holding the schema
    pub schema_path: PathBuf,
    /// Markdown document that receives the table
    pub document_path: PathBuf,
    /// Version name selected from `spec.versions`
    pub api_version: String,
    /// Identifier of the `<!-- ID-START -->`/`<!-- ID-END -->` block
    pub block_identifier: String,
    pub missing_version: MissingVersionPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            schema_path: PathBuf::new(),
            document_path: PathBuf::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            block_identifier: DEFAULT_BLOCK_IDENTIFIER.to_string(),
            missing_version: MissingVersionPolicy::Error,
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration for the given schema and document
    pub fn new(schema_path: impl Into<PathBuf>, document_path: impl Into<PathBuf>) -> Self {
        Self {
            schema_path: schema_path.into(),
            document_path: document_path.into(),
            ..Self::default()
        }
    }

    /// Set the schema file
    pub fn schema_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_path = path.into();
        self
    }

    /// Set the target document
    pub fn document_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.document_path = path.into();
        self
    }

    /// Set the schema version to document
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the block identifier
    pub fn block_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.block_identifier = identifier.into();
        self
    }

    /// Set the missing-version policy
    pub fn missing_version(mut self, policy: MissingVersionPolicy) -> Self {
        self.missing_version = policy;
        self
    }

    /// Parse a configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(format!("YAML parse error: {}", e)))
    }

    /// Read a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Check that the configuration can drive a run
    pub fn validate(&self) -> Result<()> {
        if self.schema_path.as_os_str().is_empty() {
            return Err(Error::Config("schema path is not set".to_string()));
        }
        if self.document_path.as_os_str().is_empty() {
            return Err(Error::Config("document path is not set".to_string()));
        }
        if self.api_version.trim().is_empty() {
            return Err(Error::Config("api version is empty".to_string()));
        }
        if self.block_identifier.is_empty()
            || self.block_identifier.chars().any(char::is_whitespace)
        {
            return Err(Error::Config(format!(
                "block identifier '{}' must be non-empty and contain no whitespace",
                self.block_identifier
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.api_version, "v1alpha1");
        assert_eq!(config.block_identifier, "FUNCTION-SPEC");
        assert_eq!(config.missing_version, MissingVersionPolicy::Error);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = GeneratorConfig::new("crd.yaml", "doc.md")
            .api_version("v1beta1")
            .block_identifier("PIPELINE-SPEC")
            .missing_version(MissingVersionPolicy::Warn)
            .document_path("other.md");

        assert_eq!(config.schema_path, PathBuf::from("crd.yaml"));
        assert_eq!(config.document_path, PathBuf::from("other.md"));
        assert_eq!(config.api_version, "v1beta1");
        assert_eq!(config.block_identifier, "PIPELINE-SPEC");
        assert_eq!(config.missing_version, MissingVersionPolicy::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_with_defaults() {
        let config = GeneratorConfig::from_yaml(
            "schema-path: crd.yaml\ndocument-path: doc.md\nmissing-version: warn\n",
        )
        .unwrap();

        assert_eq!(config.schema_path, PathBuf::from("crd.yaml"));
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.missing_version, MissingVersionPolicy::Warn);
    }

    #[test]
    fn test_from_yaml_rejects_unknown_keys() {
        let result = GeneratorConfig::from_yaml("schema-file: crd.yaml\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = GeneratorConfig::new("crd.yaml", "doc.md");

        assert!(base.clone().api_version(" ").validate().is_err());
        assert!(base.clone().block_identifier("").validate().is_err());
        assert!(base.clone().block_identifier("A B").validate().is_err());
        assert!(base.clone().schema_path("").validate().is_err());
        assert!(base.document_path("").validate().is_err());
    }
}
