//! Regeneration run: read, compute, write

use crate::config::{GeneratorConfig, MissingVersionPolicy};
use crate::table::render_table;
use crate::walker::{RowMap, generate_rows};
use crate::{Error, Result};
use paramdoc_markdown::{Markers, replace_block, scan_overrides};
use paramdoc_schema::CustomResourceDefinition;
use paramdoc_schema::loader::SPEC_PROPERTY;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Full document text after the block was replaced
    pub document: String,
    /// Rendered table body
    pub table: String,
    /// Rows generated from the schema
    pub generated_rows: usize,
    /// Rows reused verbatim from the existing document
    pub kept_rows: usize,
    /// Paths carrying a skip annotation
    pub skipped_paths: usize,
    /// Whether `document` differs from the input document
    pub changed: bool,
}

/// Regenerates the parameter table of one document
pub struct Generator {
    config: GeneratorConfig,
    markers: Markers,
}

impl Generator {
    /// Create a generator from a validated configuration
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let markers = Markers::new(config.block_identifier.as_str())?;
        Ok(Self { config, markers })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Compute the updated document without touching any file.
    ///
    /// # Errors
    ///
    /// Returns `Error::VersionNotFound` if the configured version is absent and
    /// the policy is [`MissingVersionPolicy::Error`], schema errors for
    /// untyped nodes outside skipped subtrees, and document errors when the block is missing or
    /// repeated.
    pub fn render(&self, crd: &CustomResourceDefinition, document: &str) -> Result<GenerationReport> {
        let overrides = scan_overrides(document, &self.markers);
        if overrides.is_empty() {
            debug!("No KEEP-THIS or SKIP markers found, documenting every path");
        }
        let version = self.config.api_version.as_str();

        if !crd.has_version(version) {
            let available = crd.version_names().join(", ");
            match self.config.missing_version {
                MissingVersionPolicy::Error => {
                    return Err(Error::VersionNotFound {
                        version: version.to_string(),
                        available,
                    });
                }
                MissingVersionPolicy::Warn => warn!(
                    "Version {} not found in schema (available: {}), rendering kept rows only",
                    version, available
                ),
            }
        }

        let mut rows = RowMap::new();
        for spec in crd.spec_schemas(version)? {
            rows.extend(generate_rows(&spec, SPEC_PROPERTY, &overrides)?);
        }
        let generated_rows = rows.len();
        debug!("Generated {} rows for version {}", generated_rows, version);

        let table = render_table(rows, &overrides.keep);
        let updated = replace_block(document, &table, &self.markers)?;

        Ok(GenerationReport {
            changed: updated != document,
            document: updated,
            table,
            generated_rows,
            kept_rows: overrides.keep.len(),
            skipped_paths: overrides.skip.len(),
        })
    }

    /// Read both inputs and compute the updated document without writing it
    pub fn preview(&self) -> Result<GenerationReport> {
        let crd = paramdoc_schema::load_from_file(&self.config.schema_path)?;
        let document = read_document(&self.config.document_path)?;
        self.render(&crd, &document)
    }

    /// Regenerate the table and overwrite the document in place.
    ///
    /// Nothing is written unless the whole table was computed.
    pub fn run(&self) -> Result<GenerationReport> {
        info!(
            "Generating {} from {} ({})",
            self.config.document_path.display(),
            self.config.schema_path.display(),
            self.config.api_version
        );

        let report = self.preview()?;

        fs::write(&self.config.document_path, &report.document).map_err(|source| Error::Io {
            path: self.config.document_path.clone(),
            source,
        })?;

        info!(
            "Wrote {} generated and {} kept rows to {}",
            report.generated_rows,
            report.kept_rows,
            self.config.document_path.display()
        );

        Ok(report)
    }
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramdoc_schema::load_from_yaml;

    const CRD: &str = r#"
spec:
  versions:
  - name: v1alpha1
    schema:
      openAPIV3Schema:
        type: object
        properties:
          spec:
            type: object
            properties:
              output:
                type: object
                description: Configures the output.
                properties:
                  otlp:
                    type: string
                    description: Sets the OTLP endpoint.
"#;

    const DOCUMENT: &str = "\
| Parameter | Required | Description |
|---|---|---|
<!-- FUNCTION-SPEC-START -->
<!-- FUNCTION-SPEC-END -->
";

    fn generator(policy: MissingVersionPolicy, version: &str) -> Generator {
        Generator::new(
            GeneratorConfig::new("crd.yaml", "doc.md")
                .api_version(version)
                .missing_version(policy),
        )
        .unwrap()
    }

    #[test]
    fn test_render_fills_block() {
        let crd = load_from_yaml(CRD).unwrap();
        let report = generator(MissingVersionPolicy::Error, "v1alpha1")
            .render(&crd, DOCUMENT)
            .unwrap();

        assert_eq!(
            report.table,
            "| **spec** | Yes |  |\n\
             | **spec.output** | No | Configures the output. |\n\
             | **spec.output.otlp** | No | Sets the OTLP endpoint. |"
        );
        assert_eq!(report.generated_rows, 3);
        assert_eq!(report.kept_rows, 0);
        assert!(report.changed);
        assert!(report.document.starts_with("| Parameter | Required | Description |\n"));
        assert!(report.document.ends_with("<!-- FUNCTION-SPEC-END -->\n"));
    }

    #[test]
    fn test_missing_version_is_an_error_by_default() {
        let crd = load_from_yaml(CRD).unwrap();
        let result = generator(MissingVersionPolicy::Error, "v2").render(&crd, DOCUMENT);

        match result {
            Err(Error::VersionNotFound { version, available }) => {
                assert_eq!(version, "v2");
                assert_eq!(available, "v1alpha1");
            }
            other => panic!("Expected VersionNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_version_warn_keeps_only_kept_rows() {
        let crd = load_from_yaml(CRD).unwrap();
        let document = "<!-- FUNCTION-SPEC-START -->\n\
| **spec.output** | Yes | Curated. | <!-- KEEP-THIS -->\n\
| **spec.output.otlp** | No | Sets the OTLP endpoint. |\n\
<!-- FUNCTION-SPEC-END -->";

        let report = generator(MissingVersionPolicy::Warn, "v2")
            .render(&crd, document)
            .unwrap();

        assert_eq!(report.generated_rows, 0);
        assert_eq!(
            report.table,
            "| **spec.output** | Yes | Curated. | <!-- KEEP-THIS -->"
        );
    }

    #[test]
    fn test_missing_block_fails() {
        let crd = load_from_yaml(CRD).unwrap();
        let result = generator(MissingVersionPolicy::Error, "v1alpha1").render(&crd, "# No block\n");
        assert!(matches!(result, Err(Error::Document(_))));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = Generator::new(GeneratorConfig::new("crd.yaml", "doc.md").block_identifier("A B"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_custom_block_identifier() {
        let crd = load_from_yaml(CRD).unwrap();
        let generator = Generator::new(
            GeneratorConfig::new("crd.yaml", "doc.md").block_identifier("PIPELINE-SPEC"),
        )
        .unwrap();

        let document = "<!-- PIPELINE-SPEC-START -->\n<!-- PIPELINE-SPEC-END -->";
        let report = generator.render(&crd, document).unwrap();
        assert!(report.document.contains("| **spec.output** | No | Configures the output. |"));
    }
}
