//! # paramdoc-generator
//!
//! Turns the `spec` schema of a CustomResourceDefinition into a Markdown
//! parameter table and merges it into a document.
//!
//! One run reads the CRD and the document, scans the document for keep and
//! skip annotations, walks the schema into path-keyed rows, renders them in
//! path order, and replaces the generated block. The document is written only
//! after all of that has succeeded.

pub mod config;
pub mod normalize;
pub mod pipeline;
pub mod table;
pub mod walker;

pub use config::{GeneratorConfig, MissingVersionPolicy};
pub use normalize::normalize_description;
pub use pipeline::{GenerationReport, Generator};
pub use table::render_table;
pub use walker::{DocRow, RowMap, generate_rows, walk_node};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during a regeneration run
#[derive(Error, Debug)]
pub enum Error {
    #[error("Schema error: {0}")]
    Schema(#[from] paramdoc_schema::Error),

    #[error("Document error: {0}")]
    Document(#[from] paramdoc_markdown::Error),

    #[error("Version '{version}' not found in schema (available: {available})")]
    VersionNotFound { version: String, available: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
