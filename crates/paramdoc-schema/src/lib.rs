//! # paramdoc-schema
//!
//! Typed schema tree and CustomResourceDefinition loader.
//!
//! A CRD is decoded once at the boundary. Only the versions that are asked for
//! are converted into [`SchemaNode`] trees. A node without a `type` decodes as
//! [`SchemaNode::Untyped`]; walkers that reach one report
//! [`Error::MissingType`] with its dotted path.

pub mod loader;
pub mod model;

pub use loader::{CustomResourceDefinition, load_from_file, load_from_json, load_from_yaml};
pub use model::SchemaNode;

use thiserror::Error;

/// Errors that can occur when loading or decoding a schema
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid schema format: {0}")]
    InvalidFormat(String),

    #[error("Schema node '{path}' has no type")]
    MissingType { path: String },

    #[error("Version '{version}' has no schema.openAPIV3Schema.properties.spec")]
    MissingSpecSchema { version: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a missing-type error for the node at `path`.
    pub fn missing_type(path: impl Into<String>) -> Self {
        Self::MissingType { path: path.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
