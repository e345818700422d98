//! # paramdoc-markdown
//!
//! Marker handling for the Markdown documents that carry a generated
//! parameter table.
//!
//! A document owns one generated block:
//!
//! ```text
//! <!-- FUNCTION-SPEC-START -->
//! | **spec.output** | Yes | Configures the output. |
//! | **spec.output.host** | No | Custom host text. | <!-- KEEP-THIS -->
//! <!-- FUNCTION-SPEC-END -->
//! ```
//!
//! Rows ending in a keep comment survive regeneration verbatim, and
//! `<!-- SKIP-ELEMENT path -->` / `<!-- SKIP-WITH-ANCESTORS path -->` comments
//! anywhere in the document suppress rows. [`scan_overrides`] reads those
//! annotations and [`replace_block`] swaps in a freshly rendered table.

pub mod annotations;
pub mod markers;
pub mod merge;

pub use annotations::{OverrideSet, SkipMode, scan_keep, scan_overrides, scan_skip};
pub use markers::Markers;
pub use merge::replace_block;

use thiserror::Error;

/// Errors that can occur when reading or rewriting a document
#[derive(Error, Debug)]
pub enum Error {
    #[error("No {identifier}-START/{identifier}-END block found in document")]
    BlockNotFound { identifier: String },

    #[error("Found {count} {identifier} blocks in document, expected exactly one")]
    MultipleBlocks { identifier: String, count: usize },

    #[error("Invalid block identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
