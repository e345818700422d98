//! Comment markers recognised in target documents

use crate::{Error, Result};
use regex::Regex;

/// Identifier used for the generated block when none is configured
pub const DEFAULT_BLOCK_IDENTIFIER: &str = "FUNCTION-SPEC";

/// Marks a table row that must survive regeneration verbatim
pub const KEEP_IDENTIFIER: &str = "KEEP-THIS";

/// Suppresses one row; its descendants are still generated
pub const SKIP_IDENTIFIER: &str = "SKIP-ELEMENT";

/// Suppresses a row together with its whole subtree
pub const SKIP_WITH_ANCESTORS_IDENTIFIER: &str = "SKIP-WITH-ANCESTORS";

/// Compiled marker patterns for one block identifier
#[derive(Debug, Clone)]
pub struct Markers {
    identifier: String,
    /// Whole generated block; group 1 is the block body
    pub(crate) block: Regex,
    /// Kept row; group 0 is the verbatim line, group 1 the bold path
    pub(crate) keep: Regex,
    pub(crate) skip: Regex,
    pub(crate) skip_with_ancestors: Regex,
}

impl Markers {
    /// Compile the markers for `identifier`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidIdentifier` if the identifier is empty or
    /// contains whitespace.
    pub fn new(identifier: impl Into<String>) -> Result<Self> {
        let identifier = identifier.into();
        if identifier.is_empty() || identifier.chars().any(char::is_whitespace) {
            return Err(Error::InvalidIdentifier(identifier));
        }

        let id = regex::escape(&identifier);
        let block = Regex::new(&format!(
            r"(?s)<!--\s*{id}-START\s*-->(.*?)<!--\s*{id}-END\s*-->"
        ))?;
        let keep = Regex::new(&format!(
            r"[^\S\r\n]*\|[^\S\r\n]*\*{{2}}([^*\r\n]+)\*{{2}}.*<!--\s*{}\s*-->",
            regex::escape(KEEP_IDENTIFIER)
        ))?;
        let skip = path_marker(SKIP_IDENTIFIER)?;
        let skip_with_ancestors = path_marker(SKIP_WITH_ANCESTORS_IDENTIFIER)?;

        Ok(Self {
            identifier,
            block,
            keep,
            skip,
            skip_with_ancestors,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Canonical start marker written when the block is replaced
    pub fn start_marker(&self) -> String {
        format!("<!-- {}-START -->", self.identifier)
    }

    /// Canonical end marker written when the block is replaced
    pub fn end_marker(&self) -> String {
        format!("<!-- {}-END -->", self.identifier)
    }

    /// Body of the first generated block, without its markers
    pub fn block_body<'a>(&self, document: &'a str) -> Option<&'a str> {
        self.block
            .captures(document)
            .and_then(|caps| caps.get(1))
            .map(|body| body.as_str())
    }

    /// Count the generated blocks in a document
    pub fn count_blocks(&self, document: &str) -> usize {
        self.block.find_iter(document).count()
    }
}

/// Comment marker with a single path argument in group 1
fn path_marker(identifier: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(
        r"<!--\s*{}\s+(\S+?)\s*-->",
        regex::escape(identifier)
    ))?)
}
