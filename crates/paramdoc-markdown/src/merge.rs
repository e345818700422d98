//! Replacement of the generated block inside a document

use crate::markers::Markers;
use crate::{Error, Result};
use tracing::debug;

/// Replace the generated block, markers included, with `table`.
///
/// The block is rewritten as start marker, table, end marker on separate
/// lines. Everything before and after the block is kept byte for byte.
///
/// # Errors
///
/// Returns `Error::BlockNotFound` if the document has no block and
/// `Error::MultipleBlocks` if it has more than one. A block is never appended.
pub fn replace_block(document: &str, table: &str, markers: &Markers) -> Result<String> {
    let count = markers.count_blocks(document);
    if count > 1 {
        return Err(Error::MultipleBlocks {
            identifier: markers.identifier().to_string(),
            count,
        });
    }

    let Some(block) = markers.block.find(document) else {
        return Err(Error::BlockNotFound {
            identifier: markers.identifier().to_string(),
        });
    };

    let start = markers.start_marker();
    let end = markers.end_marker();

    let mut output =
        String::with_capacity(document.len() - block.len() + start.len() + table.len() + end.len() + 2);
    output.push_str(&document[..block.start()]);
    output.push_str(&start);
    output.push('\n');
    output.push_str(table);
    output.push('\n');
    output.push_str(&end);
    output.push_str(&document[block.end()..]);

    debug!(
        "Replaced {} block at bytes {}..{}",
        markers.identifier(),
        block.start(),
        block.end()
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::DEFAULT_BLOCK_IDENTIFIER;

    fn markers() -> Markers {
        Markers::new(DEFAULT_BLOCK_IDENTIFIER).unwrap()
    }

    #[test]
    fn test_replace_keeps_surrounding_text() {
        let doc = "# Title\n\n<!-- FUNCTION-SPEC-START -->\nold row\n<!-- FUNCTION-SPEC-END -->\n\nFooter\n";
        let updated = replace_block(doc, "| **spec.a** | No | A. |", &markers()).unwrap();

        assert_eq!(
            updated,
            "# Title\n\n<!-- FUNCTION-SPEC-START -->\n| **spec.a** | No | A. |\n<!-- FUNCTION-SPEC-END -->\n\nFooter\n"
        );
    }

    #[test]
    fn test_replace_normalizes_marker_spacing() {
        let doc = "<!--FUNCTION-SPEC-START-->old<!--FUNCTION-SPEC-END-->";
        let updated = replace_block(doc, "new", &markers()).unwrap();
        assert_eq!(
            updated,
            "<!-- FUNCTION-SPEC-START -->\nnew\n<!-- FUNCTION-SPEC-END -->"
        );
    }

    #[test]
    fn test_replace_is_stable() {
        let doc = "a\n<!-- FUNCTION-SPEC-START -->\nx\n<!-- FUNCTION-SPEC-END -->\nb";
        let once = replace_block(doc, "row", &markers()).unwrap();
        let twice = replace_block(&once, "row", &markers()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_replacement_text_is_not_expanded() {
        let doc = "<!-- FUNCTION-SPEC-START -->\n<!-- FUNCTION-SPEC-END -->";
        let updated = replace_block(doc, "| **spec.$1** | No | Costs $5. |", &markers()).unwrap();
        assert!(updated.contains("| **spec.$1** | No | Costs $5. |"));
    }

    #[test]
    fn test_missing_block() {
        let result = replace_block("no block here", "row", &markers());
        match result {
            Err(Error::BlockNotFound { identifier }) => {
                assert_eq!(identifier, DEFAULT_BLOCK_IDENTIFIER)
            }
            other => panic!("Expected BlockNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_block_is_missing() {
        let result = replace_block("<!-- FUNCTION-SPEC-START -->\nrow", "row", &markers());
        assert!(matches!(result, Err(Error::BlockNotFound { .. })));
    }

    #[test]
    fn test_multiple_blocks() {
        let doc = "<!-- FUNCTION-SPEC-START -->a<!-- FUNCTION-SPEC-END -->\n\
                   <!-- FUNCTION-SPEC-START -->b<!-- FUNCTION-SPEC-END -->";
        let result = replace_block(doc, "row", &markers());
        assert!(matches!(
            result,
            Err(Error::MultipleBlocks { count: 2, .. })
        ));
    }

    #[test]
    fn test_multiple_blocks_report_count() {
        let doc = "<!-- FUNCTION-SPEC-START -->a<!-- FUNCTION-SPEC-END -->\n\
                   <!-- FUNCTION-SPEC-START -->b<!-- FUNCTION-SPEC-END -->\n\
                   <!-- FUNCTION-SPEC-START -->c<!-- FUNCTION-SPEC-END -->";
        assert_eq!(markers().count_blocks(doc), 3);

        match replace_block(doc, "row", &markers()) {
            Err(Error::MultipleBlocks { identifier, count }) => {
                assert_eq!(identifier, DEFAULT_BLOCK_IDENTIFIER);
                assert_eq!(count, 3);
            }
            other => panic!("Expected MultipleBlocks error, got {:?}", other),
        }
    }

    #[test]
    fn test_other_identifier_untouched() {
        let markers = Markers::new("OTHER").unwrap();
        let doc = "<!-- FUNCTION-SPEC-START -->\nx\n<!-- FUNCTION-SPEC-END -->\n<!-- OTHER-START -->\ny\n<!-- OTHER-END -->";
        let updated = replace_block(doc, "z", &markers).unwrap();
        assert!(updated.starts_with("<!-- FUNCTION-SPEC-START -->\nx\n<!-- FUNCTION-SPEC-END -->\n"));
        assert!(updated.ends_with("<!-- OTHER-START -->\nz\n<!-- OTHER-END -->"));
    }
}
