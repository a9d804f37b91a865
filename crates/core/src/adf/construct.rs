use std::sync::LazyLock;

use regex::Regex;

use super::model::{Document, Node};

/// A line break followed by one or more whitespace-only lines.
static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n(?:[ \t\r\f\x0B]*\n)+").expect("paragraph break pattern is valid")
});

/// Build a document from free-form text, one paragraph per blank-line
/// separated block.
///
/// Returns `None` when no non-blank paragraph remains; an empty document is
/// never produced.
pub fn text_to_document(text: &str) -> Option<Document> {
    let paragraphs: Vec<Node> = PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| Node::paragraph(vec![Node::text(paragraph)]))
        .collect();

    if paragraphs.is_empty() {
        None
    } else {
        Some(Document::new(paragraphs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_to_document_single_paragraph() {
        // Act
        let document = text_to_document("  Fix the login page  ");

        // Assert
        assert_eq!(
            document.map(|d| d.to_value()),
            Some(json!({
                "type": "doc",
                "version": 1,
                "content": [{
                    "type": "paragraph",
                    "content": [{"type": "text", "text": "Fix the login page"}]
                }]
            }))
        );
    }

    #[test]
    fn test_text_to_document_splits_on_blank_lines() {
        // Arrange: Mixed line endings and whitespace-only separator lines
        let text = "first line\nstill first\n\n\nsecond\r\n  \t \r\nthird\n";

        // Act
        let document = text_to_document(text).unwrap();

        // Assert: Single newlines stay inside a paragraph
        assert_eq!(
            document.into_content(),
            vec![
                Node::paragraph(vec![Node::text("first line\nstill first")]),
                Node::paragraph(vec![Node::text("second")]),
                Node::paragraph(vec![Node::text("third")]),
            ]
        );
    }

    #[test]
    fn test_text_to_document_blank_input() {
        assert_eq!(text_to_document(""), None);
        assert_eq!(text_to_document("   "), None);
        assert_eq!(text_to_document("\n\n \n\t\n"), None);
    }

    #[test]
    fn test_text_to_document_keeps_markdown_literal() {
        // Markdown syntax is not parsed; it is stored as text
        let document = text_to_document("**not bold**").unwrap();

        assert_eq!(
            document.into_content(),
            vec![Node::paragraph(vec![Node::text("**not bold**")])]
        );
    }
}
