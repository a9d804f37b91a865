use serde_json::Value;

use super::classify::{classify, Classification};
use super::construct::text_to_document;
use super::model::Document;

/// Bring a raw field value into canonical document form.
///
/// - absent: `None`
/// - a document: the same document
/// - any other node: wrapped in a fresh version 1 document
/// - a string: built with [`text_to_document`]
/// - anything else: `None`
pub fn normalize(value: Option<&Value>) -> Option<Document> {
    match (classify(value), value) {
        (Classification::Document, Some(value)) => Document::from_value(value),
        (Classification::Node, Some(value)) => Document::wrap_value(value),
        (Classification::String, Some(Value::String(text))) => text_to_document(text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adf::Node;
    use serde_json::json;

    #[test]
    fn test_normalize_document_is_identity() {
        // Arrange: A document with a non-default version and an unknown node
        let value = json!({
            "type": "doc",
            "version": 3,
            "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "hi"}]},
                {"type": "panel", "attrs": {"panelType": "note"}, "content": []}
            ]
        });

        // Act
        let document = normalize(Some(&value)).unwrap();

        // Assert: No re-wrapping, same wire shape
        assert_eq!(document.version(), 3);
        assert_eq!(document.to_value(), value);
    }

    #[test]
    fn test_normalize_document_keeps_unmodeled_fields() {
        // Arrange: Block marks, atom attributes, a stray scalar child and a string version
        let value = json!({
            "type": "doc",
            "version": "1",
            "content": [
                {
                    "type": "paragraph",
                    "marks": [{"type": "alignment", "attrs": {"align": "center"}}],
                    "content": [
                        {"type": "text", "text": "a"},
                        {"type": "hardBreak", "attrs": {"text": "\n"}}
                    ]
                },
                {"type": "rule", "attrs": {"width": 50}},
                "stray"
            ]
        });

        // Act
        let document = normalize(Some(&value)).unwrap();

        // Assert: Written back verbatim, still rendered from the typed tree
        assert_eq!(document.to_value(), value);
        assert_eq!(serde_json::to_value(&document).unwrap(), value);
        assert_eq!(document.version(), 1);
        assert_eq!(document.to_markdown(), "a\n\n\n---\n\n");
    }

    #[test]
    fn test_normalize_document_past_depth_bound_is_verbatim() {
        let mut node = json!({"type": "text", "text": "deep"});
        for _ in 0..(crate::adf::MAX_DEPTH + 10) {
            node = json!({"type": "blockquote", "content": [node]});
        }
        let value = json!({"type": "doc", "version": 1, "content": [node]});

        let document = normalize(Some(&value)).unwrap();

        assert_eq!(document.to_value(), value);
        assert_eq!(document.plain_text(), "deep");
    }

    #[test]
    fn test_normalize_bare_node_keeps_block_marks() {
        let value = json!({
            "type": "heading",
            "attrs": {"level": 2},
            "marks": [{"type": "indentation", "attrs": {"level": 1}}],
            "content": [{"type": "text", "text": "Title"}]
        });

        let document = normalize(Some(&value)).unwrap();

        assert_eq!(
            document.to_value(),
            json!({"type": "doc", "version": 1, "content": [value]})
        );
    }

    #[test]
    fn test_replacing_content_writes_typed_tree() {
        // Arrange
        let value = json!({
            "type": "doc",
            "version": 1,
            "content": [{"type": "paragraph", "marks": [{"type": "alignment"}], "content": []}]
        });
        let mut document = normalize(Some(&value)).unwrap();

        // Act
        document.set_content(vec![Node::paragraph(vec![Node::text("new")])]);

        // Assert: The stale source is not written back
        assert_eq!(
            document.to_value(),
            json!({
                "type": "doc",
                "version": 1,
                "content": [{"type": "paragraph", "content": [{"type": "text", "text": "new"}]}]
            })
        );
    }

    #[test]
    fn test_normalize_wraps_bare_node() {
        let value = json!({"type": "paragraph", "content": [{"type": "text", "text": "hi"}]});

        let document = normalize(Some(&value)).unwrap();

        assert_eq!(
            document.to_value(),
            json!({"type": "doc", "version": 1, "content": [value]})
        );
    }

    #[test]
    fn test_normalize_string_builds_paragraphs() {
        let value = json!("one\n\ntwo");

        let document = normalize(Some(&value)).unwrap();

        assert_eq!(document.content().len(), 2);
        assert_eq!(document.plain_text(), "onetwo");
    }

    #[test]
    fn test_normalize_absent_and_blank() {
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some(&Value::Null)), None);
        assert_eq!(normalize(Some(&json!(""))), None);
        assert_eq!(normalize(Some(&json!("  \n\n  "))), None);
    }

    #[test]
    fn test_normalize_unrecognized_shapes() {
        assert_eq!(normalize(Some(&json!(7))), None);
        assert_eq!(normalize(Some(&json!([{"type": "paragraph"}]))), None);
        assert_eq!(normalize(Some(&json!({"content": []}))), None);
    }

    #[test]
    fn test_normalize_then_render_legacy_string() {
        let value = json!("legacy description");

        let markdown = normalize(Some(&value))
            .map(|document| document.to_markdown())
            .unwrap_or_default();

        assert_eq!(markdown, "legacy description\n\n");
        assert_eq!(markdown.trim_end(), "legacy description");
    }
}
