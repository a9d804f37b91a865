//! Plain-text projection of ADF trees
//!
//! Block boundaries, list markers, marks and heading levels are all dropped;
//! only leaf text survives, in document order.

use serde_json::Value;

use super::classify::{classify, Classification};
use super::model::{Document, Node};

/// Extract the plain text of a raw field value.
///
/// Strings are returned unchanged, absent and unrecognized values yield `""`.
pub fn extract_plain_text(value: Option<&Value>) -> String {
    match (classify(value), value) {
        (Classification::String, Some(Value::String(text))) => text.clone(),
        (Classification::Document | Classification::Node, Some(value)) => Node::from_value(value)
            .map(|node| node.plain_text())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

impl Node {
    /// Concatenated leaf text of this subtree.
    pub fn plain_text(&self) -> String {
        collect_text(std::slice::from_ref(self))
    }
}

impl Document {
    pub fn plain_text(&self) -> String {
        collect_text(self.content())
    }
}

/// Depth-first, left-to-right walk using an explicit stack.
pub(crate) fn collect_text(nodes: &[Node]) -> String {
    let mut output = String::new();
    let mut stack: Vec<&Node> = nodes.iter().rev().collect();

    while let Some(node) = stack.pop() {
        match node {
            Node::Text(text) => output.push_str(&text.text),
            Node::Mention(_) | Node::Emoji(_) | Node::InlineCard(_) => {
                if let Some(text) = node.atom_text() {
                    output.push_str(&text);
                }
            }
            _ => stack.extend(node.children().iter().rev()),
        }
    }

    output
}
