//! Markdown rendering of ADF trees
//!
//! Every node renders to an owned string that its parent composes, so each
//! rule can be tested in isolation. Block nodes end with a blank line;
//! inline nodes add nothing around their text.

use serde_json::Value;

use super::model::{attr_str, Attrs, Document, Mark, Node, MAX_DEPTH};
use super::plain::collect_text;

const RULE: &str = "---";
const MIN_FENCE: usize = 3;

/// Render a raw field value as Markdown.
///
/// Strings pass through untouched; absent and unrecognized values render as
/// an empty string.
pub fn render(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(value) => Node::from_value(value)
            .map(|node| node.to_markdown())
            .unwrap_or_default(),
        None => String::new(),
    }
}

impl Document {
    pub fn to_markdown(&self) -> String {
        render_children(self.content(), 1)
    }
}

impl Node {
    pub fn to_markdown(&self) -> String {
        render_node(self, 0)
    }
}

fn render_children(nodes: &[Node], depth: usize) -> String {
    nodes.iter().map(|node| render_node(node, depth)).collect()
}

fn render_node(node: &Node, depth: usize) -> String {
    if depth >= MAX_DEPTH {
        return collect_text(std::slice::from_ref(node));
    }
    let inner = depth + 1;

    match node {
        Node::Doc(block) => render_children(&block.content, inner),
        Node::Paragraph(block) => format!("{}\n\n", render_children(&block.content, inner)),
        Node::Text(text) => apply_marks(&text.text, &text.marks),
        Node::CodeBlock(block) => {
            let code = render_children(&block.content, inner);
            let language = attr_str(&block.attrs, "language").unwrap_or_default();
            let fence = "`".repeat(fence_length(&code));
            format!("{fence}{language}\n{code}\n{fence}\n\n")
        }
        Node::BulletList(block) => block
            .content
            .iter()
            .map(|item| render_list_item(item, "- ", inner))
            .collect(),
        Node::OrderedList(block) => block
            .content
            .iter()
            .enumerate()
            .map(|(index, item)| render_list_item(item, &format!("{}. ", index + 1), inner))
            .collect(),
        Node::ListItem(block) => {
            format!("{}\n\n", render_children(&block.content, inner).trim())
        }
        Node::Heading(block) => format!(
            "{} {}\n\n",
            "#".repeat(heading_level(&block.attrs)),
            render_children(&block.content, inner)
        ),
        Node::Blockquote(block) => {
            let quoted = render_children(&block.content, inner);
            format!("{}\n\n", quote_lines(quoted.trim_end_matches('\n')))
        }
        Node::HardBreak => "\n".to_string(),
        Node::Rule => format!("{}\n\n", RULE),
        Node::Mention(_) | Node::Emoji(_) | Node::InlineCard(_) => {
            node.atom_text().unwrap_or_default()
        }
        Node::Unknown(unknown) => render_children(&unknown.content, inner),
    }
}

/// Wrap `text` in each mark's delimiters, first mark innermost.
fn apply_marks(text: &str, marks: &[Mark]) -> String {
    if text.is_empty() {
        return String::new();
    }

    marks
        .iter()
        .fold(text.to_string(), |wrapped, mark| match mark {
            Mark::Strong => format!("**{wrapped}**"),
            Mark::Em => format!("_{wrapped}_"),
            Mark::Code => code_span(&wrapped),
            Mark::Strike => format!("~~{wrapped}~~"),
            Mark::Link(attrs) => match attr_str(attrs, "href") {
                Some(href) => format!("[{wrapped}]({href})"),
                None => wrapped,
            },
            Mark::Underline | Mark::TextColor(_) | Mark::SubSup(_) | Mark::Unknown { .. } => {
                wrapped
            }
        })
}

/// Render one entry of a list with `marker` in front of its first line.
///
/// Continuation lines are indented to the marker width so nested blocks stay
/// inside the item.
fn render_list_item(item: &Node, marker: &str, depth: usize) -> String {
    let body = match item {
        Node::ListItem(block) if depth < MAX_DEPTH => render_children(&block.content, depth + 1),
        other => render_node(other, depth),
    };

    let indent = " ".repeat(marker.len());
    let mut output = String::from(marker);
    for (index, line) in body.trim().lines().enumerate() {
        if index > 0 {
            output.push('\n');
            if !line.is_empty() {
                output.push_str(&indent);
            }
        }
        output.push_str(line);
    }
    output.push_str("\n\n");
    output
}

/// `level` attribute clamped to 1..=6, defaulting to 1.
fn heading_level(attrs: &Attrs) -> usize {
    let level = match attrs.get("level") {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64)),
        Some(Value::String(text)) => text.trim().parse::<i64>().ok(),
        _ => None,
    };

    level.unwrap_or(1).clamp(1, 6) as usize
}

fn quote_lines(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fence long enough not to be closed by a backtick run inside the code.
fn fence_length(code: &str) -> usize {
    MIN_FENCE.max(longest_backtick_run(code) + 1)
}

/// Inline code delimited by one backtick more than the longest run inside.
///
/// Text that starts or ends with a backtick is padded with a space, which
/// Markdown strips again.
fn code_span(code: &str) -> String {
    let delimiter = "`".repeat(longest_backtick_run(code) + 1);
    if code.starts_with('`') || code.ends_with('`') {
        format!("{delimiter} {code} {delimiter}")
    } else {
        format!("{delimiter}{code}{delimiter}")
    }
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in text.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }

    longest
}
