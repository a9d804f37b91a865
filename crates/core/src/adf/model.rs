//! ADF node, mark and document types
//!
//! Conversion from `serde_json::Value` is total: malformed fields degrade to
//! empty values and unknown node kinds are kept as [`Node::Unknown`] so that
//! traversal never aborts on data coming from Jira.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Arbitrary node or mark attributes, kept exactly as received.
pub type Attrs = Map<String, Value>;

/// Nesting bound applied when reading and rendering trees.
///
/// Subtrees below this depth are collapsed to their plain text.
pub const MAX_DEPTH: usize = 100;

/// Version written on every document this crate creates.
pub const DEFAULT_VERSION: u64 = 1;

/// Container payload shared by every block-level kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub content: Vec<Node>,
    pub attrs: Attrs,
}

impl Block {
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            content,
            attrs: Attrs::new(),
        }
    }

    pub fn with_attrs(content: Vec<Node>, attrs: Attrs) -> Self {
        Self { content, attrs }
    }
}

/// Leaf text with formatting marks, in application order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    pub text: String,
    pub marks: Vec<Mark>,
}

/// A node whose kind is not modeled here. Its children are still rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownNode {
    pub kind: String,
    pub content: Vec<Node>,
    pub attrs: Attrs,
}

/// A single ADF node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A `doc` appearing below the root. Carries no version.
    Doc(Block),
    Paragraph(Block),
    Text(Text),
    CodeBlock(Block),
    BulletList(Block),
    OrderedList(Block),
    ListItem(Block),
    Heading(Block),
    Blockquote(Block),
    HardBreak,
    Rule,
    Mention(Attrs),
    Emoji(Attrs),
    InlineCard(Attrs),
    Unknown(UnknownNode),
}

/// Inline formatting attached to a text node.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Strong,
    Em,
    Code,
    Strike,
    Link(Attrs),
    Underline,
    TextColor(Attrs),
    SubSup(Attrs),
    Unknown { kind: String, attrs: Attrs },
}

/// The versioned root envelope.
///
/// A document read from JSON keeps its source value and writes it back
/// verbatim, so fields the typed tree does not model (block marks, atom
/// attributes, subtrees past [`MAX_DEPTH`]) survive a read and write.
/// Replacing the content drops the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    version: u64,
    content: Vec<Node>,
    source: Option<Value>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Document {
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            version: DEFAULT_VERSION,
            content,
            source: None,
        }
    }

    /// Read a document from a value whose `type` is `doc`.
    ///
    /// Returns `None` for anything else. A missing or non-integer `version`
    /// reads as [`DEFAULT_VERSION`] but is written back as received.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if object.get("type").and_then(Value::as_str) != Some("doc") {
            return None;
        }

        let version = object
            .get("version")
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_VERSION);

        Some(Self {
            version,
            content: read_children(object.get("content"), 1),
            source: Some(value.clone()),
        })
    }

    /// Wrap a single node value in a fresh document, keeping the node as received.
    pub fn wrap_value(value: &Value) -> Option<Self> {
        let node = Node::from_value(value)?;

        Some(Self {
            version: DEFAULT_VERSION,
            content: vec![node],
            source: Some(serde_json::json!({
                "type": "doc",
                "version": DEFAULT_VERSION,
                "content": [value],
            })),
        })
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn content(&self) -> &[Node] {
        &self.content
    }

    /// Replace the top-level nodes. The document is written from the typed tree afterwards.
    pub fn set_content(&mut self, content: Vec<Node>) {
        self.content = content;
        self.source = None;
    }

    pub fn into_content(self) -> Vec<Node> {
        self.content
    }

    /// The wire shape Jira expects on create and update requests.
    pub fn to_value(&self) -> Value {
        match &self.source {
            Some(source) => source.clone(),
            None => serde_json::to_value(self).unwrap_or(Value::Null),
        }
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(Text {
            text: text.into(),
            marks: Vec::new(),
        })
    }

    pub fn marked_text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text(Text {
            text: text.into(),
            marks,
        })
    }

    pub fn paragraph(content: Vec<Node>) -> Self {
        Node::Paragraph(Block::new(content))
    }

    /// Read a node from an arbitrary JSON value.
    ///
    /// Returns `None` when the value is not an object with a string `type`.
    pub fn from_value(value: &Value) -> Option<Self> {
        read_node(value, 0)
    }

    /// The wire `type` string for this node.
    pub fn kind(&self) -> &str {
        match self {
            Node::Doc(_) => "doc",
            Node::Paragraph(_) => "paragraph",
            Node::Text(_) => "text",
            Node::CodeBlock(_) => "codeBlock",
            Node::BulletList(_) => "bulletList",
            Node::OrderedList(_) => "orderedList",
            Node::ListItem(_) => "listItem",
            Node::Heading(_) => "heading",
            Node::Blockquote(_) => "blockquote",
            Node::HardBreak => "hardBreak",
            Node::Rule => "rule",
            Node::Mention(_) => "mention",
            Node::Emoji(_) => "emoji",
            Node::InlineCard(_) => "inlineCard",
            Node::Unknown(unknown) => &unknown.kind,
        }
    }

    /// Child nodes, empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Doc(block)
            | Node::Paragraph(block)
            | Node::CodeBlock(block)
            | Node::BulletList(block)
            | Node::OrderedList(block)
            | Node::ListItem(block)
            | Node::Heading(block)
            | Node::Blockquote(block) => &block.content,
            Node::Unknown(unknown) => &unknown.content,
            Node::Text(_)
            | Node::HardBreak
            | Node::Rule
            | Node::Mention(_)
            | Node::Emoji(_)
            | Node::InlineCard(_) => &[],
        }
    }

    fn attrs(&self) -> Option<&Attrs> {
        match self {
            Node::Doc(block)
            | Node::Paragraph(block)
            | Node::CodeBlock(block)
            | Node::BulletList(block)
            | Node::OrderedList(block)
            | Node::ListItem(block)
            | Node::Heading(block)
            | Node::Blockquote(block) => Some(&block.attrs),
            Node::Mention(attrs) | Node::Emoji(attrs) | Node::InlineCard(attrs) => Some(attrs),
            Node::Unknown(unknown) => Some(&unknown.attrs),
            Node::Text(_) | Node::HardBreak | Node::Rule => None,
        }
    }

    /// Visible text carried in attributes by inline atoms (mentions, emoji, cards).
    pub(crate) fn atom_text(&self) -> Option<String> {
        match self {
            Node::Mention(attrs) => attr_str(attrs, "text")
                .map(str::to_string)
                .or_else(|| attr_str(attrs, "id").map(|id| format!("@{id}"))),
            Node::Emoji(attrs) => attr_str(attrs, "text")
                .or_else(|| attr_str(attrs, "shortName"))
                .map(str::to_string),
            Node::InlineCard(attrs) => attr_str(attrs, "url").map(|url| format!("<{url}>")),
            _ => None,
        }
    }
}

impl Mark {
    /// Read a mark. Non-object values and objects without a string `type`
    /// yield `None` and are dropped by the caller.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let kind = object.get("type")?.as_str()?;
        let attrs = read_attrs(object.get("attrs"));

        Some(match kind {
            "strong" => Mark::Strong,
            "em" => Mark::Em,
            "code" => Mark::Code,
            "strike" => Mark::Strike,
            "link" => Mark::Link(attrs),
            "underline" => Mark::Underline,
            "textColor" => Mark::TextColor(attrs),
            "subsup" => Mark::SubSup(attrs),
            other => Mark::Unknown {
                kind: other.to_string(),
                attrs,
            },
        })
    }

    pub fn link(href: impl Into<String>) -> Self {
        let mut attrs = Attrs::new();
        attrs.insert("href".to_string(), Value::String(href.into()));
        Mark::Link(attrs)
    }

    pub fn kind(&self) -> &str {
        match self {
            Mark::Strong => "strong",
            Mark::Em => "em",
            Mark::Code => "code",
            Mark::Strike => "strike",
            Mark::Link(_) => "link",
            Mark::Underline => "underline",
            Mark::TextColor(_) => "textColor",
            Mark::SubSup(_) => "subsup",
            Mark::Unknown { kind, .. } => kind,
        }
    }

    fn attrs(&self) -> Option<&Attrs> {
        match self {
            Mark::Link(attrs) | Mark::TextColor(attrs) | Mark::SubSup(attrs) => Some(attrs),
            Mark::Unknown { attrs, .. } => Some(attrs),
            Mark::Strong | Mark::Em | Mark::Code | Mark::Strike | Mark::Underline => None,
        }
    }
}

pub(crate) fn attr_str<'a>(attrs: &'a Attrs, key: &str) -> Option<&'a str> {
    attrs.get(key).and_then(Value::as_str)
}

fn read_attrs(value: Option<&Value>) -> Attrs {
    value
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

fn read_children(value: Option<&Value>, depth: usize) -> Vec<Node> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| read_node(item, depth))
                .collect()
        })
        .unwrap_or_default()
}

fn read_node(value: &Value, depth: usize) -> Option<Node> {
    let object = value.as_object()?;
    let kind = object.get("type")?.as_str()?;

    if depth >= MAX_DEPTH {
        let text = collect_value_text(value);
        return Some(Node::text(text));
    }

    let content = || read_children(object.get("content"), depth + 1);
    let attrs = || read_attrs(object.get("attrs"));
    let block = || Block::with_attrs(content(), attrs());

    Some(match kind {
        "doc" => Node::Doc(block()),
        "paragraph" => Node::Paragraph(block()),
        "text" => Node::Text(Text {
            text: object
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            marks: object
                .get("marks")
                .and_then(Value::as_array)
                .map(|marks| marks.iter().filter_map(Mark::from_value).collect())
                .unwrap_or_default(),
        }),
        "codeBlock" => Node::CodeBlock(block()),
        "bulletList" => Node::BulletList(block()),
        "orderedList" => Node::OrderedList(block()),
        "listItem" => Node::ListItem(block()),
        "heading" => Node::Heading(block()),
        "blockquote" => Node::Blockquote(block()),
        "hardBreak" => Node::HardBreak,
        "rule" => Node::Rule,
        "mention" => Node::Mention(attrs()),
        "emoji" => Node::Emoji(attrs()),
        "inlineCard" => Node::InlineCard(attrs()),
        other => Node::Unknown(UnknownNode {
            kind: other.to_string(),
            content: content(),
            attrs: attrs(),
        }),
    })
}

/// Concatenate every `text` field below `value` without recursion.
fn collect_value_text(value: &Value) -> String {
    let mut output = String::new();
    let mut stack = vec![value];

    while let Some(current) = stack.pop() {
        if let Some(text) = current.get("text").and_then(Value::as_str) {
            if current.get("type").and_then(Value::as_str) == Some("text") {
                output.push_str(text);
                continue;
            }
        }
        if let Some(children) = current.get("content").and_then(Value::as_array) {
            stack.extend(children.iter().rev());
        }
    }

    output
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.kind())?;

        if let Node::Text(text) = self {
            map.serialize_entry("text", &text.text)?;
            if !text.marks.is_empty() {
                map.serialize_entry("marks", &text.marks)?;
            }
            return map.end();
        }

        if let Some(attrs) = self.attrs().filter(|attrs| !attrs.is_empty()) {
            map.serialize_entry("attrs", attrs)?;
        }

        let has_content = !matches!(
            self,
            Node::HardBreak | Node::Rule | Node::Mention(_) | Node::Emoji(_) | Node::InlineCard(_)
        );
        if has_content {
            map.serialize_entry("content", self.children())?;
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Node::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom("expected an ADF node object with a `type`"))
    }
}

impl Serialize for Mark {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.kind())?;
        if let Some(attrs) = self.attrs().filter(|attrs| !attrs.is_empty()) {
            map.serialize_entry("attrs", attrs)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Mark {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Mark::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom("expected an ADF mark object with a `type`"))
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(source) = &self.source {
            return source.serialize(serializer);
        }

        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("type", "doc")?;
        map.serialize_entry("version", &self.version)?;
        map.serialize_entry("content", &self.content)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Document::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom("expected an ADF document (`type: doc`)"))
    }
}
