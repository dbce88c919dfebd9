//! Document tree nodes.
//!
//! A node is either an [`Element`] (typed, with children) or a [`Text`] leaf
//! carrying independent mark flags. The serialized form is the plain JSON shape
//! used for persistence:
//!
//! ```json
//! { "type": "paragraph", "align": "center", "children": [{ "text": "Hi", "bold": true }] }
//! ```

use crate::registry::ElementType;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A tree node: structural element or text leaf
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(Text),
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(Text::new(content))
    }

    pub fn empty_text() -> Self {
        Node::Text(Text::default())
    }

    pub fn element(kind: ElementType, children: Vec<Node>) -> Self {
        Node::Element(Element::new(kind, children))
    }

    /// `{ type: "paragraph", children: [{ text: "" }] }`
    pub fn empty_paragraph() -> Self {
        Node::Element(Element::empty(ElementType::Paragraph))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub fn kind(&self) -> Option<&ElementType> {
        self.as_element().map(|el| &el.kind)
    }

    pub fn children(&self) -> Option<&Vec<Node>> {
        self.as_element().map(|el| &el.children)
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        self.as_element_mut().map(|el| &mut el.children)
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.text.clone(),
            Node::Element(el) => el.text_content(),
        }
    }

    /// Number of characters of text under this node
    pub fn text_len(&self) -> usize {
        match self {
            Node::Text(text) => text.len(),
            Node::Element(el) => el.children.iter().map(Node::text_len).sum(),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;

        let object = value
            .as_object()
            .ok_or_else(|| D::Error::custom("node must be an object"))?;

        if object.contains_key("type") {
            Element::deserialize(value)
                .map(Node::Element)
                .map_err(D::Error::custom)
        } else if object.contains_key("text") {
            Text::deserialize(value)
                .map(Node::Text)
                .map_err(D::Error::custom)
        } else {
            Err(D::Error::custom(
                "node must carry either a `type` (element) or a `text` (leaf) field",
            ))
        }
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

/// Typed element attributes
///
/// The cross-cutting subset (`align`, `lineHeight`, `font`, `indent`) and the
/// seven block-styling attributes apply to every block-level variant and are
/// read identically by both renderers. Attributes this schema does not know
/// about are kept in `extra` so they survive a load/save round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub line_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<u32>,

    // Block styling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,

    // Link / image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    // Layout container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_widths: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Attributes {
    /// Keep only the attributes that survive a block type conversion
    pub fn conversion_subset(&self) -> Attributes {
        Attributes {
            align: self.align,
            line_height: self.line_height.clone(),
            font: self.font.clone(),
            indent: self.indent,
            ..Attributes::default()
        }
    }

    /// Copy the conversion subset of `other` onto `self`
    pub fn merge_conversion_subset(&mut self, other: &Attributes) {
        self.align = other.align;
        self.line_height = other.line_height.clone();
        self.font = other.font.clone();
        self.indent = other.indent;
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

/// Structural node with a type tag and children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: ElementType,

    #[serde(flatten)]
    pub attrs: Attributes,

    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(kind: ElementType, children: Vec<Node>) -> Self {
        Self {
            kind,
            attrs: Attributes::default(),
            children,
        }
    }

    /// Element with a single empty text leaf
    pub fn empty(kind: ElementType) -> Self {
        Self::new(kind, vec![Node::empty_text()])
    }

    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

/// A formatting flag on a text leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
}

impl Mark {
    pub const ALL: [Mark; 5] = [
        Mark::Bold,
        Mark::Italic,
        Mark::Underline,
        Mark::Strikethrough,
        Mark::Code,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Strikethrough => "strikethrough",
            Mark::Code => "code",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Text leaf with independently composable marks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.set_mark(mark, true);
        self
    }

    pub fn has_mark(&self, mark: Mark) -> bool {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underline => self.underline,
            Mark::Strikethrough => self.strikethrough,
            Mark::Code => self.code,
        }
    }

    pub fn set_mark(&mut self, mark: Mark, on: bool) {
        let flag = match mark {
            Mark::Bold => &mut self.bold,
            Mark::Italic => &mut self.italic,
            Mark::Underline => &mut self.underline,
            Mark::Strikethrough => &mut self.strikethrough,
            Mark::Code => &mut self.code,
        };
        *flag = on;
    }

    /// Active marks in [`Mark::ALL`] order
    pub fn marks(&self) -> Vec<Mark> {
        Mark::ALL.into_iter().filter(|m| self.has_mark(*m)).collect()
    }

    /// Same marks, different content
    pub fn sibling(&self, text: impl Into<String>) -> Text {
        Text {
            text: text.into(),
            ..self.clone()
        }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Split at a character offset, keeping marks on both halves.
    /// `self` keeps the head; the tail is returned.
    pub fn split_off(&mut self, offset: usize) -> Text {
        let byte = byte_index(&self.text, offset);
        let tail = self.text.split_off(byte);
        self.sibling(tail)
    }

    /// Insert at a character offset
    pub fn insert_str(&mut self, offset: usize, content: &str) {
        let byte = byte_index(&self.text, offset);
        self.text.insert_str(byte, content);
    }
}

/// Byte index of the `offset`-th character (clamped to the end)
fn byte_index(s: &str, offset: usize) -> usize {
    s.char_indices()
        .nth(offset)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
