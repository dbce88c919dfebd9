//! # Type Registry
//!
//! The closed set of element variants and the guards that distinguish them.
//!
//! Every other crate asks this module "what kind of node is this" instead of
//! comparing type strings. Adding a variant means extending [`ElementType`]
//! and supplying renderers for it; nothing else should need to change.
//!
//! Unrecognized tags are kept as [`ElementType::Unknown`] so documents written
//! by a newer (or older) schema still load and render with a fallback marker.

use crate::node::Node;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Element variant tag (the `type` field of an element)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementType {
    Paragraph,
    HeadingOne,
    HeadingTwo,
    HeadingThree,
    BlockQuote,
    BulletedList,
    NumberedList,
    ListItem,
    Link,
    Image,
    LayoutContainer,
    LayoutColumn,
    /// A tag this registry does not know about
    Unknown(String),
}

impl ElementType {
    /// Every known variant, in registry order
    pub const KNOWN: [ElementType; 12] = [
        ElementType::Paragraph,
        ElementType::HeadingOne,
        ElementType::HeadingTwo,
        ElementType::HeadingThree,
        ElementType::BlockQuote,
        ElementType::BulletedList,
        ElementType::NumberedList,
        ElementType::ListItem,
        ElementType::Link,
        ElementType::Image,
        ElementType::LayoutContainer,
        ElementType::LayoutColumn,
    ];

    /// The serialized tag
    pub fn tag(&self) -> &str {
        match self {
            ElementType::Paragraph => "paragraph",
            ElementType::HeadingOne => "heading-one",
            ElementType::HeadingTwo => "heading-two",
            ElementType::HeadingThree => "heading-three",
            ElementType::BlockQuote => "block-quote",
            ElementType::BulletedList => "bulleted-list",
            ElementType::NumberedList => "numbered-list",
            ElementType::ListItem => "list-item",
            ElementType::Link => "link",
            ElementType::Image => "image",
            ElementType::LayoutContainer => "layout-container",
            ElementType::LayoutColumn => "layout-column",
            ElementType::Unknown(tag) => tag,
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|known| known.tag() == tag)
            .cloned()
            .unwrap_or_else(|| ElementType::Unknown(tag.to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ElementType::Unknown(_))
    }

    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }

    /// Heading level (1-based) for heading variants
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            ElementType::HeadingOne => Some(1),
            ElementType::HeadingTwo => Some(2),
            ElementType::HeadingThree => Some(3),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, ElementType::BulletedList | ElementType::NumberedList)
    }

    /// Blocks whose children are inline content (text, links)
    pub fn is_text_block(&self) -> bool {
        matches!(
            self,
            ElementType::Paragraph
                | ElementType::HeadingOne
                | ElementType::HeadingTwo
                | ElementType::HeadingThree
                | ElementType::BlockQuote
        )
    }

    /// Valid source and target types for block conversion
    pub fn is_convertible(&self) -> bool {
        self.is_text_block() || self.is_list()
    }

    /// Containers whose children are themselves elements
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ElementType::BulletedList
                | ElementType::NumberedList
                | ElementType::LayoutContainer
                | ElementType::LayoutColumn
        )
    }

    /// Marker text shown in place of a type no renderer handles.
    ///
    /// Both renderers print exactly this, so a missing renderer is equally
    /// visible in the editor and in the email.
    pub fn fallback_label(&self) -> String {
        format!("Unsupported block type: {}", self.tag())
    }
}

impl From<String> for ElementType {
    fn from(tag: String) -> Self {
        ElementType::from_tag(&tag)
    }
}

impl From<&str> for ElementType {
    fn from(tag: &str) -> Self {
        ElementType::from_tag(tag)
    }
}

impl From<ElementType> for String {
    fn from(kind: ElementType) -> Self {
        match kind {
            ElementType::Unknown(tag) => tag,
            known => known.tag().to_string(),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

macro_rules! type_guards {
    ($($(#[$doc:meta])* $name:ident => $variant:ident,)*) => {
        $(
            $(#[$doc])*
            pub fn $name(node: &Node) -> bool {
                matches!(node, Node::Element(el) if el.kind == ElementType::$variant)
            }
        )*
    };
}

type_guards! {
    is_paragraph => Paragraph,
    is_heading_one => HeadingOne,
    is_heading_two => HeadingTwo,
    is_heading_three => HeadingThree,
    is_block_quote => BlockQuote,
    is_bulleted_list => BulletedList,
    is_numbered_list => NumberedList,
    is_list_item => ListItem,
    /// Inline, non-void
    is_link => Link,
    /// Void: children are a placeholder leaf only
    is_image => Image,
    is_layout_container => LayoutContainer,
    is_layout_column => LayoutColumn,
}

pub fn is_heading(node: &Node) -> bool {
    is_heading_one(node) || is_heading_two(node) || is_heading_three(node)
}

pub fn is_list(node: &Node) -> bool {
    is_bulleted_list(node) || is_numbered_list(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Element;

    #[test]
    fn test_tags_round_trip_through_registry() {
        for kind in ElementType::KNOWN.iter() {
            assert_eq!(&ElementType::from_tag(kind.tag()), kind);
        }
    }

    #[test]
    fn test_unknown_tag_is_preserved() {
        let kind = ElementType::from_tag("callout");
        assert_eq!(kind, ElementType::Unknown("callout".to_string()));
        assert_eq!(kind.tag(), "callout");
        assert!(!kind.is_known());
    }

    #[test]
    fn test_guards_reject_text_nodes() {
        let text = Node::text("paragraph");
        assert!(!is_paragraph(&text));
        assert!(!is_heading(&text));
        assert!(!is_list(&text));
    }

    #[test]
    fn test_composite_guards() {
        let h2 = Node::Element(Element::empty(ElementType::HeadingTwo));
        let numbered = Node::Element(Element::empty(ElementType::NumberedList));
        let para = Node::Element(Element::empty(ElementType::Paragraph));

        assert!(is_heading(&h2));
        assert!(!is_heading(&para));
        assert!(is_list(&numbered));
        assert!(!is_list(&h2));
        assert!(is_paragraph(&para));
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(ElementType::HeadingOne.heading_level(), Some(1));
        assert_eq!(ElementType::HeadingThree.heading_level(), Some(3));
        assert_eq!(ElementType::Paragraph.heading_level(), None);
    }
}
