//! Virtual DOM produced by the interactive renderer.

use proseline_styles::Style;
use serde::Serialize;
use std::collections::BTreeMap;

/// Virtual DOM node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: Style,
        children: Vec<VNode>,
    },

    /// Text node
    Text { content: String },

    /// Comment node
    Comment { content: String },

    /// A renderer failed; shown in place instead of taking the surface down
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: Style::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        VNode::Comment {
            content: content.into(),
        }
    }

    pub fn error(message: impl Into<String>, detail: Option<String>) -> Self {
        VNode::Error {
            message: message.into(),
            detail,
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_style(mut self, key: &str, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.set(key, value);
        }
        self
    }

    /// Apply a whole computed style on top of the current one
    pub fn with_styles(mut self, style: &Style) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.merge(style);
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    /// Insert `child` before the existing children
    pub fn with_first_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.insert(0, child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn styles(&self) -> Option<&Style> {
        match self {
            VNode::Element { styles, .. } => Some(styles),
            _ => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Concatenated text content (error nodes contribute their message)
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } => content.clone(),
            VNode::Comment { .. } => String::new(),
            VNode::Error { message, .. } => message.clone(),
            VNode::Element { children, .. } => children.iter().map(VNode::text_content).collect(),
        }
    }

    /// Depth-first search for the first node matching `predicate`
    pub fn find(&self, predicate: &dyn Fn(&VNode) -> bool) -> Option<&VNode> {
        if predicate(self) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(predicate))
    }

    /// Serialize as HTML; attributes are emitted in key order, styles in
    /// declaration order
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_html(self, &mut out);
        out
    }
}

fn write_html(node: &VNode, out: &mut String) {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            for (key, value) in attributes {
                out.push_str(&format!(" {}=\"{}\"", key, escape_html(value)));
            }
            if !styles.is_empty() {
                out.push_str(&format!(" style=\"{}\"", escape_html(&styles.to_css())));
            }
            if children.is_empty() && is_self_closing(tag) {
                out.push_str(" />");
                return;
            }
            out.push('>');
            for child in children {
                write_html(child, out);
            }
            out.push_str(&format!("</{}>", tag));
        }
        VNode::Text { content } => out.push_str(&escape_html(content)),
        VNode::Comment { content } => out.push_str(&format!("<!-- {} -->", content)),
        VNode::Error { message, detail } => {
            write_html(&crate::boundary::error_view(message, detail.as_deref()), out)
        }
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(tag, "img" | "br" | "hr" | "input" | "meta" | "link")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_is_deterministic() {
        let node = VNode::element("p")
            .with_attr("data-type", "paragraph")
            .with_attr("class", "block")
            .with_style("margin", "0")
            .with_style("color", "#111")
            .with_child(VNode::text("a < b"));

        assert_eq!(
            node.to_html(),
            "<p class=\"block\" data-type=\"paragraph\" style=\"margin: 0; color: #111;\">a &lt; b</p>"
        );
    }

    #[test]
    fn test_void_tags_self_close() {
        let img = VNode::element("img").with_attr("src", "a.png");
        assert_eq!(img.to_html(), "<img src=\"a.png\" />");
    }

    #[test]
    fn test_find_and_text_content() {
        let tree = VNode::element("div")
            .with_child(VNode::element("span").with_child(VNode::text("x")))
            .with_child(VNode::element("em").with_child(VNode::text("y")));

        assert_eq!(tree.text_content(), "xy");
        let em = tree.find(&|n| n.tag() == Some("em")).unwrap();
        assert_eq!(em.text_content(), "y");
    }
}
