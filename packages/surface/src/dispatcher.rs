//! # Interactive Render Dispatcher
//!
//! Walks the document depth-first and renders every element through the
//! composition's element table:
//!
//! ```text
//! element ──▶ children rendered first (skipped for void elements)
//!         ──▶ config for its type?  ──no──▶ fallback (visible marker)
//!         ──▶ renderer inside the error boundary
//!         ──▶ decorators, innermost first (skipped for inline and
//!             hide_block_menu elements)
//! ```
//!
//! Text leaves fold every matching mark renderer in registration order.

use crate::boundary;
use crate::composition::Composition;
use crate::context::RenderContext;
use crate::plugin::{ElementProps, LeafProps};
use crate::vdom::VNode;
use proseline_schema::{Element, Node, Path, Text};
use proseline_styles::surface as styles;

pub(crate) struct Dispatcher<'a> {
    composition: &'a Composition,
    ctx: &'a RenderContext,
}

impl<'a> Dispatcher<'a> {
    pub(crate) fn new(composition: &'a Composition, ctx: &'a RenderContext) -> Self {
        Self { composition, ctx }
    }

    /// Render the children of `parent` (the document root when `None`)
    pub(crate) fn render_children(
        &self,
        children: &[Node],
        parent: Option<(&Element, &Path)>,
    ) -> Vec<VNode> {
        children
            .iter()
            .enumerate()
            .map(|(index, child)| {
                let path = match parent {
                    Some((_, parent_path)) => parent_path.child(index),
                    None => Path::new(vec![index]),
                };
                self.render_node(child, &path, parent.map(|(el, _)| el), index)
            })
            .collect()
    }

    fn render_node(&self, node: &Node, path: &Path, parent: Option<&Element>, index: usize) -> VNode {
        match node {
            Node::Element(element) => self.render_element(element, path, parent, index),
            Node::Text(text) => self.render_leaf(text, path),
        }
    }

    fn render_element(
        &self,
        element: &Element,
        path: &Path,
        parent: Option<&Element>,
        index: usize,
    ) -> VNode {
        let children = if self.ctx.rules.is_void(element) {
            Vec::new()
        } else {
            self.render_children(&element.children, Some((element, path)))
        };

        let props = ElementProps {
            element,
            path,
            children,
            ctx: self.ctx,
            selected: self.ctx.is_selected(path),
            parent,
            index,
        };

        let config = self.composition.element(&element.kind);
        let rendered = match config {
            Some(config) => boundary::guard(&element.kind, || (config.render)(&props)),
            None => fallback(&props),
        };

        let undecorated = config.is_some_and(|c| c.is_inline || c.hide_block_menu);
        if undecorated {
            return rendered;
        }
        self.composition
            .decorators()
            .iter()
            .fold(rendered, |node, decorator| decorator.decorate(node, &props))
    }

    fn render_leaf(&self, text: &Text, path: &Path) -> VNode {
        let props = LeafProps {
            text,
            path,
            ctx: self.ctx,
        };
        let content = self
            .composition
            .leaves()
            .iter()
            .filter(|(mark, _)| text.has_mark(*mark))
            .fold(VNode::text(text.text.as_str()), |node, (_, render)| {
                render(node, &props)
            });

        VNode::element("span")
            .with_attr("data-leaf", "true")
            .with_child(content)
    }
}

/// Paragraph-like rendering for a type no plugin handles
///
/// Any content the element has is still shown after the marker.
fn fallback(props: &ElementProps) -> VNode {
    let element = props.element;
    VNode::element("div")
        .with_attr("data-type", element.kind.tag())
        .with_attr("data-unsupported", "true")
        .with_styles(&styles::paragraph_styles(Some(element), Some(&props.ctx.theme)))
        .with_child(
            VNode::element("span")
                .with_attr("contenteditable", "false")
                .with_style("color", "#b91c1c")
                .with_style("font-style", "italic")
                .with_child(VNode::text(element.kind.fallback_label())),
        )
        .with_children(props.children.clone())
}
