use crate::plugin::Plugin;
use crate::utils::command_util;
use crate::vdom::VNode;
use proseline_schema::Mark;

/// One leaf renderer per mark, plus the mark and text utils
pub fn marks_plugin() -> Plugin {
    Plugin::new("marks")
        .leaf(Mark::Bold, |node, _| VNode::element("strong").with_child(node))
        .leaf(Mark::Italic, |node, _| VNode::element("em").with_child(node))
        .leaf(Mark::Underline, |node, _| VNode::element("u").with_child(node))
        .leaf(Mark::Strikethrough, |node, _| VNode::element("s").with_child(node))
        .leaf(Mark::Code, |node, _| {
            VNode::element("code")
                .with_style("font-family", "monospace")
                .with_style("background-color", "#f3f4f6")
                .with_style("padding", "0 2px")
                .with_child(node)
        })
        .util("toggleMark", command_util("toggleMark"))
        .util("isMarkActive", command_util("isMarkActive"))
        .util("insertText", command_util("insertText"))
}
