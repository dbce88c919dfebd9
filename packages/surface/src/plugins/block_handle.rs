use super::decorates_in_place;
use crate::plugin::{ElementDecorator, ElementProps, Plugin};
use crate::utils::command_util;
use crate::vdom::VNode;

/// Hover handle used to open the block menu and drag blocks around
pub struct BlockHandle;

impl ElementDecorator for BlockHandle {
    fn decorate(&self, rendered: VNode, props: &ElementProps) -> VNode {
        let handle = VNode::element("span")
            .with_attr("class", "proseline-block-handle")
            .with_attr("contenteditable", "false")
            .with_attr("draggable", "true")
            .with_attr("aria-label", "Block menu")
            .with_style("position", "absolute")
            .with_style("left", "-24px")
            .with_style("cursor", "grab")
            .with_child(VNode::text("⠿"));

        if decorates_in_place(&rendered, props) {
            return mark_block(rendered, props).with_first_child(handle);
        }

        mark_block(VNode::element("div"), props)
            .with_child(handle)
            .with_child(rendered)
    }
}

fn mark_block(node: VNode, props: &ElementProps) -> VNode {
    let node = node
        .with_attr("class", "proseline-block")
        .with_attr("data-path", props.path.to_string())
        .with_style("position", "relative");
    if props.selected {
        node.with_attr("data-selected", "true")
    } else {
        node
    }
}

/// The handle decorator and the block menu's commands
pub fn block_handle_plugin() -> Plugin {
    Plugin::new("block-handle")
        .element_decorator(BlockHandle)
        .util("convertBlock", command_util("convertBlock"))
        .util("duplicateBlock", command_util("duplicateBlock"))
        .util("deleteBlock", command_util("deleteBlock"))
        .util("moveBlockUp", command_util("moveBlockUp"))
        .util("moveBlockDown", command_util("moveBlockDown"))
        .util("insertBlockAfter", command_util("insertBlockAfter"))
}
