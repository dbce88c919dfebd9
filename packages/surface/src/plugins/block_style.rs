use super::decorates_in_place;
use crate::plugin::{ElementDecorator, ElementProps, Plugin};
use crate::utils::{block_style_util, command_util};
use crate::vdom::VNode;
use proseline_editor::BlockStyle;
use proseline_styles::surface as styles;

/// Wraps a block in a styled container when it carries block styles
pub struct BlockStyleContainer;

impl ElementDecorator for BlockStyleContainer {
    fn decorate(&self, rendered: VNode, props: &ElementProps) -> VNode {
        if !styles::has_block_styles(props.element) {
            return rendered;
        }
        let style = styles::block_styles(props.element);
        if decorates_in_place(&rendered, props) {
            // the item's own styles go last so its indent survives a
            // `padding` shorthand
            let mut rendered = rendered.with_attr("data-block-style", "true");
            if let VNode::Element { ref mut styles, .. } = rendered {
                let own = std::mem::replace(styles, style);
                styles.merge(&own);
            }
            return rendered;
        }
        VNode::element("div")
            .with_attr("data-block-style", "true")
            .with_styles(&style)
            .with_child(rendered)
    }
}

pub fn block_style_plugin() -> Plugin {
    Plugin::new("block-style")
        .element_decorator(BlockStyleContainer)
        .util("setPadding", block_style_util(BlockStyle::Padding))
        .util("setMargin", block_style_util(BlockStyle::Margin))
        .util("setBackgroundColor", block_style_util(BlockStyle::BackgroundColor))
        .util("setBorder", block_style_util(BlockStyle::Border))
        .util("setBorderRadius", block_style_util(BlockStyle::BorderRadius))
        .util("setWidth", block_style_util(BlockStyle::Width))
        .util("setMaxWidth", block_style_util(BlockStyle::MaxWidth))
        .util("clearBlockStyles", command_util("clearBlockStyles"))
        .util("getBlockStyles", command_util("getBlockStyles"))
}
