use super::block_node;
use crate::plugin::{ElementConfig, Plugin};
use crate::utils::command_util;
use crate::vdom::VNode;
use proseline_schema::ElementType;
use proseline_styles::surface as styles;

pub const PLACEHOLDER_TEXT: &str = "No image selected";

/// Void image blocks; an image without a url renders a placeholder
pub fn image_plugin() -> Plugin {
    Plugin::new("image")
        .element(
            ElementType::Image,
            ElementConfig::new(|props| {
                let element = props.element;
                let url = element.attrs.url.as_deref().filter(|url| !url.is_empty());

                let content = match url {
                    Some(url) => VNode::element("img")
                        .with_attr("src", url)
                        .with_attr("alt", element.attrs.alt.as_deref().unwrap_or_default())
                        .with_styles(&styles::image_styles(
                            Some(element),
                            props.selected,
                            Some(&props.ctx.theme),
                        )),
                    None => VNode::element("div")
                        .with_attr("data-image-placeholder", "true")
                        .with_styles(&styles::image_placeholder_styles())
                        .with_child(VNode::text(PLACEHOLDER_TEXT)),
                };

                Ok(block_node("div", props)
                    .with_attr("contenteditable", "false")
                    .with_child(content))
            })
            .void()
            .block_menu("Image", false),
        )
        .util("insertImage", command_util("insertImage"))
        .util("updateImage", command_util("updateImage"))
}
