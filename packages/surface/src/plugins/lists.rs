use super::block_node;
use crate::plugin::{ElementConfig, Plugin};
use crate::vdom::VNode;
use proseline_schema::ElementType;
use proseline_styles::{surface as styles, ListMarker};

pub fn lists_plugin() -> Plugin {
    Plugin::new("lists")
        .element(
            ElementType::BulletedList,
            ElementConfig::new(|props| {
                let style = styles::list_styles(Some(props.element), Some(&props.ctx.theme));
                Ok(block_node("ul", props)
                    .with_styles(&style)
                    .with_children(props.children.clone()))
            })
            .block_menu("Bulleted list", true),
        )
        .element(
            ElementType::NumberedList,
            ElementConfig::new(|props| {
                let style = styles::list_styles(Some(props.element), Some(&props.ctx.theme));
                Ok(block_node("ol", props)
                    .with_styles(&style)
                    .with_children(props.children.clone()))
            })
            .block_menu("Numbered list", true),
        )
        .element(
            ElementType::ListItem,
            ElementConfig::new(|props| {
                let marker = match props.parent.map(|parent| &parent.kind) {
                    Some(ElementType::NumberedList) => ListMarker::Number(props.index + 1),
                    _ => ListMarker::Bullet,
                };
                let item = styles::list_item_styles(Some(props.element), marker, Some(&props.ctx.theme));

                Ok(block_node("li", props)
                    .with_styles(&item.style)
                    .with_child(
                        VNode::element("span")
                            .with_attr("contenteditable", "false")
                            .with_attr("data-list-marker", "true")
                            .with_child(VNode::text(item.prefix)),
                    )
                    .with_children(props.children.clone()))
            }),
        )
}
