use super::block_node;
use crate::plugin::{ElementConfig, Plugin};
use crate::utils::command_util;
use proseline_schema::ElementType;
use proseline_styles::surface as styles;

/// Multi-column layouts; columns take their width from the container
pub fn layout_plugin() -> Plugin {
    Plugin::new("layout")
        .element(
            ElementType::LayoutContainer,
            ElementConfig::new(|props| {
                Ok(block_node("div", props)
                    .with_styles(&styles::layout_container_styles(Some(props.element)))
                    .with_children(props.children.clone()))
            })
            .block_menu("Columns", false),
        )
        .element(
            ElementType::LayoutColumn,
            ElementConfig::new(|props| {
                let width = props
                    .parent
                    .and_then(|container| container.attrs.column_widths.as_ref())
                    .and_then(|widths| widths.get(props.index))
                    .map(String::as_str);

                Ok(block_node("div", props)
                    .with_styles(&styles::layout_column_styles(width))
                    .with_children(props.children.clone()))
            })
            .hide_block_menu(),
        )
        .util("insertLayout", command_util("insertLayout"))
        .util("addColumn", command_util("addColumn"))
        .util("removeColumn", command_util("removeColumn"))
}
