use super::block_node;
use crate::plugin::{ElementConfig, ElementProps, Plugin};
use crate::utils::command_util;
use crate::vdom::VNode;
use proseline_schema::ElementType;
use proseline_styles::{surface as styles, Style};

/// Paragraphs, headings and block quotes, plus the selection and alignment
/// utils
pub fn basic_plugin() -> Plugin {
    Plugin::new("basic")
        .element(
            ElementType::Paragraph,
            ElementConfig::new(|props| {
                let style = styles::paragraph_styles(Some(props.element), Some(&props.ctx.theme));
                Ok(text_block("p", props, &style))
            })
            .block_menu("Text", true),
        )
        .element(ElementType::HeadingOne, heading(1, "Heading 1"))
        .element(ElementType::HeadingTwo, heading(2, "Heading 2"))
        .element(ElementType::HeadingThree, heading(3, "Heading 3"))
        .element(
            ElementType::BlockQuote,
            ElementConfig::new(|props| {
                let style = styles::block_quote_styles(Some(props.element), Some(&props.ctx.theme));
                Ok(text_block("blockquote", props, &style))
            })
            .block_menu("Quote", true),
        )
        .util("select", command_util("select"))
        .util("deselect", command_util("deselect"))
        .util("setAlign", command_util("setAlign"))
        .util("setLineHeight", command_util("setLineHeight"))
        .util("setFont", command_util("setFont"))
}

fn heading(level: u8, label: &str) -> ElementConfig {
    ElementConfig::new(move |props| {
        let style = styles::heading_styles(level, Some(props.element), Some(&props.ctx.theme));
        Ok(text_block(&format!("h{}", level), props, &style))
    })
    .block_menu(label, true)
}

fn text_block(tag: &str, props: &ElementProps, style: &Style) -> VNode {
    block_node(tag, props)
        .with_styles(style)
        .with_children(props.children.clone())
}
