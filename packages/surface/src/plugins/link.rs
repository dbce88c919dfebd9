use crate::errors::RenderError;
use crate::plugin::{ElementConfig, Plugin};
use crate::utils::command_util;
use crate::vdom::VNode;
use proseline_schema::ElementType;
use proseline_styles::surface as styles;

pub fn link_plugin() -> Plugin {
    Plugin::new("link")
        .element(
            ElementType::Link,
            ElementConfig::new(|props| {
                let url = props.element.attrs.url.as_deref().ok_or_else(|| {
                    RenderError::MissingAttribute {
                        kind: props.element.kind.tag().to_string(),
                        attribute: "url",
                    }
                })?;

                Ok(VNode::element("a")
                    .with_attr("data-type", "link")
                    .with_attr("href", url)
                    .with_attr("target", "_blank")
                    .with_attr("rel", "noopener noreferrer")
                    .with_styles(&styles::link_styles(Some(&props.ctx.theme)))
                    .with_children(props.children.clone()))
            })
            .inline(),
        )
        .util("insertLink", command_util("insertLink"))
        .util("removeLink", command_util("removeLink"))
        .util("isLinkActive", command_util("isLinkActive"))
}
