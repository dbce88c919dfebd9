//! Built-in plugins
//!
//! [`default_plugins`] is the set a standard editing surface uses. Each
//! plugin can also be composed on its own or overridden by a later plugin.

mod basic;
mod block_handle;
mod block_style;
mod image;
mod indent;
mod layout;
mod link;
mod lists;
mod marks;
mod theme;

pub use basic::basic_plugin;
pub use block_handle::{block_handle_plugin, BlockHandle};
pub use block_style::{block_style_plugin, BlockStyleContainer};
pub use image::image_plugin;
pub use indent::indent_plugin;
pub use layout::layout_plugin;
pub use link::link_plugin;
pub use lists::lists_plugin;
pub use marks::marks_plugin;
pub use theme::{theme_plugin, ThemeProvider};

use crate::plugin::{ElementProps, Plugin};
use crate::vdom::VNode;

/// Every built-in plugin except the theme provider
///
/// The block-style container is registered before the block handle, so it
/// sits inside the handle wrapper.
pub fn default_plugins() -> Vec<Plugin> {
    vec![
        basic_plugin(),
        lists_plugin(),
        link_plugin(),
        image_plugin(),
        layout_plugin(),
        marks_plugin(),
        indent_plugin(),
        block_style_plugin(),
        block_handle_plugin(),
    ]
}

/// Element node tagged with the element's type
pub(crate) fn block_node(tag: &str, props: &ElementProps) -> VNode {
    VNode::element(tag).with_attr("data-type", props.element.kind.tag())
}

/// List items must stay direct children of their list, so decorators
/// annotate the rendered `li` instead of wrapping it
pub(crate) fn decorates_in_place(rendered: &VNode, props: &ElementProps) -> bool {
    rendered.tag().is_some() && props.parent.is_some_and(|parent| parent.kind.is_list())
}
