use crate::plugin::Plugin;
use crate::utils::command_util;

pub fn indent_plugin() -> Plugin {
    Plugin::new("indent")
        .util("increaseIndent", command_util("increaseIndent"))
        .util("decreaseIndent", command_util("decreaseIndent"))
}
