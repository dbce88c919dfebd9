//! Util factories that route through the editor's [`Command`] values.
//!
//! A bound util takes a JSON object of arguments, turns it into a command
//! and executes it on the session's editor. Arguments that do not describe
//! a valid command make the call a no-op returning `null`, matching the
//! silent no-op rule of the commands themselves.

use crate::plugin::{BoundUtil, EditorHandle, UtilFactory};
use proseline_editor::{BlockStyle, Command};
use serde_json::{Map, Value};
use std::rc::Rc;
use tracing::debug;

/// A util that executes the command named `name`
pub fn command_util(name: &'static str) -> UtilFactory {
    Rc::new(move |editor: EditorHandle| -> BoundUtil {
        Rc::new(move |args: Value| {
            let mut fields = match args {
                Value::Object(fields) => fields,
                Value::Null => Map::new(),
                other => {
                    debug!(util = name, args = %other, "Ignored non-object util arguments");
                    return Value::Null;
                }
            };
            fields.insert("command".into(), Value::String(name.into()));

            match serde_json::from_value::<Command>(Value::Object(fields)) {
                Ok(command) => execute(&editor, command),
                Err(err) => {
                    debug!(util = name, error = %err, "Invalid util arguments");
                    Value::Null
                }
            }
        })
    })
}

/// A util that sets one block-styling attribute from `{"value": ...}`
pub fn block_style_util(style: BlockStyle) -> UtilFactory {
    Rc::new(move |editor: EditorHandle| -> BoundUtil {
        Rc::new(move |args: Value| {
            let value = args.get("value").and_then(Value::as_str).map(str::to_string);
            execute(&editor, Command::SetBlockStyle { style, value })
        })
    })
}

fn execute(editor: &EditorHandle, command: Command) -> Value {
    let output = editor.borrow_mut().execute(command);
    serde_json::to_value(output).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proseline_editor::{Editor, Point, Selection};
    use serde_json::json;
    use std::cell::RefCell;

    fn handle() -> EditorHandle {
        let mut editor = Editor::default();
        editor.select(Selection::caret(Point::new(vec![0, 0], 0)));
        Rc::new(RefCell::new(editor))
    }

    #[test]
    fn test_command_util_executes() {
        let editor = handle();
        let insert = command_util("insertText")(editor.clone());
        let active = command_util("isMarkActive")(editor.clone());

        assert_eq!(insert(json!({ "text": "hi" })), Value::Null);
        assert_eq!(active(json!({ "mark": "bold" })), json!(false));
        assert_eq!(editor.borrow().document().children[0].text_content(), "hi");
    }

    #[test]
    fn test_bad_arguments_are_a_no_op() {
        let editor = handle();
        let insert = command_util("insertText")(editor.clone());

        assert_eq!(insert(json!({ "txt": "hi" })), Value::Null);
        assert_eq!(insert(json!("hi")), Value::Null);
        assert_eq!(editor.borrow().version(), 0);
    }

    #[test]
    fn test_block_style_util() {
        let editor = handle();
        let set_padding = block_style_util(BlockStyle::Padding)(editor.clone());
        let get = command_util("getBlockStyles")(editor.clone());

        set_padding(json!({ "value": "12px" }));
        assert_eq!(get(Value::Null), json!({ "padding": "12px" }));

        set_padding(json!({}));
        assert_eq!(get(Value::Null), json!({}));
    }
}
