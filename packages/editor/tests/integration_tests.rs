//! Integration tests for editor crate

use proseline_editor::{Command, CommandOutput, Document, Editor, ElementType, Path, Point, Selection};
use proseline_schema::{Node, TextAlign};
use serde_json::json;

fn editor(value: serde_json::Value) -> Editor {
    Editor::with_document(Document::from_value(value).unwrap())
}

fn kinds(editor: &Editor) -> Vec<String> {
    editor
        .document()
        .children
        .iter()
        .map(|node| node.kind().map(|k| k.tag().to_string()).unwrap_or_default())
        .collect()
}

#[test]
fn test_document_lifecycle() {
    let mut editor = Editor::default();
    assert_eq!(editor.version(), 0);
    assert_eq!(editor.document().children, vec![Node::empty_paragraph()]);

    editor.select(Selection::caret(Point::new(vec![0, 0], 0)));
    editor.insert_text("Hello");
    assert_eq!(editor.version(), 1);

    let saved = editor.save_json().unwrap();
    let mut other = Editor::default();
    other.load_json(&saved).unwrap();
    assert_eq!(other.document(), editor.document());
}

#[test]
fn test_convert_round_trip_is_lossy_for_lists() {
    let mut editor = editor(json!([
        { "type": "paragraph", "align": "right", "lineHeight": "2", "font": "Georgia", "indent": 2,
          "children": [{ "text": "first" }] }
    ]));
    let path = Path::new(vec![0]);

    editor.convert_block(&path, ElementType::BulletedList);
    editor.duplicate_block(&Path::new(vec![0, 0]));
    editor.insert_text("second ");
    assert_eq!(
        editor.document().node(&Path::new(vec![0, 1])).unwrap().text_content(),
        "second first"
    );
    editor.convert_block(&path, ElementType::Paragraph);

    let block = editor.document().element(&path).unwrap();
    assert_eq!(block.kind, ElementType::Paragraph);
    assert_eq!(block.attrs.align, Some(TextAlign::Right));
    assert_eq!(block.attrs.line_height.as_deref(), Some("2"));
    assert_eq!(block.attrs.font.as_deref(), Some("Georgia"));
    assert_eq!(block.attrs.indent, Some(2));
    // only the first item's content survives
    assert_eq!(block.text_content(), "first");
}

#[test]
fn test_convert_multi_leaf_paragraph_wraps_each_child() {
    let mut editor = editor(json!([
        { "type": "paragraph", "children": [
            { "text": "a" },
            { "text": "b", "bold": true },
            { "text": "c" }
        ]}
    ]));
    let path = Path::new(vec![0]);

    editor.convert_block(&path, ElementType::BulletedList);
    let list = editor.document().element(&path).unwrap();
    assert_eq!(list.children.len(), 3);
    assert!(list
        .children
        .iter()
        .all(|item| item.kind() == Some(&ElementType::ListItem)));

    editor.convert_block(&path, ElementType::Paragraph);
    assert_eq!(editor.document().element(&path).unwrap().text_content(), "a");
}

#[test]
fn test_delete_last_block_leaves_empty_paragraph() {
    let mut editor = editor(json!([
        { "type": "heading-one", "children": [{ "text": "Title" }] }
    ]));
    editor.delete_block(&Path::new(vec![0]));
    assert_eq!(editor.document().children, vec![Node::empty_paragraph()]);

    let mut editor = editor_with_column();
    let only = Path::new(vec![0, 0, 0]);
    editor.delete_block(&only);
    let column = editor.document().element(&Path::new(vec![0, 0])).unwrap();
    assert_eq!(column.children, vec![Node::empty_paragraph()]);
}

fn editor_with_column() -> Editor {
    editor(json!([
        { "type": "layout-container", "columns": 1, "children": [
            { "type": "layout-column", "children": [
                { "type": "block-quote", "children": [{ "text": "quoted" }] }
            ]}
        ]}
    ]))
}

#[test]
fn test_move_boundaries_are_no_ops() {
    let mut editor = editor(json!([
        { "type": "paragraph", "children": [{ "text": "a" }] },
        { "type": "paragraph", "children": [{ "text": "b" }] }
    ]));
    let before = editor.save_json().unwrap();

    editor.move_block_up(&Path::new(vec![0]));
    editor.move_block_down(&Path::new(vec![1]));
    assert_eq!(editor.save_json().unwrap(), before);
    assert_eq!(editor.version(), 0);
}

#[test]
fn test_move_down_swaps_and_tracks_caret() {
    let mut editor = editor(json!([
        { "type": "paragraph", "children": [{ "text": "a" }] },
        { "type": "paragraph", "children": [{ "text": "b" }] }
    ]));
    editor.select(Selection::caret(Point::new(vec![0, 0], 1)));
    editor.move_block_down(&Path::new(vec![0]));

    assert_eq!(editor.document().children[0].text_content(), "b");
    assert_eq!(editor.document().children[1].text_content(), "a");
    assert_eq!(editor.selection().unwrap().anchor, Point::new(vec![1, 0], 1));
}

#[test]
fn test_duplicate_is_a_deep_copy() {
    let mut editor = editor(json!([
        { "type": "paragraph", "children": [{ "text": "orig" }] }
    ]));
    editor.duplicate_block(&Path::new(vec![0]));
    assert_eq!(editor.selection().unwrap().anchor, Point::new(vec![1, 0], 0));

    editor.insert_text("new ");
    assert_eq!(editor.document().children[0].text_content(), "orig");
    assert_eq!(editor.document().children[1].text_content(), "new orig");
}

#[test]
fn test_insert_layout_into_empty_document() {
    let mut editor = Editor::default();
    editor.insert_layout(2);

    assert_eq!(kinds(&editor), vec!["paragraph", "layout-container", "paragraph"]);
    let container = editor.document().element(&Path::new(vec![1])).unwrap();
    assert_eq!(container.attrs.columns, Some(2));
    for column in &container.children {
        let column = column.as_element().unwrap();
        assert_eq!(column.kind, ElementType::LayoutColumn);
        assert_eq!(column.children, vec![Node::empty_paragraph()]);
    }
}

#[test]
fn test_command_script_end_to_end() {
    let mut editor = Editor::default();
    let commands: Vec<Command> = serde_json::from_value(json!([
        { "command": "select", "anchor": { "path": [0, 0], "offset": 0 }, "focus": { "path": [0, 0], "offset": 0 } },
        { "command": "insertText", "text": "Weekly update" },
        { "command": "convertBlock", "path": [0], "to": "heading-one" },
        { "command": "setAlign", "align": "center" },
        { "command": "insertLayout", "columns": 2 },
        { "command": "insertText", "text": "Left" },
        { "command": "isMarkActive", "mark": "bold" },
        { "command": "getBlockStyles" }
    ]))
    .unwrap();

    let outputs = editor.execute_all(commands);
    assert_eq!(outputs[6], CommandOutput::Bool(false));
    assert_eq!(
        kinds(&editor),
        vec!["heading-one", "layout-container", "paragraph"]
    );
    let heading = editor.document().element(&Path::new(vec![0])).unwrap();
    assert_eq!(heading.attrs.align, Some(TextAlign::Center));
    assert_eq!(
        editor.document().node(&Path::new(vec![1, 0, 0])).unwrap().text_content(),
        "Left"
    );
}
