//! Tests run in a wasm runtime (`wasm-pack test --node`)

#![cfg(target_arch = "wasm32")]

use proseline_wasm::{apply_commands_js, render_email_js, EditorSession};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn test_render_email_js() {
    let html = render_email_js(
        r#"[{"type":"heading-one","children":[{"text":"Hello"}]}]"#,
        None,
        None,
    )
    .unwrap();
    assert!(html.contains(">Hello</h1>"));
}

#[wasm_bindgen_test]
fn test_apply_commands_js() {
    let result = apply_commands_js(r#"[]"#, r#"[{"command":"deselect"}]"#).unwrap();
    assert!(result.contains("\"outputs\":[null]"));
}

#[wasm_bindgen_test]
fn test_editor_session() {
    let session = EditorSession::new(r#"[]"#, None).unwrap();
    session
        .call(
            "select",
            r#"{"anchor":{"path":[0,0],"offset":0},"focus":{"path":[0,0],"offset":0}}"#,
        )
        .unwrap();
    session.call("insertText", r#"{"text":"typed"}"#).unwrap();

    assert!(session.render().contains("typed"));
    assert!(session.save().unwrap().contains("typed"));
    assert!(session.block_menu().contains("\"label\":\"Text\""));
}
