use proseline_compiler_email::{compile_to_email, CompileOptions, ComponentsMap};
use proseline_editor::{Command, Editor};
use proseline_schema::{Document, Theme};
use proseline_surface::plugins::theme_plugin;
use proseline_surface::{default_plugins, Composition, Session};
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

fn parse_theme(theme_json: Option<String>) -> Result<Theme, String> {
    match theme_json {
        Some(json) if !json.trim().is_empty() => {
            serde_json::from_str(&json).map_err(|e| format!("Theme error: {}", e))
        }
        _ => Ok(Theme::default()),
    }
}

fn parse_options(options_json: Option<String>) -> Result<CompileOptions, String> {
    match options_json {
        Some(json) if !json.trim().is_empty() => {
            serde_json::from_str(&json).map_err(|e| format!("Options error: {}", e))
        }
        _ => Ok(CompileOptions::default()),
    }
}

pub fn render_email(
    document_json: &str,
    theme_json: Option<String>,
    options_json: Option<String>,
) -> Result<String, String> {
    let document = Document::from_json(document_json).map_err(|e| format!("Load error: {}", e))?;
    let theme = parse_theme(theme_json)?;
    let options = parse_options(options_json)?;

    compile_to_email(&document, &ComponentsMap::standard(), &theme, options)
        .map_err(|e| format!("Compile error: {}", e))
}

/// Compile a document (JSON) to email HTML
#[wasm_bindgen(js_name = renderEmail)]
pub fn render_email_js(
    document_json: &str,
    theme_json: Option<String>,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    render_email(document_json, theme_json, options_json).map_err(|e| JsValue::from_str(&e))
}

#[derive(Serialize)]
struct ApplyOutput {
    document: serde_json::Value,
    outputs: Vec<proseline_editor::CommandOutput>,
}

pub fn apply_commands(document_json: &str, commands_json: &str) -> Result<String, String> {
    let document = Document::from_json(document_json).map_err(|e| format!("Load error: {}", e))?;
    let commands: Vec<Command> =
        serde_json::from_str(commands_json).map_err(|e| format!("Command error: {}", e))?;

    let mut editor = Editor::with_document(document);
    let outputs = editor.execute_all(commands);
    let document = serde_json::to_value(editor.document())
        .map_err(|e| format!("Serialization error: {}", e))?;

    serde_json::to_string(&ApplyOutput { document, outputs })
        .map_err(|e| format!("Serialization error: {}", e))
}

/// Run a command script; returns `{ document, outputs }` as JSON
#[wasm_bindgen(js_name = applyCommands)]
pub fn apply_commands_js(document_json: &str, commands_json: &str) -> Result<String, JsValue> {
    apply_commands(document_json, commands_json).map_err(|e| JsValue::from_str(&e))
}

/// A live editing session with the built-in plugins
#[wasm_bindgen]
pub struct EditorSession {
    session: Session,
}

#[wasm_bindgen]
impl EditorSession {
    #[wasm_bindgen(constructor)]
    pub fn new(document_json: &str, theme_json: Option<String>) -> Result<EditorSession, JsValue> {
        let document =
            Document::from_json(document_json).map_err(|e| js_error("Load error", e))?;
        let mut plugins = default_plugins();
        if theme_json.is_some() {
            let theme = parse_theme(theme_json).map_err(|e| JsValue::from_str(&e))?;
            plugins.push(theme_plugin(theme));
        }

        let composition = Rc::new(Composition::new(plugins));
        Ok(EditorSession {
            session: composition.create_session(document),
        })
    }

    /// Call a util by name with JSON arguments; returns its JSON result
    pub fn call(&self, name: &str, args_json: &str) -> Result<String, JsValue> {
        let args = if args_json.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(args_json).map_err(|e| js_error("Argument error", e))?
        };
        let result = self
            .session
            .call(name, args)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown util: {}", name)))?;
        Ok(result.to_string())
    }

    /// Current surface as HTML
    pub fn render(&self) -> String {
        self.session.render_html()
    }

    pub fn load(&self, document_json: &str) -> Result<(), JsValue> {
        self.session
            .editor_mut()
            .load_json(document_json)
            .map_err(|e| js_error("Load error", e))
    }

    pub fn save(&self) -> Result<String, JsValue> {
        self.session
            .editor()
            .save_json()
            .map_err(|e| js_error("Serialization error", e))
    }

    /// Conversion targets as `[{ "type", "label" }]`
    #[wasm_bindgen(js_name = blockMenu)]
    pub fn block_menu(&self) -> String {
        let entries: Vec<serde_json::Value> = self
            .session
            .composition()
            .block_menu_entries()
            .into_iter()
            .map(|(kind, label)| serde_json::json!({ "type": kind, "label": label }))
            .collect();
        serde_json::Value::Array(entries).to_string()
    }
}
