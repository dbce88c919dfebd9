use super::{load_document, write_output};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use proseline_editor::{Command, CommandOutput, Editor};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Document file to edit
    pub document: PathBuf,

    /// JSON file holding an array of commands
    pub commands: PathBuf,

    /// Write the edited document here (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite the input document
    #[arg(long, conflicts_with = "output")]
    pub in_place: bool,
}

/// Run a command script against a document
pub fn apply(args: ApplyArgs, cwd: &Path) -> Result<()> {
    let document_path = cwd.join(&args.document);
    let document = load_document(&document_path)?;

    let commands_path = cwd.join(&args.commands);
    let script = fs::read_to_string(&commands_path)
        .with_context(|| format!("Cannot read {}", commands_path.display()))?;
    let commands: Vec<Command> = serde_json::from_str(&script)
        .with_context(|| format!("Invalid command script {}", commands_path.display()))?;

    let (json, outputs) = run_script(document, commands)?;

    for (index, output) in outputs.iter().enumerate() {
        if *output != CommandOutput::None {
            eprintln!(
                "  {} command {}: {}",
                "→".bright_blue(),
                index,
                serde_json::to_string(output)?
            );
        }
    }

    let target = if args.in_place {
        Some(document_path)
    } else {
        args.output.map(|p| cwd.join(p))
    };
    match target {
        Some(path) => {
            write_output(&path, &json)?;
            eprintln!("{} Wrote {}", "✓".green(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub(crate) fn run_script(
    document: proseline_schema::Document,
    commands: Vec<Command>,
) -> Result<(String, Vec<CommandOutput>)> {
    let mut editor = Editor::with_document(document);
    let count = commands.len();
    let outputs = editor.execute_all(commands);
    info!(commands = count, version = editor.version(), "Applied command script");
    Ok((editor.save_json()?, outputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proseline_schema::Document;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_run_script() {
        let commands: Vec<Command> = serde_json::from_value(json!([
            { "command": "select", "anchor": { "path": [0, 0], "offset": 0 }, "focus": { "path": [0, 0], "offset": 0 } },
            { "command": "insertText", "text": "Hi" },
            { "command": "isLinkActive" }
        ]))
        .unwrap();

        let (json, outputs) = run_script(Document::empty(), commands).unwrap();
        assert!(json.contains("\"Hi\""));
        assert_eq!(outputs[2], CommandOutput::Bool(false));
    }

    #[test]
    fn test_apply_in_place() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("doc.json"),
            r#"[{ "type": "paragraph", "children": [{ "text": "a" }] }, { "type": "paragraph", "children": [{ "text": "b" }] }]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("script.json"),
            r#"[{ "command": "moveBlockDown", "path": [0] }]"#,
        )
        .unwrap();

        let args = ApplyArgs {
            document: "doc.json".into(),
            commands: "script.json".into(),
            output: None,
            in_place: true,
        };
        apply(args, dir.path()).unwrap();

        let saved = Document::from_json(&fs::read_to_string(dir.path().join("doc.json")).unwrap()).unwrap();
        assert_eq!(saved.children[0].text_content(), "b");
        assert_eq!(saved.children[1].text_content(), "a");
    }
}
