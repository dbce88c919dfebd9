use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for document files
    #[arg(short, long, default_value = "documents")]
    pub src_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

const EXAMPLE_DOCUMENT: &str = r#"[
  { "type": "heading-one", "children": [{ "text": "Hello from Proseline" }] },
  { "type": "paragraph", "children": [
    { "text": "Edit this document, then run " },
    { "text": "proseline render", "code": true },
    { "text": "." }
  ]},
  { "type": "bulleted-list", "children": [
    { "type": "list-item", "children": [{ "text": "Lists" }] },
    { "type": "list-item", "children": [{ "text": "Columns and images" }] }
  ]}
]
"#;

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Proseline project...".bright_blue().bold()
    );

    let src_dir = cwd.join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let example_file = src_dir.join("welcome.json");
    if !example_file.exists() {
        fs::write(&example_file, EXAMPLE_DOCUMENT)?;
        println!("  {} Created welcome.json", "✓".green());
    }

    let config = Config {
        src_dir: args.src_dir.clone(),
        out_dir: Some("dist".to_string()),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/welcome.json", args.src_dir);
    println!("  2. Run: proseline render");
    println!("  3. Check output in dist/");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proseline_schema::Document;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_project() {
        let dir = TempDir::new().unwrap();
        init(
            InitArgs {
                src_dir: "docs".into(),
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.src_dir, "docs");
        let example = fs::read_to_string(dir.path().join("docs/welcome.json")).unwrap();
        assert!(Document::from_json(&example).is_ok());
    }
}
