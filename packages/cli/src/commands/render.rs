use super::{find_documents, load_document, write_output};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use proseline_compiler_email::{compile_to_email, CompileOptions, ComponentsMap};
use proseline_schema::Theme;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Document file or directory (defaults to the configured source directory)
    pub path: Option<PathBuf>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Theme JSON file (overrides config)
    #[arg(long)]
    pub theme: Option<PathBuf>,

    /// Email <title>
    #[arg(long)]
    pub title: Option<String>,

    /// Hidden preview text shown by inbox lists
    #[arg(long)]
    pub preheader: Option<String>,
}

/// Render documents to email HTML
pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let theme = config.resolve_theme(args.theme.as_deref())?;
    let root = args
        .path
        .as_ref()
        .map(|p| cwd.join(p))
        .unwrap_or_else(|| config.get_src_dir(cwd));

    if !root.exists() {
        return Err(anyhow!("Path does not exist: {}", root.display()));
    }

    let (documents, base) = if root.is_file() {
        let base = root.parent().map(Path::to_path_buf).unwrap_or_default();
        (vec![root.clone()], base)
    } else {
        (find_documents(&root), root.clone())
    };

    if documents.is_empty() {
        println!("{}", "⚠️  No documents found".yellow());
        return Ok(());
    }

    if !args.stdout {
        println!("{}", "✉️  Rendering emails...".bright_blue().bold());
    }

    let out_dir = args
        .out_dir
        .as_ref()
        .map(|p| cwd.join(p))
        .unwrap_or_else(|| config.get_out_dir(cwd));
    let components = ComponentsMap::standard();
    let options = CompileOptions {
        pretty: config.pretty,
        title: args.title.clone(),
        preheader: args.preheader.clone(),
        ..CompileOptions::default()
    };

    let mut success_count = 0;
    let mut error_count = 0;

    for path in &documents {
        let relative_path = path.strip_prefix(&base).unwrap_or(path);
        match render_file(path, &components, &theme, options.clone()) {
            Ok(html) if args.stdout => {
                success_count += 1;
                println!("{}", html);
            }
            Ok(html) => {
                let output_file = out_dir.join(relative_path).with_extension("html");
                write_output(&output_file, &html)?;
                success_count += 1;
                println!(
                    "  {} {} → {}",
                    "✓".green(),
                    relative_path.display(),
                    output_file.display()
                );
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    if args.stdout {
        return if error_count == 0 {
            Ok(())
        } else {
            Err(anyhow!("{} documents failed to render", error_count))
        };
    }

    println!();
    if error_count == 0 {
        println!("{} Rendered {} documents", "✅".green(), success_count);
        Ok(())
    } else {
        println!(
            "{} Rendered {} documents, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
        Err(anyhow!("{} documents failed to render", error_count))
    }
}

pub(crate) fn render_file(
    path: &Path,
    components: &ComponentsMap,
    theme: &Theme,
    options: CompileOptions,
) -> Result<String> {
    let document = load_document(path)?;
    debug!(path = %path.display(), blocks = document.children.len(), "Loaded document");
    Ok(compile_to_email(&document, components, theme, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_directory_into_out_dir() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("documents");
        fs::create_dir_all(src.join("weekly")).unwrap();
        fs::write(
            src.join("weekly/issue-1.json"),
            r#"[{ "type": "heading-one", "children": [{ "text": "Issue 1" }] }]"#,
        )
        .unwrap();

        let args = RenderArgs {
            path: None,
            stdout: false,
            out_dir: None,
            theme: None,
            title: Some("Issue 1".into()),
            preheader: None,
        };
        render(args, dir.path()).unwrap();

        let html = fs::read_to_string(dir.path().join("dist/weekly/issue-1.html")).unwrap();
        assert!(html.contains("<title>Issue 1</title>"));
        assert!(html.contains(">Issue 1</h1>"));
    }

    #[test]
    fn test_render_reports_failures() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("documents");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("bad.json"), "not json").unwrap();

        let args = RenderArgs {
            path: None,
            stdout: false,
            out_dir: None,
            theme: None,
            title: None,
            preheader: None,
        };
        assert!(render(args, dir.path()).is_err());
    }
}
