use super::{load_document, write_output};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use proseline_schema::{Document, Theme};
use proseline_surface::plugins::theme_plugin;
use proseline_surface::{default_plugins, Composition};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Document file
    pub document: PathBuf,

    /// Write the preview here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Theme JSON file (overrides config)
    #[arg(long)]
    pub theme: Option<PathBuf>,
}

/// Render a document the way the editing surface shows it
pub fn preview(args: PreviewArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let theme = config.resolve_theme(args.theme.as_deref())?;
    let document = load_document(&cwd.join(&args.document))?;

    let page = preview_page(&document, theme);

    match args.output {
        Some(output) => {
            let output = cwd.join(output);
            write_output(&output, &page)?;
            println!("{} Preview written to {}", "✓".green(), output.display());
        }
        None => println!("{}", page),
    }
    Ok(())
}

pub(crate) fn preview_page(document: &Document, theme: Theme) -> String {
    let mut plugins = default_plugins();
    plugins.push(theme_plugin(theme));
    let surface = Composition::new(plugins).render_document(document, None);

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n<title>Proseline preview</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        surface.to_html()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preview_page_uses_theme() {
        let document = Document::from_value(json!([
            { "type": "paragraph", "children": [{ "text": "Hello" }] }
        ]))
        .unwrap();

        let page = preview_page(&document, Theme::new("#abcdef"));
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("data-theme=\"#abcdef\""));
        assert!(page.contains("Hello"));
    }
}
