use super::{find_documents, load_document};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use proseline_schema::{Document, ElementType, Node};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Document file or directory (defaults to the configured source directory)
    pub input: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub level: Level,
    pub path: String,
    pub message: String,
}

/// Load every document and report problems either renderer would show
pub fn check(args: CheckArgs, cwd: &Path) -> Result<()> {
    if args.format != "text" && args.format != "json" {
        return Err(anyhow!("Unknown format: {}. Use: text or json", args.format));
    }

    let config = Config::load(cwd)?;
    let input = args
        .input
        .as_ref()
        .map(|p| cwd.join(p))
        .unwrap_or_else(|| config.get_src_dir(cwd));

    let files = if input.is_file() {
        vec![input.clone()]
    } else if input.is_dir() {
        find_documents(&input)
    } else {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    };

    let text = args.format == "text";
    let mut total_errors = 0;
    let mut total_warnings = 0;

    for file in &files {
        let findings = match load_document(file) {
            Ok(document) => check_document(&document),
            Err(e) => vec![Finding {
                level: Level::Error,
                path: String::new(),
                message: e.to_string(),
            }],
        };

        total_errors += findings.iter().filter(|f| f.level == Level::Error).count();
        total_warnings += findings.iter().filter(|f| f.level == Level::Warning).count();

        if text {
            print_findings(file, &findings);
        } else {
            println!(
                "{}",
                serde_json::json!({ "file": file.display().to_string(), "findings": findings })
            );
        }
    }

    if text {
        println!();
        println!("   Files checked: {}", files.len());
        if total_errors > 0 {
            println!("   {} {}", "Errors:".red(), total_errors);
        }
        if total_warnings > 0 {
            println!("   {} {}", "Warnings:".yellow(), total_warnings);
        }
    }

    if total_errors > 0 {
        return Err(anyhow!("{} errors found", total_errors));
    }
    Ok(())
}

fn print_findings(file: &Path, findings: &[Finding]) {
    if findings.is_empty() {
        println!("  {} {}", "✓".green(), file.display());
        return;
    }
    println!("  {} {}", "✗".red(), file.display());
    for finding in findings {
        let label = match finding.level {
            Level::Error => "error".red().bold(),
            Level::Warning => "warning".yellow().bold(),
        };
        println!("     {} at {}: {}", label, finding.path, finding.message);
    }
}

/// Structural problems in a loaded document
pub fn check_document(document: &Document) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (path, node) in document.descendants() {
        let Node::Element(element) = node else {
            continue;
        };
        let mut report = |level: Level, message: String| {
            findings.push(Finding {
                level,
                path: path.to_string(),
                message,
            })
        };

        match &element.kind {
            ElementType::Unknown(_) => {
                report(Level::Warning, element.kind.fallback_label());
            }
            ElementType::Link if element.attrs.url.is_none() => {
                report(Level::Error, "Link has no url".to_string());
            }
            ElementType::Image if element.attrs.url.as_deref().unwrap_or_default().is_empty() => {
                report(Level::Warning, "Image has no url".to_string());
            }
            ElementType::LayoutContainer => {
                let columns = element.children.len();
                if element.attrs.columns.is_some_and(|n| n as usize != columns) {
                    report(
                        Level::Warning,
                        format!("`columns` does not match its {} columns", columns),
                    );
                }
                if element
                    .attrs
                    .column_widths
                    .as_ref()
                    .is_some_and(|widths| widths.len() != columns)
                {
                    report(
                        Level::Warning,
                        format!("`columnWidths` does not match its {} columns", columns),
                    );
                }
            }
            _ => {}
        }

        if element.kind.is_list() {
            let stray = element
                .children
                .iter()
                .any(|child| child.kind() != Some(&ElementType::ListItem));
            if stray {
                report(Level::Warning, "List contains non list-item children".to_string());
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_document_has_no_findings() {
        let document = Document::from_value(json!([
            { "type": "paragraph", "children": [{ "text": "ok" }] }
        ]))
        .unwrap();
        assert!(check_document(&document).is_empty());
    }

    #[test]
    fn test_findings() {
        let document = Document::from_value(json!([
            { "type": "gallery", "children": [{ "text": "" }] },
            { "type": "layout-container", "columns": 3, "children": [
                { "type": "layout-column", "children": [
                    { "type": "image", "children": [{ "text": "" }] }
                ]}
            ]},
            { "type": "paragraph", "children": [
                { "text": "" },
                { "type": "link", "children": [{ "text": "x" }] },
                { "text": "" }
            ]}
        ]))
        .unwrap();

        let findings = check_document(&document);
        let messages: Vec<(&str, &Level)> = findings
            .iter()
            .map(|f| (f.message.as_str(), &f.level))
            .collect();

        assert!(messages.contains(&("Unsupported block type: gallery", &Level::Warning)));
        assert!(messages.contains(&("`columns` does not match its 1 columns", &Level::Warning)));
        assert!(messages.contains(&("Image has no url", &Level::Warning)));
        assert!(messages.contains(&("Link has no url", &Level::Error)));

        let link = findings.iter().find(|f| f.level == Level::Error).unwrap();
        assert_eq!(link.path, "[2, 1]");
    }
}
