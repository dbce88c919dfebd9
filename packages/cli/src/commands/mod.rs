pub mod apply;
pub mod check;
pub mod init;
pub mod preview;
pub mod render;

pub use apply::{apply, ApplyArgs};
pub use check::{check, CheckArgs};
pub use init::{init, InitArgs};
pub use preview::{preview, PreviewArgs};
pub use render::{render, RenderArgs};

use anyhow::{anyhow, Context, Result};
use proseline_schema::error::pretty;
use proseline_schema::Document;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read and parse a document file, with a source-excerpt report on failure
pub(crate) fn load_document(path: &Path) -> Result<Document> {
    let source =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;

    Document::from_json(&source).map_err(|e| {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        anyhow!("\n{}", pretty::format_error(&e, file_name, &source))
    })
}

/// Every `.json` document under `dir`, in a stable order
pub(crate) fn find_documents(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    files.sort();
    files
}

/// Write `content` to `path`, creating parent directories
pub(crate) fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Cannot write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_documents_is_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.json"), "[]").unwrap();
        fs::write(dir.path().join("a.json"), "[]").unwrap();
        fs::write(dir.path().join("nested/c.json"), "[]").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let found: Vec<String> = find_documents(dir.path())
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(found, vec!["a.json", "b.json", "nested/c.json"]);
    }

    #[test]
    fn test_load_error_is_reported_with_file_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[{\"type\": }]").unwrap();

        let err = load_document(&path).unwrap_err().to_string();
        assert!(err.contains("broken.json"));
    }
}
