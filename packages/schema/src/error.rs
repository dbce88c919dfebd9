use thiserror::Error;

pub type LoadResult<T> = Result<T, LoadError>;

/// Failure to load a serialized document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    /// Not well-formed JSON
    #[error("Syntax error at {line}:{column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    /// Well-formed JSON that is not a document tree
    #[error("Invalid document at {line}:{column}: {message}")]
    Shape {
        message: String,
        line: usize,
        column: usize,
    },
}

impl LoadError {
    pub fn message(&self) -> &str {
        match self {
            LoadError::Syntax { message, .. } | LoadError::Shape { message, .. } => message,
        }
    }

    /// 1-based line and column of the failure
    pub fn position(&self) -> (usize, usize) {
        match self {
            LoadError::Syntax { line, column, .. } | LoadError::Shape { line, column, .. } => {
                (*line, *column)
            }
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        use serde_json::error::Category;

        // serde_json appends " at line X column Y" to Display; keep the bare message
        let full = e.to_string();
        let message = match full.rfind(" at line ") {
            Some(idx) => full[..idx].to_string(),
            None => full,
        };
        let (line, column) = (e.line(), e.column());

        match e.classify() {
            Category::Syntax | Category::Eof | Category::Io => LoadError::Syntax {
                message,
                line,
                column,
            },
            Category::Data => LoadError::Shape {
                message,
                line,
                column,
            },
        }
    }
}

/// Source-excerpt reports for load errors
#[cfg(feature = "pretty-errors")]
pub mod pretty {
    use super::LoadError;
    use ariadne::{Color, Config, Label, Report, ReportKind, Source};

    /// Render a load error against the source it came from
    pub fn format_error(error: &LoadError, file_name: &str, source: &str) -> String {
        render(error, file_name, source, true)
    }

    /// Same report without ANSI colors (for files and logs)
    pub fn format_error_plain(error: &LoadError, file_name: &str, source: &str) -> String {
        render(error, file_name, source, false)
    }

    fn render(error: &LoadError, file_name: &str, source: &str, color: bool) -> String {
        let (line, column) = error.position();
        let offset = byte_offset(source, line, column);
        let end = (offset + 1).min(source.len());
        let span = offset.min(end)..end;

        let title = match error {
            LoadError::Syntax { .. } => "Malformed document",
            LoadError::Shape { .. } => "Invalid document tree",
        };

        let mut buffer = Vec::new();
        let written = Report::build(ReportKind::Error, file_name, offset)
            .with_config(Config::default().with_color(color))
            .with_message(title)
            .with_label(
                Label::new((file_name, span))
                    .with_message(error.message())
                    .with_color(Color::Red),
            )
            .finish()
            .write((file_name, Source::from(source.to_string())), &mut buffer);

        match written {
            Ok(()) => String::from_utf8_lossy(&buffer).into_owned(),
            Err(_) => error.to_string(),
        }
    }

    /// Byte offset of a 1-based line/column pair (clamped to the source)
    fn byte_offset(source: &str, line: usize, column: usize) -> usize {
        let line_start: usize = source
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum();
        (line_start + column.saturating_sub(1)).min(source.len())
    }

}
