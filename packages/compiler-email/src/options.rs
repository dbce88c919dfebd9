use serde::{Deserialize, Serialize};

/// Options for email compilation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Pretty print the document shell
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Contents of `<title>`
    pub title: Option<String>,
    /// Hidden inbox preview text
    pub preheader: Option<String>,
    /// Width of the centred body table, in pixels
    pub container_width: u32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            title: None,
            preheader: None,
            container_width: 600,
        }
    }
}
