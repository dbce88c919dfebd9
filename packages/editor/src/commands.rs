//! # Serializable Commands
//!
//! Every editor operation as a plain value, so command sequences can be
//! stored in files, sent across the wasm boundary or replayed in tests.
//!
//! ```json
//! { "command": "select", "anchor": { "path": [0, 0], "offset": 0 }, "focus": { "path": [0, 0], "offset": 5 } }
//! { "command": "toggleMark", "mark": "bold" }
//! { "command": "insertLayout", "columns": 2, "columnWidths": ["1fr", "2fr"] }
//! ```

use crate::editor::Editor;
use crate::formatting::{BlockStyle, BlockStyles};
use crate::layout::LayoutSpec;
use crate::selection::{Point, Selection};
use proseline_schema::{ElementType, Mark, Path, TextAlign};
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    Select {
        anchor: Point,
        focus: Point,
    },
    Deselect,

    // Blocks
    ConvertBlock {
        path: Path,
        to: ElementType,
    },
    DuplicateBlock {
        path: Path,
    },
    DeleteBlock {
        path: Path,
    },
    MoveBlockUp {
        path: Path,
    },
    MoveBlockDown {
        path: Path,
    },
    InsertBlockAfter {
        path: Path,
        #[serde(rename = "type", default = "default_block_type")]
        kind: ElementType,
    },

    // Block attributes
    SetBlockStyle {
        style: BlockStyle,
        value: Option<String>,
    },
    ClearBlockStyles,
    GetBlockStyles,
    IncreaseIndent,
    DecreaseIndent,
    SetAlign {
        align: Option<TextAlign>,
    },
    #[serde(rename_all = "camelCase")]
    SetLineHeight {
        line_height: Option<String>,
    },
    SetFont {
        font: Option<String>,
    },

    // Layout and media
    InsertLayout(LayoutSpec),
    AddColumn {
        path: Path,
    },
    RemoveColumn {
        path: Path,
        index: usize,
    },
    InsertImage {
        url: String,
        #[serde(default)]
        alt: Option<String>,
    },
    UpdateImage {
        path: Path,
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        alt: Option<String>,
    },

    // Inline
    InsertLink {
        url: String,
    },
    RemoveLink,
    IsLinkActive,
    ToggleMark {
        mark: Mark,
    },
    IsMarkActive {
        mark: Mark,
    },
    InsertText {
        text: String,
    },
}

fn default_block_type() -> ElementType {
    ElementType::Paragraph
}

/// What a command hands back: nothing for mutations, a value for queries
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    None,
    Bool(bool),
    BlockStyles(BlockStyles),
}

impl Command {
    /// Name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Select { .. } => "select",
            Command::Deselect => "deselect",
            Command::ConvertBlock { .. } => "convertBlock",
            Command::DuplicateBlock { .. } => "duplicateBlock",
            Command::DeleteBlock { .. } => "deleteBlock",
            Command::MoveBlockUp { .. } => "moveBlockUp",
            Command::MoveBlockDown { .. } => "moveBlockDown",
            Command::InsertBlockAfter { .. } => "insertBlockAfter",
            Command::SetBlockStyle { .. } => "setBlockStyle",
            Command::ClearBlockStyles => "clearBlockStyles",
            Command::GetBlockStyles => "getBlockStyles",
            Command::IncreaseIndent => "increaseIndent",
            Command::DecreaseIndent => "decreaseIndent",
            Command::SetAlign { .. } => "setAlign",
            Command::SetLineHeight { .. } => "setLineHeight",
            Command::SetFont { .. } => "setFont",
            Command::InsertLayout(_) => "insertLayout",
            Command::AddColumn { .. } => "addColumn",
            Command::RemoveColumn { .. } => "removeColumn",
            Command::InsertImage { .. } => "insertImage",
            Command::UpdateImage { .. } => "updateImage",
            Command::InsertLink { .. } => "insertLink",
            Command::RemoveLink => "removeLink",
            Command::IsLinkActive => "isLinkActive",
            Command::ToggleMark { .. } => "toggleMark",
            Command::IsMarkActive { .. } => "isMarkActive",
            Command::InsertText { .. } => "insertText",
        }
    }
}

impl Editor {
    /// Run one command
    pub fn execute(&mut self, command: Command) -> CommandOutput {
        trace!(command = command.name(), "Executing command");
        match command {
            Command::Select { anchor, focus } => self.select(Selection::new(anchor, focus)),
            Command::Deselect => self.deselect(),

            Command::ConvertBlock { path, to } => self.convert_block(&path, to),
            Command::DuplicateBlock { path } => self.duplicate_block(&path),
            Command::DeleteBlock { path } => self.delete_block(&path),
            Command::MoveBlockUp { path } => self.move_block_up(&path),
            Command::MoveBlockDown { path } => self.move_block_down(&path),
            Command::InsertBlockAfter { path, kind } => self.insert_block_after(&path, kind),

            Command::SetBlockStyle { style, value } => {
                self.set_block_style(style, value.as_deref())
            }
            Command::ClearBlockStyles => self.clear_block_styles(),
            Command::GetBlockStyles => return CommandOutput::BlockStyles(self.get_block_styles()),
            Command::IncreaseIndent => self.increase_indent(),
            Command::DecreaseIndent => self.decrease_indent(),
            Command::SetAlign { align } => self.set_align(align),
            Command::SetLineHeight { line_height } => self.set_line_height(line_height.as_deref()),
            Command::SetFont { font } => self.set_font(font.as_deref()),

            Command::InsertLayout(spec) => self.insert_layout(spec),
            Command::AddColumn { path } => self.add_column(&path),
            Command::RemoveColumn { path, index } => self.remove_column(&path, index),
            Command::InsertImage { url, alt } => self.insert_image(&url, alt.as_deref()),
            Command::UpdateImage { path, url, alt } => {
                self.update_image(&path, url.as_deref(), alt.as_deref())
            }

            Command::InsertLink { url } => self.insert_link(&url),
            Command::RemoveLink => self.remove_link(),
            Command::IsLinkActive => return CommandOutput::Bool(self.is_link_active()),
            Command::ToggleMark { mark } => self.toggle_mark(mark),
            Command::IsMarkActive { mark } => return CommandOutput::Bool(self.is_mark_active(mark)),
            Command::InsertText { text } => self.insert_text(&text),
        }
        CommandOutput::None
    }

    /// Run commands in order, collecting the query results
    pub fn execute_all(&mut self, commands: impl IntoIterator<Item = Command>) -> Vec<CommandOutput> {
        commands
            .into_iter()
            .map(|command| self.execute(command))
            .collect()
    }
}
