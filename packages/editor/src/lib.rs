//! # Proseline Editor
//!
//! Editing session and node command layer for Proseline documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: Document tree, Path, ElementType    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session + commands                  │
//! │  - Selection (anchor/focus points)          │
//! │  - Block, attribute, layout, link, mark     │
//! │    commands with silent no-op preconditions │
//! │  - Normalization after every command        │
//! │  - Serializable Command values              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ surface / compiler-email: rendering         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The tree is the state**: nothing outside it references a node
//! 2. **Commands never fail**: bad preconditions are a logged no-op
//! 3. **Paths are recomputed**: a path is only trusted for one command
//! 4. **Single writer**: one session mutates one tree, synchronously
//!
//! ## Usage
//!
//! ```rust
//! use proseline_editor::{Editor, Point, Selection};
//! use proseline_schema::{Document, ElementType, Path};
//!
//! let mut editor = Editor::with_document(Document::empty());
//! editor.select(Selection::caret(Point::new(vec![0, 0], 0)));
//! editor.insert_text("Hello");
//! editor.convert_block(&Path::new(vec![0]), ElementType::HeadingOne);
//! editor.insert_layout(2);
//!
//! let json = editor.save_json().unwrap();
//! assert!(json.contains("layout-container"));
//! ```

mod blocks;
mod commands;
mod editor;
mod errors;
mod formatting;
mod inline;
mod layout;
mod links;
mod marks;
mod normalize;
mod selection;

pub use commands::{Command, CommandOutput};
pub use editor::Editor;
pub use errors::{EditorError, EditorResult};
pub use formatting::{BlockStyle, BlockStyles};
pub use layout::LayoutSpec;
pub use selection::{Point, Selection};

// Re-export schema types for convenience
pub use proseline_schema::{Document, ElementRules, ElementType, Mark, Path};
