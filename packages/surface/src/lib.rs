//! # Proseline Surface
//!
//! Plugin composition and the interactive render dispatcher.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ Plugins: elements, leaves, utils,           │
//! │          provider, element decorator        │
//! └─────────────────────────────────────────────┘
//!                     ↓ Composition::new (once)
//! ┌─────────────────────────────────────────────┐
//! │ Composition                                 │
//! │  - type → config, mark → renderer tables    │
//! │  - decorator chain, provider nesting        │
//! │  - ElementRules for the editor              │
//! └─────────────────────────────────────────────┘
//!                     ↓ create_session
//! ┌─────────────────────────────────────────────┐
//! │ Session: editor handle + bound utils        │
//! └─────────────────────────────────────────────┘
//!                     ↓ render
//! ┌─────────────────────────────────────────────┐
//! │ VNode tree (to_html for previews)           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Never crash the surface**: unknown types render a visible marker,
//!    failing renderers render an in-place error
//! 2. **Later plugins win**: a duplicate key replaces the earlier entry
//! 3. **Bind once**: rules and utils are fixed when the session starts
//!
//! ## Usage
//!
//! ```rust
//! use proseline_surface::{default_plugins, Composition};
//! use proseline_schema::Document;
//! use serde_json::json;
//! use std::rc::Rc;
//!
//! let composition = Rc::new(Composition::new(default_plugins()));
//! let session = composition.create_session(Document::empty());
//!
//! session.call("select", json!({
//!     "anchor": { "path": [0, 0], "offset": 0 },
//!     "focus": { "path": [0, 0], "offset": 0 }
//! }));
//! session.call("insertText", json!({ "text": "Hello" }));
//!
//! assert!(session.render_html().contains("Hello"));
//! ```

mod boundary;
mod composition;
mod context;
mod dispatcher;
mod errors;
mod plugin;
pub mod plugins;
mod utils;
mod vdom;

pub use boundary::{error_view, ERROR_MESSAGE};
pub use composition::{Composition, Session};
pub use context::RenderContext;
pub use errors::{RenderError, RenderResult};
pub use plugin::{
    BlockMenu, BoundUtil, EditorHandle, ElementConfig, ElementDecorator, ElementProps,
    ElementRenderer, LeafProps, LeafRenderer, Plugin, Provider, UtilFactory,
};
pub use plugins::default_plugins;
pub use utils::{block_style_util, command_util};
pub use vdom::VNode;
