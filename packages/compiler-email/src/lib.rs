//! # Proseline Email Compiler
//!
//! Renders a document tree as a self-contained, email-safe HTML document.
//!
//! Takes plain data (no editing session): the tree, a [`ComponentsMap`] and
//! a [`Theme`](proseline_schema::Theme). Styles come from the same formula
//! layer the interactive surface uses, so both outputs match.
//!
//! ```rust
//! use proseline_compiler_email::{compile_to_email, CompileOptions, ComponentsMap};
//! use proseline_schema::{Document, Theme};
//!
//! let document = Document::from_json(r#"[{"type":"paragraph","children":[{"text":"Hi"}]}]"#).unwrap();
//! let html = compile_to_email(&document, &ComponentsMap::standard(), &Theme::default(), CompileOptions::default()).unwrap();
//! assert!(html.contains(">Hi</p>"));
//! ```

mod compiler;
mod components;
mod options;

pub use compiler::{compile_blocks, compile_to_email, CompileError, ERROR_MESSAGE};
pub use components::{ComponentProps, ComponentsMap, EmailComponent};
pub use options::CompileOptions;
