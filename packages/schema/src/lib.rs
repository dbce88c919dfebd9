//! # Proseline Schema
//!
//! The data model shared by every other Proseline crate:
//!
//! - [`registry`]: the closed set of element variants and their type guards
//! - [`node`]: elements, text leaves, marks and typed attributes
//! - [`path`]: root-relative node addresses
//! - [`document`]: the tree, its path-addressed primitives and JSON load/save
//! - [`theme`]: theme configuration with defaults
//! - [`rules`]: session-level inline/void classification

pub mod document;
pub mod error;
pub mod node;
pub mod path;
pub mod registry;
pub mod rules;
pub mod theme;

pub use document::Document;
pub use error::{LoadError, LoadResult};
pub use node::{Attributes, Element, Mark, Node, Text, TextAlign};
pub use path::Path;
pub use registry::ElementType;
pub use rules::ElementRules;
pub use theme::Theme;
