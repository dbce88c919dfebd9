//! Error types for rendering

use thiserror::Error;

/// A renderer could not produce output for an element
///
/// These never escape the dispatcher: each one is turned into an in-place
/// [`VNode::Error`](crate::VNode::Error) for the element that failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("`{kind}` is missing required attribute `{attribute}`")]
    MissingAttribute { kind: String, attribute: &'static str },

    #[error("Renderer for `{kind}` failed: {message}")]
    Renderer { kind: String, message: String },

    #[error("Renderer panicked: {0}")]
    Panic(String),
}

pub type RenderResult<T> = Result<T, RenderError>;
