//! Error types for the editor

use proseline_schema::LoadError;
use thiserror::Error;

/// Failures that reach the caller
///
/// Commands never produce these: a command whose preconditions do not hold
/// returns without touching the document. Only loading and saving the whole
/// tree can fail.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type EditorResult<T> = Result<T, EditorError>;
