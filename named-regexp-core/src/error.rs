//! Error types for the pattern transformer
//!
//! The transformer only ever rejects a pattern for one reason: a `(?<` that is
//! not followed by a group name and its closing `>`. Everything else is left
//! for the regex engine's own compile step.

use thiserror::Error;

/// Errors produced while transforming a pattern
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// `(?<` without a valid identifier terminated by `>`
    #[error("'>' missing in named group starting at position {position}")]
    UnterminatedGroupName {
        /// Byte offset of the opening `(` in the original pattern
        position: usize,
    },
}

impl TransformError {
    /// Byte offset in the original pattern where the error was detected
    pub fn position(&self) -> usize {
        match self {
            TransformError::UnterminatedGroupName { position } => *position,
        }
    }
}

/// Result type alias for transformer operations
pub type Result<T> = std::result::Result<T, TransformError>;
