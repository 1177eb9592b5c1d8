//! Error types for compiling and running named regexes
//!
//! Errors are categorized by their source: the pattern transformer, the flag
//! string, the engine's compile step, or the engine at match time. Engine
//! errors are wrapped as-is and never reinterpreted.

use named_regexp_core::TransformError;
use thiserror::Error;

/// The main error type
#[derive(Error, Debug)]
pub enum Error {
    /// The pattern has a malformed `(?<name>` annotation
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The flag string contains an unknown or repeated flag
    #[error("invalid flags '{flags}': {reason}")]
    InvalidFlags {
        /// The flag string as given
        flags: String,
        /// What is wrong with it
        reason: FlagsErrorKind,
    },

    /// The engine rejected the rewritten pattern
    #[error("invalid regular expression /{pattern}/: {source}")]
    Compile {
        /// The pattern handed to the engine
        pattern: String,
        /// The engine's own error
        #[source]
        source: fancy_regex::Error,
    },

    /// The engine failed while matching, e.g. the backtrack limit was hit
    #[error("runtime error: {0}")]
    Runtime(#[source] fancy_regex::Error),
}

/// Specific problems with a flag string
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagsErrorKind {
    /// A character that is not a known flag
    #[error("unknown flag '{0}'")]
    Unknown(char),

    /// A flag given more than once
    #[error("duplicate flag '{0}'")]
    Duplicate(char),
}

/// Result type alias for named regex operations
pub type Result<T> = std::result::Result<T, Error>;
