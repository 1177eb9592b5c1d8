//! Named capture groups for a numbered-group regex engine
//!
//! Patterns may use `(?<name>...)` groups. They are rewritten to plain
//! capturing groups before reaching the engine, and every match is decorated
//! with the captured value of each name.
//!
//! ```
//! let mut re = named_regexp::compile(r"(?<x>\d)(?<y>\w)", "g").unwrap();
//!
//! let first = re.exec_groups("1a2b").unwrap().unwrap();
//! assert_eq!(first["x"], Some("1"));
//! assert_eq!(first["y"], Some("a"));
//!
//! let second = re.exec_groups("1a2b").unwrap().unwrap();
//! assert_eq!(second["x"], Some("2"));
//! ```

pub mod error;
pub mod flags;
pub mod match_array;
pub mod named;
pub mod regexp;
pub mod replace;

pub use error::{Error, FlagsErrorKind, Result};
pub use flags::Flags;
pub use match_array::MatchArray;
pub use named::{Groups, Matches, NamedMatch, NamedRegExp};
pub use regexp::{Matcher, RegExp, RegExpBuilder};
pub use replace::{Replacement, ReplacementPart};

pub use named_regexp_core::{GroupIndices, GroupInfo, TransformError, Transformed, transform};

/// Compile a pattern with named groups
///
/// `flags` is a JavaScript-style flag string such as `"gi"`; pass `""` for
/// none.
pub fn compile(pattern: &str, flags: &str) -> Result<NamedRegExp> {
    NamedRegExp::new(pattern, flags)
}
