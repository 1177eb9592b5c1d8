//! Match flags
//!
//! Flags are given as a JavaScript-style string such as `"gi"`. The
//! case-insensitive, multiline and dot-all flags are handed to the engine as
//! an inline flag group; global and sticky only change how `exec` walks the
//! subject.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, FlagsErrorKind};

/// Parsed flag set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    /// `d`: report match offsets (always available, accepted for compatibility)
    pub has_indices: bool,
    /// `g`: advance `last_index` across calls
    pub global: bool,
    /// `i`: case-insensitive matching
    pub ignore_case: bool,
    /// `m`: `^` and `$` match at line boundaries
    pub multiline: bool,
    /// `s`: `.` matches newlines
    pub dot_all: bool,
    /// `u`: Unicode mode (the engine is always Unicode-aware)
    pub unicode: bool,
    /// `y`: match only at `last_index`
    pub sticky: bool,
}

impl Flags {
    /// Parse a flag string
    ///
    /// # Errors
    /// Returns [`Error::InvalidFlags`] for unknown or repeated flags.
    pub fn parse(flags: &str) -> Result<Self, Error> {
        let mut parsed = Flags::default();
        for c in flags.chars() {
            let slot = match c {
                'd' => &mut parsed.has_indices,
                'g' => &mut parsed.global,
                'i' => &mut parsed.ignore_case,
                'm' => &mut parsed.multiline,
                's' => &mut parsed.dot_all,
                'u' => &mut parsed.unicode,
                'y' => &mut parsed.sticky,
                _ => {
                    return Err(Error::InvalidFlags {
                        flags: flags.to_string(),
                        reason: FlagsErrorKind::Unknown(c),
                    });
                }
            };
            if *slot {
                return Err(Error::InvalidFlags {
                    flags: flags.to_string(),
                    reason: FlagsErrorKind::Duplicate(c),
                });
            }
            *slot = true;
        }
        Ok(parsed)
    }

    /// Whether `exec` keeps a cursor between calls
    pub fn is_stateful(&self) -> bool {
        self.global || self.sticky
    }

    /// Inline flag group understood by the engine, e.g. `(?im)`
    ///
    /// Returns `None` when no engine-level flag is set.
    pub(crate) fn inline_prefix(&self) -> Option<String> {
        let mut prefix = String::from("(?");
        if self.ignore_case {
            prefix.push('i');
        }
        if self.multiline {
            prefix.push('m');
        }
        if self.dot_all {
            prefix.push('s');
        }
        if prefix.len() == 2 {
            return None;
        }
        prefix.push(')');
        Some(prefix)
    }
}

impl FromStr for Flags {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Flags::parse(s)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let all = [
            (self.has_indices, 'd'),
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multiline, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.sticky, 'y'),
        ];
        for (set, c) in all {
            if set {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
