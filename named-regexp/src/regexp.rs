//! Stateful matcher over the regex engine
//!
//! [`RegExp`] gives the `fancy-regex` engine the calling convention the
//! named-group adapter is written against: a flag string, a `source`, and a
//! `last_index` cursor that global and sticky matchers advance on every
//! `exec`. Positions are byte offsets into the subject.

use std::fmt;

use crate::error::{Error, Result};
use crate::flags::Flags;
use crate::match_array::MatchArray;

/// Capability shared by every matcher in this crate
///
/// Code that only needs "something that behaves like a compiled regex" should
/// take `impl Matcher`; both [`RegExp`] and
/// [`NamedRegExp`](crate::NamedRegExp) qualify.
pub trait Matcher {
    /// The pattern as handed to the engine
    fn source(&self) -> &str;

    /// The flags the matcher was compiled with
    fn flags(&self) -> Flags;

    /// Byte offset where the next global or sticky search starts
    fn last_index(&self) -> usize;

    /// Move the search cursor
    fn set_last_index(&mut self, index: usize);

    /// Check whether the subject matches, advancing the cursor when stateful
    fn test(&mut self, subject: &str) -> Result<bool>;

    /// Run one match attempt
    fn exec<'t>(&mut self, subject: &'t str) -> Result<Option<MatchArray<'t>>>;
}

/// Options for compiling a [`RegExp`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RegExpBuilder {
    flags: Flags,
    backtrack_limit: Option<usize>,
}

impl RegExpBuilder {
    /// Create a builder with no flags and the engine's default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flags
    pub fn flags(&mut self, flags: Flags) -> &mut Self {
        self.flags = flags;
        self
    }

    /// Limit how many times the engine may backtrack in one search
    ///
    /// Exceeding it makes `exec` return [`Error::Runtime`].
    pub fn backtrack_limit(&mut self, limit: usize) -> &mut Self {
        self.backtrack_limit = Some(limit);
        self
    }

    /// Compile `source`
    ///
    /// # Errors
    /// Returns [`Error::Compile`] when the engine rejects the pattern.
    pub fn build(&self, source: &str) -> Result<RegExp> {
        let engine_pattern = match self.flags.inline_prefix() {
            Some(prefix) => format!("{prefix}{source}"),
            None => source.to_string(),
        };

        let mut builder = fancy_regex::RegexBuilder::new(&engine_pattern);
        if let Some(limit) = self.backtrack_limit {
            builder.backtrack_limit(limit);
        }
        let regex = builder.build().map_err(|source_err| Error::Compile {
            pattern: source.to_string(),
            source: source_err,
        })?;

        log::debug!("compiled /{}/{}", source, self.flags);
        Ok(RegExp {
            regex,
            source: source.to_string(),
            flags: self.flags,
            last_index: 0,
        })
    }
}

/// A compiled pattern with JavaScript-style `exec` semantics
#[derive(Debug)]
pub struct RegExp {
    regex: fancy_regex::Regex,
    source: String,
    flags: Flags,
    last_index: usize,
}

impl RegExp {
    /// Compile a pattern with a flag string such as `"gi"`
    ///
    /// # Errors
    /// Returns [`Error::InvalidFlags`] or [`Error::Compile`].
    pub fn new(source: &str, flags: &str) -> Result<Self> {
        RegExpBuilder::new().flags(flags.parse()?).build(source)
    }

    /// The pattern as given, without the inline flag prefix
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The flags
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Whether the `g` flag is set
    pub fn global(&self) -> bool {
        self.flags.global
    }

    /// Whether the `y` flag is set
    pub fn sticky(&self) -> bool {
        self.flags.sticky
    }

    /// Byte offset where the next global or sticky search starts
    pub fn last_index(&self) -> usize {
        self.last_index
    }

    /// Move the search cursor
    pub fn set_last_index(&mut self, index: usize) {
        self.last_index = index;
    }

    /// Number of capture slots, including group 0
    pub fn captures_len(&self) -> usize {
        self.regex.captures_len()
    }

    /// The underlying engine regex
    pub fn engine(&self) -> &fancy_regex::Regex {
        &self.regex
    }

    /// Check whether the subject matches
    ///
    /// For global and sticky matchers this is an `exec` whose result is
    /// discarded, so the cursor moves just like it does for `exec`.
    pub fn test(&mut self, subject: &str) -> Result<bool> {
        if self.flags.is_stateful() {
            return Ok(self.exec(subject)?.is_some());
        }
        self.regex.is_match(subject).map_err(Error::Runtime)
    }

    /// Run one match attempt
    ///
    /// Without `g` or `y` the search starts at 0 and the cursor is left alone.
    /// Otherwise it starts at [`RegExp::last_index`], a sticky matcher only
    /// accepts a match beginning exactly there, and the cursor is moved to the
    /// end of the match or reset to 0 when nothing matched.
    ///
    /// # Errors
    /// Returns [`Error::Runtime`] when the engine gives up, never for a
    /// subject that simply does not match.
    pub fn exec<'t>(&mut self, subject: &'t str) -> Result<Option<MatchArray<'t>>> {
        let stateful = self.flags.is_stateful();
        let start = if stateful { self.last_index } else { 0 };
        if start > subject.len() {
            self.last_index = 0;
            return Ok(None);
        }

        let found = self.exec_at(subject, ceil_char_boundary(subject, start))?;
        if stateful {
            self.last_index = found.as_ref().map_or(0, MatchArray::end);
        }
        log::trace!(
            "exec /{}/{} from {}: {:?}",
            self.source,
            self.flags,
            start,
            found.as_ref().map(MatchArray::as_str)
        );
        Ok(found)
    }

    /// Search from `start` regardless of flags, honoring stickiness
    pub(crate) fn exec_at<'t>(
        &self,
        subject: &'t str,
        start: usize,
    ) -> Result<Option<MatchArray<'t>>> {
        let Some(captures) = self
            .regex
            .captures_from_pos(subject, start)
            .map_err(Error::Runtime)?
        else {
            return Ok(None);
        };
        let Some(whole) = captures.get(0) else {
            return Ok(None);
        };
        if self.flags.sticky && whole.start() != start {
            return Ok(None);
        }

        let groups = captures
            .iter()
            .skip(1)
            .map(|group| group.map(|m| m.start()..m.end()));
        Ok(Some(MatchArray::new(
            subject,
            whole.start()..whole.end(),
            groups,
        )))
    }
}

impl Matcher for RegExp {
    fn source(&self) -> &str {
        RegExp::source(self)
    }

    fn flags(&self) -> Flags {
        RegExp::flags(self)
    }

    fn last_index(&self) -> usize {
        RegExp::last_index(self)
    }

    fn set_last_index(&mut self, index: usize) {
        RegExp::set_last_index(self, index);
    }

    fn test(&mut self, subject: &str) -> Result<bool> {
        RegExp::test(self, subject)
    }

    fn exec<'t>(&mut self, subject: &'t str) -> Result<Option<MatchArray<'t>>> {
        RegExp::exec(self, subject)
    }
}

impl fmt::Display for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

/// Smallest char boundary at or after `index`
pub(crate) fn ceil_char_boundary(s: &str, index: usize) -> usize {
    (index..=s.len())
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(s.len())
}
