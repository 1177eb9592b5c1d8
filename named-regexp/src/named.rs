//! Named-group adapter
//!
//! [`NamedRegExp`] pairs a compiled [`RegExp`] with the [`GroupIndices`] the
//! transformer produced for it. Matching is delegated unchanged; each
//! successful result is decorated with a name to value map.

use std::collections::BTreeMap;
use std::ops::Deref;

use named_regexp_core::{GroupIndices, transform};

use crate::error::Result;
use crate::flags::Flags;
use crate::match_array::MatchArray;
use crate::regexp::{Matcher, RegExp, RegExpBuilder};

/// Captured value of every named group, keyed by name
///
/// A group that did not take part in the match maps to `None`.
pub type Groups<'t> = BTreeMap<String, Option<&'t str>>;

/// A match decorated with its named groups
///
/// Derefs to the positional [`MatchArray`], so `m.get(1)` and `m.index()`
/// work as on a plain match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedMatch<'t> {
    array: MatchArray<'t>,
    groups: Groups<'t>,
}

impl<'t> NamedMatch<'t> {
    pub(crate) fn new(array: MatchArray<'t>, indices: &GroupIndices) -> Self {
        let groups = indices
            .iter()
            .map(|(name, index)| (name.to_string(), array.get(index)))
            .collect();
        NamedMatch { array, groups }
    }

    /// Value of the named group, `None` if it did not match or is unknown
    pub fn group(&self, name: &str) -> Option<&'t str> {
        self.groups.get(name).copied().flatten()
    }

    /// All named groups of this match
    pub fn groups(&self) -> &Groups<'t> {
        &self.groups
    }

    /// Take the named groups, dropping the positional captures
    pub fn into_groups(self) -> Groups<'t> {
        self.groups
    }

    /// The positional captures
    pub fn array(&self) -> &MatchArray<'t> {
        &self.array
    }
}

impl<'t> Deref for NamedMatch<'t> {
    type Target = MatchArray<'t>;

    fn deref(&self) -> &Self::Target {
        &self.array
    }
}

/// A compiled pattern with named capture groups
#[derive(Debug)]
pub struct NamedRegExp {
    regexp: RegExp,
    indices: GroupIndices,
    original_source: String,
}

impl NamedRegExp {
    /// Compile a pattern containing `(?<name>...)` groups
    ///
    /// # Example
    /// ```
    /// use named_regexp::NamedRegExp;
    ///
    /// let mut re = NamedRegExp::new(r"(?<hours>\d\d?):(?<minutes>\d\d?)", "").unwrap();
    /// let m = re.exec("at 9:45").unwrap().unwrap();
    /// assert_eq!(m.group("hours"), Some("9"));
    /// assert_eq!(m.group("minutes"), Some("45"));
    /// ```
    ///
    /// # Errors
    /// Fails when a named group is missing its `>`, when the flags are
    /// invalid, or when the engine rejects the rewritten pattern.
    pub fn new(pattern: &str, flags: &str) -> Result<Self> {
        Self::with_builder(pattern, RegExpBuilder::new().flags(flags.parse()?))
    }

    /// Compile a pattern with explicit engine options
    pub fn with_builder(pattern: &str, builder: &RegExpBuilder) -> Result<Self> {
        let (rewritten, indices) = transform(pattern)?.into_parts();
        let regexp = builder.build(&rewritten)?;

        if regexp.captures_len() != indices.group_count() + 1 {
            log::warn!(
                "engine reports {} groups for /{}/ but {} were numbered; named lookups may be off",
                regexp.captures_len().saturating_sub(1),
                rewritten,
                indices.group_count()
            );
        }

        Ok(NamedRegExp {
            regexp,
            indices,
            original_source: pattern.to_string(),
        })
    }

    /// Name to group index map
    pub fn groups_indices(&self) -> &GroupIndices {
        &self.indices
    }

    /// The pattern as written, with its `(?<name>` annotations
    pub fn original_source(&self) -> &str {
        &self.original_source
    }

    /// The rewritten pattern handed to the engine
    pub fn source(&self) -> &str {
        self.regexp.source()
    }

    /// The flags
    pub fn flags(&self) -> Flags {
        self.regexp.flags()
    }

    /// Byte offset where the next global or sticky search starts
    pub fn last_index(&self) -> usize {
        self.regexp.last_index()
    }

    /// Move the search cursor
    pub fn set_last_index(&mut self, index: usize) {
        self.regexp.set_last_index(index);
    }

    /// The wrapped matcher
    pub fn as_regexp(&self) -> &RegExp {
        &self.regexp
    }

    /// Unwrap into the plain matcher, dropping the names
    pub fn into_regexp(self) -> RegExp {
        self.regexp
    }

    /// Check whether the subject matches
    pub fn test(&mut self, subject: &str) -> Result<bool> {
        self.regexp.test(subject)
    }

    /// Run one match attempt and decorate the result with its named groups
    pub fn exec<'t>(&mut self, subject: &'t str) -> Result<Option<NamedMatch<'t>>> {
        Ok(self
            .regexp
            .exec(subject)?
            .map(|array| NamedMatch::new(array, &self.indices)))
    }

    /// Run one match attempt and return only the named groups
    ///
    /// `None` means no match; a match of a pattern without named groups gives
    /// an empty map.
    pub fn exec_groups<'t>(&mut self, subject: &'t str) -> Result<Option<Groups<'t>>> {
        Ok(self.exec(subject)?.map(NamedMatch::into_groups))
    }

    /// Iterate over every successive match in `subject`
    ///
    /// Starts at the beginning of the subject whatever the flags are and
    /// leaves [`NamedRegExp::last_index`] untouched. Empty matches advance by
    /// one character.
    pub fn matches<'r, 't>(&'r self, subject: &'t str) -> Matches<'r, 't> {
        Matches {
            regex: self,
            subject,
            pos: 0,
            done: false,
        }
    }
}

impl Matcher for NamedRegExp {
    fn source(&self) -> &str {
        NamedRegExp::source(self)
    }

    fn flags(&self) -> Flags {
        NamedRegExp::flags(self)
    }

    fn last_index(&self) -> usize {
        NamedRegExp::last_index(self)
    }

    fn set_last_index(&mut self, index: usize) {
        NamedRegExp::set_last_index(self, index);
    }

    fn test(&mut self, subject: &str) -> Result<bool> {
        NamedRegExp::test(self, subject)
    }

    fn exec<'t>(&mut self, subject: &'t str) -> Result<Option<MatchArray<'t>>> {
        self.regexp.exec(subject)
    }
}

impl AsRef<RegExp> for NamedRegExp {
    fn as_ref(&self) -> &RegExp {
        &self.regexp
    }
}

/// Iterator returned by [`NamedRegExp::matches`]
#[derive(Debug)]
pub struct Matches<'r, 't> {
    regex: &'r NamedRegExp,
    subject: &'t str,
    pos: usize,
    done: bool,
}

impl<'t> Iterator for Matches<'_, 't> {
    type Item = Result<NamedMatch<'t>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos > self.subject.len() {
            return None;
        }

        match self.regex.regexp.exec_at(self.subject, self.pos) {
            Ok(Some(array)) => {
                self.pos = next_search_start(self.subject, &array);
                Some(Ok(NamedMatch::new(array, &self.regex.indices)))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Where to resume after `array`, stepping over one character on an empty match
pub(crate) fn next_search_start(subject: &str, array: &MatchArray<'_>) -> usize {
    let end = array.end();
    if end > array.index() {
        return end;
    }
    subject[end..]
        .chars()
        .next()
        .map_or(end + 1, |c| end + c.len_utf8())
}
