//! Positional match results
//!
//! A [`MatchArray`] is the raw result of one successful match attempt: the
//! whole match followed by every capture group in order, each either a span
//! of the subject or absent. Spans borrow the subject; nothing is copied.

use std::ops::Range;

/// Captures of one match, indexed `0..=group_count`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchArray<'t> {
    input: &'t str,
    captures: Vec<Option<Range<usize>>>,
}

#[allow(clippy::len_without_is_empty)]
impl<'t> MatchArray<'t> {
    /// Build from the whole-match span and the capture spans
    ///
    /// `groups` holds groups `1..`; the whole match becomes group 0.
    pub(crate) fn new(
        input: &'t str,
        whole: Range<usize>,
        groups: impl IntoIterator<Item = Option<Range<usize>>>,
    ) -> Self {
        let mut captures = vec![Some(whole)];
        captures.extend(groups);
        MatchArray { input, captures }
    }

    /// Byte offset where the match starts
    pub fn index(&self) -> usize {
        self.whole().start
    }

    /// Byte offset just past the end of the match
    pub fn end(&self) -> usize {
        self.whole().end
    }

    /// The subject the match was run against
    pub fn input(&self) -> &'t str {
        self.input
    }

    /// The matched text
    pub fn as_str(&self) -> &'t str {
        &self.input[self.whole()]
    }

    /// Text of group `i`, `None` if the group did not participate or does not exist
    pub fn get(&self, i: usize) -> Option<&'t str> {
        self.range(i).map(|range| &self.input[range])
    }

    /// Span of group `i` in the subject
    pub fn range(&self, i: usize) -> Option<Range<usize>> {
        self.captures.get(i).cloned().flatten()
    }

    /// Number of entries, always the group count plus one
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    /// Iterate over all entries, the whole match first
    pub fn iter(&self) -> impl Iterator<Item = Option<&'t str>> + '_ {
        self.captures
            .iter()
            .map(|range| range.clone().map(|range| &self.input[range]))
    }

    fn whole(&self) -> Range<usize> {
        self.captures
            .first()
            .cloned()
            .flatten()
            .unwrap_or_default()
    }
}
