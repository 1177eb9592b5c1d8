//! Replacement template handling
//!
//! Templates use the JavaScript `String.prototype.replace` syntax:
//! `$$`, `$&`, `` $` ``, `$'`, `$1`..`$99` and `$<name>`. References that do
//! not resolve are kept as literal text, except `$<name>` for a name the
//! pattern does not define, which expands to nothing.

use named_regexp_core::GroupIndices;

use crate::error::Result;
use crate::named::{NamedMatch, NamedRegExp, next_search_start};

/// A part of a replacement template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplacementPart {
    /// Literal text
    Literal(String),
    /// Capture group by number (`$1`, `$12`)
    Group(usize),
    /// Capture group by name (`$<name>`)
    Named(String),
    /// Entire match (`$&`)
    EntireMatch,
    /// Text before the match (`` $` ``)
    Before,
    /// Text after the match (`$'`)
    After,
}

/// A parsed replacement template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    parts: Vec<ReplacementPart>,
}

impl Replacement {
    /// Parse a template against the groups of a compiled pattern
    ///
    /// Numbered references are only recognised up to the pattern's group
    /// count, and `$<name>` only when the pattern has named groups at all.
    pub fn parse(template: &str, indices: &GroupIndices) -> Self {
        let group_count = indices.group_count();
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(dollar) = rest.find('$') {
            literal.push_str(&rest[..dollar]);
            let after = &rest[dollar + 1..];

            let (part, consumed) = match after.as_bytes().first() {
                Some(b'$') => (ReplacementPart::Literal("$".to_string()), 1),
                Some(b'&') => (ReplacementPart::EntireMatch, 1),
                Some(b'`') => (ReplacementPart::Before, 1),
                Some(b'\'') => (ReplacementPart::After, 1),
                Some(b'0'..=b'9') => match Self::group_number(after, group_count) {
                    Some((n, len)) => (ReplacementPart::Group(n), len),
                    None => (ReplacementPart::Literal("$".to_string()), 0),
                },
                Some(b'<') if !indices.is_empty() => match after.find('>') {
                    Some(close) => (ReplacementPart::Named(after[1..close].to_string()), close + 1),
                    None => (ReplacementPart::Literal("$".to_string()), 0),
                },
                _ => (ReplacementPart::Literal("$".to_string()), 0),
            };

            match part {
                ReplacementPart::Literal(text) => literal.push_str(&text),
                part => {
                    if !literal.is_empty() {
                        parts.push(ReplacementPart::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(part);
                }
            }
            rest = &after[consumed..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            parts.push(ReplacementPart::Literal(literal));
        }
        Replacement { parts }
    }

    /// Resolve `$n` / `$nn`, preferring two digits when that group exists
    fn group_number(after: &str, group_count: usize) -> Option<(usize, usize)> {
        let digits: Vec<usize> = after
            .bytes()
            .take(2)
            .take_while(u8::is_ascii_digit)
            .map(|b| usize::from(b - b'0'))
            .collect();

        if let &[tens, ones] = digits.as_slice() {
            let n = tens * 10 + ones;
            if (1..=group_count).contains(&n) {
                return Some((n, 2));
            }
        }
        let n = *digits.first()?;
        (1..=group_count).contains(&n).then_some((n, 1))
    }

    /// Expand the template for one match
    pub fn apply(&self, m: &NamedMatch<'_>) -> String {
        let input = m.input();
        let mut result = String::new();

        for part in &self.parts {
            match part {
                ReplacementPart::Literal(text) => result.push_str(text),
                ReplacementPart::Group(n) => result.push_str(m.get(*n).unwrap_or_default()),
                ReplacementPart::Named(name) => result.push_str(m.group(name).unwrap_or_default()),
                ReplacementPart::EntireMatch => result.push_str(m.as_str()),
                ReplacementPart::Before => result.push_str(&input[..m.index()]),
                ReplacementPart::After => result.push_str(&input[m.end()..]),
            }
        }

        result
    }

    /// Get the parts of the template
    pub fn parts(&self) -> &[ReplacementPart] {
        &self.parts
    }
}

impl NamedRegExp {
    /// Replace the first match, or every match with the `g` flag, using a template
    ///
    /// # Example
    /// ```
    /// use named_regexp::NamedRegExp;
    ///
    /// let mut re = NamedRegExp::new(r"(?<first>\w+) (?<last>\w+)", "").unwrap();
    /// let swapped = re.replace("Ada Lovelace", "$<last>, $<first>").unwrap();
    /// assert_eq!(swapped, "Lovelace, Ada");
    /// ```
    pub fn replace(&mut self, subject: &str, template: &str) -> Result<String> {
        let replacement = Replacement::parse(template, self.groups_indices());
        self.replace_with(subject, |m| replacement.apply(m))
    }

    /// Replace the first match, or every match with the `g` flag, using a closure
    ///
    /// A global replace starts from the beginning of the subject and leaves
    /// the cursor at 0, as a global `exec` loop run to exhaustion does.
    pub fn replace_with<F>(&mut self, subject: &str, mut f: F) -> Result<String>
    where
        F: FnMut(&NamedMatch<'_>) -> String,
    {
        let mut found = Vec::new();
        if self.flags().global {
            self.set_last_index(0);
            while let Some(m) = self.exec(subject)? {
                if m.end() == m.index() {
                    let next = next_search_start(subject, &m);
                    self.set_last_index(next);
                }
                found.push(m);
            }
        } else if let Some(m) = self.exec(subject)? {
            found.push(m);
        }

        let mut result = String::with_capacity(subject.len());
        let mut last_end = 0;
        for m in &found {
            result.push_str(&subject[last_end..m.index()]);
            result.push_str(&f(m));
            last_end = m.end();
        }
        result.push_str(&subject[last_end..]);
        Ok(result)
    }
}
