//! Pattern transformer
//!
//! Converts a pattern that uses `(?<name>...)` annotations into one that a
//! numbered-group engine understands, by replacing each annotation with a
//! plain `(`. While doing so it numbers every capturing group the same way
//! the engine will (by order of opening parenthesis) and records the index of
//! each name.
//!
//! The scan is a single forward pass over the pattern bytes. All delimiters
//! are ASCII, so multi-byte characters are never split when copying.
//!
//! Numbering follows the engine's syntax wherever it decides what counts as
//! a group: a `]` right after `[` or `[^` is literal, classes nest,
//! `(?P<name>...)` captures (without being recorded by name), and under `x`
//! mode a `#` outside a class starts a comment that runs to the end of the
//! line. Inline flags are scoped to their enclosing group.

use crate::error::{Result, TransformError};
use crate::groups::GroupIndices;

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Outside any character class
    Normal,
    /// Inside `[...]`, `depth` counts nested classes
    InClass { depth: usize },
    /// Right after an unescaped `\\`
    Escaped {
        /// Class depth to return to once the escaped character is consumed
        class_depth: usize,
    },
    /// Inside a `#` comment in verbose mode, up to the end of the line
    Comment,
}

/// What an unescaped `(` turned out to open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opening {
    /// `(...)` and the engine's own `(?P<name>...)`
    Capturing,
    /// `(?<name>...)`, `end` is the byte offset just past the `>`
    Named { name_end: usize, end: usize },
    /// `(?flags)` or `(?flags:...)`, `end` is just past the `)` or `:`
    Flags {
        end: usize,
        scoped: bool,
        verbose: Option<bool>,
    },
    /// `(?=...)`, `(?!...)`, lookbehind and anything else after `(?`
    NonCapturing,
}

/// Output of [`transform`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    /// The rewritten pattern, annotations replaced by `(`
    pub pattern: String,
    /// Group indices collected during the scan
    pub indices: GroupIndices,
}

impl Transformed {
    /// The rewritten pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The name to index map
    pub fn indices(&self) -> &GroupIndices {
        &self.indices
    }

    /// Total number of capturing groups in the rewritten pattern
    pub fn group_count(&self) -> usize {
        self.indices.group_count()
    }

    /// Split into the rewritten pattern and the index map
    pub fn into_parts(self) -> (String, GroupIndices) {
        (self.pattern, self.indices)
    }
}

/// Transform a pattern with named groups into a plain numbered-group pattern
///
/// # Example
/// ```
/// use named_regexp_core::transform;
///
/// let result = transform(r"(?<year>\d{4})-(\d\d)-(?<day>\d\d)").unwrap();
/// assert_eq!(result.pattern(), r"(\d{4})-(\d\d)-(\d\d)");
/// assert_eq!(result.indices().get("year"), Some(1));
/// assert_eq!(result.indices().get("day"), Some(3));
/// ```
///
/// # Errors
/// Returns [`TransformError::UnterminatedGroupName`] when `(?<` is not
/// followed by an identifier and a closing `>`.
pub fn transform(pattern: &str) -> Result<Transformed> {
    let transformed = Scanner::new(pattern).run()?;
    log::debug!(
        "transformed {:?} -> {:?} ({} groups, {} named)",
        pattern,
        transformed.pattern,
        transformed.group_count(),
        transformed.indices.len()
    );
    Ok(transformed)
}

/// Check if a character may appear in a group name
fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

struct Scanner<'a> {
    pattern: &'a str,
    state: State,
    /// Whether `x` mode is on at the current position
    verbose: bool,
    /// `verbose` as it was outside each open group
    scopes: Vec<bool>,
    /// Rewritten output
    output: String,
    /// Start of the input slice not yet copied to `output`
    copied: usize,
    indices: GroupIndices,
}

impl<'a> Scanner<'a> {
    fn new(pattern: &'a str) -> Self {
        Scanner {
            pattern,
            state: State::Normal,
            verbose: false,
            scopes: Vec::new(),
            output: String::with_capacity(pattern.len()),
            copied: 0,
            indices: GroupIndices::new(),
        }
    }

    fn run(mut self) -> Result<Transformed> {
        let bytes = self.pattern.as_bytes();
        let mut pos = 0;

        while pos < bytes.len() {
            let byte = bytes[pos];
            match self.state {
                State::Escaped { class_depth } => {
                    self.state = match class_depth {
                        0 => State::Normal,
                        depth => State::InClass { depth },
                    };
                }
                State::Comment => {
                    if byte == b'\n' {
                        self.state = State::Normal;
                    }
                }
                State::InClass { depth } => match byte {
                    b'\\' => self.state = State::Escaped { class_depth: depth },
                    b'[' => {
                        self.state = State::InClass { depth: depth + 1 };
                        pos = self.class_body_start(pos + 1);
                        continue;
                    }
                    b']' if depth == 1 => self.state = State::Normal,
                    b']' => self.state = State::InClass { depth: depth - 1 },
                    _ => {}
                },
                State::Normal => match byte {
                    b'\\' => self.state = State::Escaped { class_depth: 0 },
                    b'[' => {
                        self.state = State::InClass { depth: 1 };
                        pos = self.class_body_start(pos + 1);
                        continue;
                    }
                    b'#' if self.verbose => self.state = State::Comment,
                    b'(' => {
                        pos = self.open_group(pos)?;
                        continue;
                    }
                    b')' => {
                        if let Some(outer) = self.scopes.pop() {
                            self.verbose = outer;
                        }
                    }
                    _ => {}
                },
            }
            pos += 1;
        }

        self.output.push_str(&self.pattern[self.copied..]);
        Ok(Transformed {
            pattern: self.output,
            indices: self.indices,
        })
    }

    /// Skip a leading `^` and a leading `]`, which is literal there
    fn class_body_start(&self, start: usize) -> usize {
        let bytes = self.pattern.as_bytes();
        let mut pos = start;
        if bytes.get(pos) == Some(&b'^') {
            pos += 1;
        }
        if bytes.get(pos) == Some(&b']') {
            pos += 1;
        }
        pos
    }

    /// Handle the unescaped `(` at `pos`, returning where scanning resumes
    fn open_group(&mut self, pos: usize) -> Result<usize> {
        match self.classify(pos)? {
            Opening::Capturing => {
                let index = self.indices.register_group(None, pos);
                log::trace!("group {index} at {pos}");
            }
            Opening::Named { name_end, end } => {
                let name = &self.pattern[pos + 3..name_end];
                let index = self.indices.register_group(Some(name), pos);
                log::trace!("group {index} '{name}' at {pos}");

                self.scopes.push(self.verbose);
                self.output.push_str(&self.pattern[self.copied..pos]);
                self.output.push('(');
                self.copied = end;
                return Ok(end);
            }
            Opening::Flags {
                end,
                scoped,
                verbose,
            } => {
                if scoped {
                    self.scopes.push(self.verbose);
                }
                if let Some(verbose) = verbose {
                    self.verbose = verbose;
                }
                return Ok(end);
            }
            Opening::NonCapturing => {}
        }
        self.scopes.push(self.verbose);
        Ok(pos + 1)
    }

    /// Decide what kind of group the `(` at `pos` opens
    fn classify(&self, pos: usize) -> Result<Opening> {
        let rest = &self.pattern[pos + 1..];
        let Some(after_question) = rest.strip_prefix('?') else {
            return Ok(Opening::Capturing);
        };
        if after_question.starts_with("P<") {
            return Ok(Opening::Capturing);
        }
        let Some(after_angle) = after_question.strip_prefix('<') else {
            return Ok(Self::classify_flags(pos, after_question));
        };
        if after_angle.starts_with(['=', '!']) {
            // lookbehind
            return Ok(Opening::NonCapturing);
        }

        let name_len = after_angle
            .char_indices()
            .find(|&(_, c)| !is_identifier_char(c))
            .map_or(after_angle.len(), |(i, _)| i);
        if name_len == 0 || !after_angle[name_len..].starts_with('>') {
            return Err(TransformError::UnterminatedGroupName { position: pos });
        }

        let name_end = pos + 3 + name_len;
        Ok(Opening::Named {
            name_end,
            end: name_end + 1,
        })
    }

    /// Recognize `(?imsx-imsx)` and `(?imsx-imsx:`
    fn classify_flags(pos: usize, after_question: &str) -> Opening {
        let flags_len = after_question
            .bytes()
            .take_while(|&b| b.is_ascii_alphabetic() || b == b'-')
            .count();
        let scoped = match after_question.as_bytes().get(flags_len) {
            Some(b')') => false,
            Some(b':') => true,
            _ => return Opening::NonCapturing,
        };

        let mut verbose = None;
        let mut negated = false;
        for b in after_question[..flags_len].bytes() {
            match b {
                b'-' => negated = true,
                b'x' => verbose = Some(!negated),
                _ => {}
            }
        }

        Opening::Flags {
            // `(`, `?`, the flags, then `)` or `:`
            end: pos + 2 + flags_len + 1,
            scoped,
            verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_simple_named_group() {
        let result = transform("(?<name>abc)").unwrap();
        assert_eq!(result.pattern(), "(abc)");
        assert_eq!(result.indices().get("name"), Some(1));
        assert_eq!(result.group_count(), 1);
    }

    #[test]
    fn test_transform_literals() {
        let result = transform("abc").unwrap();
        assert_eq!(result.pattern(), "abc");
        assert_eq!(result.group_count(), 0);
    }

    #[test]
    fn test_transform_empty() {
        let result = transform("").unwrap();
        assert_eq!(result.pattern(), "");
        assert!(result.indices().is_empty());
    }

    #[test]
    fn test_transform_nested_groups() {
        let result = transform("(?<outer>(?<inner>abc))").unwrap();
        assert_eq!(result.pattern(), "((abc))");
        assert_eq!(result.indices().get("outer"), Some(1));
        assert_eq!(result.indices().get("inner"), Some(2));
    }

    #[test]
    fn test_unnamed_groups_consume_indices() {
        let result = transform(r"(a)(?<b>b)((c)(?<d>d))").unwrap();
        assert_eq!(result.pattern(), "(a)(b)((c)(d))");
        assert_eq!(result.indices().get("b"), Some(2));
        assert_eq!(result.indices().get("d"), Some(5));
        assert_eq!(result.group_count(), 5);
    }

    #[test]
    fn test_non_capturing_groups_are_skipped() {
        let result = transform(r"(?:x)(?=y)(?!z)(?<=p)(?<!q)(?i)(?<n>a)").unwrap();
        assert_eq!(result.pattern(), r"(?:x)(?=y)(?!z)(?<=p)(?<!q)(?i)(a)");
        assert_eq!(result.indices().get("n"), Some(1));
        assert_eq!(result.group_count(), 1);
    }

    #[test]
    fn test_escaped_parens_are_literal() {
        let result = transform(r"\((?<foo>\d\d)\)").unwrap();
        assert_eq!(result.pattern(), r"\((\d\d)\)");
        assert_eq!(result.indices().get("foo"), Some(1));
        assert_eq!(result.group_count(), 1);
    }

    #[test]
    fn test_escaped_backslash_before_paren() {
        // `\\` is an escaped backslash, so the `(` that follows opens a group
        let result = transform(r"\\(?<a>x)").unwrap();
        assert_eq!(result.pattern(), r"\\(x)");
        assert_eq!(result.indices().get("a"), Some(1));
    }

    #[test]
    fn test_parens_in_character_class() {
        let result = transform(r"[(?<x>)](?<y>a)").unwrap();
        assert_eq!(result.pattern(), r"[(?<x>)](a)");
        assert_eq!(result.indices().get("x"), None);
        assert_eq!(result.indices().get("y"), Some(1));
    }

    #[test]
    fn test_escaped_bracket_in_class() {
        let result = transform(r"[\]()](?<y>a)").unwrap();
        assert_eq!(result.pattern(), r"[\]()](a)");
        assert_eq!(result.group_count(), 1);
    }

    #[test]
    fn test_escaped_bracket_outside_class() {
        let result = transform(r"\[(?<y>a)\]").unwrap();
        assert_eq!(result.pattern(), r"\[(a)\]");
        assert_eq!(result.indices().get("y"), Some(1));
    }

    #[test]
    fn test_engine_named_group_consumes_index() {
        let result = transform(r"(?P<a>\d)(?<b>\w)").unwrap();
        assert_eq!(result.pattern(), r"(?P<a>\d)(\w)");
        assert_eq!(result.indices().get("a"), None);
        assert_eq!(result.indices().get("b"), Some(2));
        assert_eq!(result.group_count(), 2);
    }

    #[test]
    fn test_engine_backreference_is_not_a_group() {
        let result = transform(r"(?P<a>x)(?P=a)(?<b>y)").unwrap();
        assert_eq!(result.indices().get("b"), Some(2));
        assert_eq!(result.group_count(), 2);
    }

    #[test]
    fn test_leading_bracket_in_class_is_literal() {
        let result = transform(r"[]()](?<x>y)").unwrap();
        assert_eq!(result.pattern(), r"[]()](y)");
        assert_eq!(result.indices().get("x"), Some(1));
        assert_eq!(result.group_count(), 1);

        let result = transform(r"[^]()](?<x>y)").unwrap();
        assert_eq!(result.pattern(), r"[^]()](y)");
        assert_eq!(result.indices().get("x"), Some(1));
        assert_eq!(result.group_count(), 1);
    }

    #[test]
    fn test_nested_classes() {
        let result = transform(r"[a[()]](?<x>y)").unwrap();
        assert_eq!(result.pattern(), r"[a[()]](y)");
        assert_eq!(result.indices().get("x"), Some(1));
        assert_eq!(result.group_count(), 1);

        let result = transform(r"[[:alpha:](][^]()](?<x>y)").unwrap();
        assert_eq!(result.indices().get("x"), Some(1));
        assert_eq!(result.group_count(), 1);
    }

    #[test]
    fn test_verbose_comments_are_skipped() {
        let result = transform("(?x)a # comment (\n(?<n>\\d)").unwrap();
        assert_eq!(result.pattern(), "(?x)a # comment (\n(\\d)");
        assert_eq!(result.indices().get("n"), Some(1));
        assert_eq!(result.group_count(), 1);
    }

    #[test]
    fn test_verbose_mode_can_be_cleared() {
        let result = transform("(?x)(?-x)a#(\n(?<n>b)").unwrap();
        assert_eq!(result.indices().get("n"), Some(2));
        assert_eq!(result.group_count(), 2);
    }

    #[test]
    fn test_verbose_mode_is_scoped_to_its_group() {
        let result = transform("(?x:a # (\n)#(\n(?<n>b)").unwrap();
        assert_eq!(result.indices().get("n"), Some(2));
        assert_eq!(result.group_count(), 2);

        let result = transform("((?x)a # (\n)#(\n(?<n>b)").unwrap();
        assert_eq!(result.indices().get("n"), Some(3));
        assert_eq!(result.group_count(), 3);
    }

    #[test]
    fn test_escaped_hash_in_verbose_mode() {
        let result = transform(r"(?x)\#(?<n>a)").unwrap();
        assert_eq!(result.indices().get("n"), Some(1));
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let result = transform(r"^(?<first>\d)(?<first>\d)$").unwrap();
        assert_eq!(result.indices().get("first"), Some(2));
        assert_eq!(result.group_count(), 2);
    }

    #[test]
    fn test_unicode_is_preserved() {
        let result = transform("(?<名前>こんにちは)🎉(?<emoji>🎉)").unwrap();
        assert_eq!(result.pattern(), "(こんにちは)🎉(🎉)");
        assert_eq!(result.indices().get("名前"), Some(1));
        assert_eq!(result.indices().get("emoji"), Some(2));
    }

    #[test]
    fn test_missing_terminator() {
        let err = transform("(?<hours<abc)").unwrap_err();
        assert_eq!(err, TransformError::UnterminatedGroupName { position: 0 });
        assert!(err.to_string().contains("missing in named group"));
    }

    #[test]
    fn test_missing_terminator_at_end() {
        assert!(transform("(?<name").is_err());
        assert!(transform("(?<").is_err());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        assert!(transform("(?<>a)").is_err());
    }

    #[test]
    fn test_missing_terminator_deeply_nested() {
        let err = transform("((((((?<x-y>a))))))").unwrap_err();
        assert_eq!(err.position(), 5);
    }

    #[test]
    fn test_other_grammar_errors_pass_through() {
        // Unbalanced parens are for the engine to reject
        let result = transform("((?<a>x)").unwrap();
        assert_eq!(result.pattern(), "((x)");
        assert_eq!(result.group_count(), 2);

        let result = transform("?").unwrap();
        assert_eq!(result.pattern(), "?");
    }

    #[test]
    fn test_trailing_backslash() {
        let result = transform("(?<a>x)\\").unwrap();
        assert_eq!(result.pattern(), "(x)\\");
    }

    #[test]
    fn test_group_offsets() {
        let result = transform("a(b)(?<c>d)").unwrap();
        let offsets: Vec<_> = result.indices().groups().iter().map(|g| g.offset).collect();
        assert_eq!(offsets, vec![1, 4]);
    }

    #[test]
    fn test_into_parts() {
        let (pattern, indices) = transform("(?<x>1)").unwrap().into_parts();
        assert_eq!(pattern, "(1)");
        assert_eq!(indices.get("x"), Some(1));
    }
}
