use regex::Regex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{checksum::Checksum, token::Token};
use crate::{errors::SimilarityError, items::ItemKind};

/// How lines are compared. With everything off, lines match only when they
/// are byte for byte identical, terminators aside.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct LineOptions {
    /// Compare ASCII letters regardless of their case.
    pub ignore_case: bool,

    /// Do not compare whitespace at all.
    pub ignore_all_space: bool,

    /// Compare any run of whitespace as a single space.
    pub ignore_space_change: bool,

    /// Lines without letters, digits or punctuation never match.
    pub ignore_blank_lines: bool,

    /// Lines without letters or digits match but do not count towards the
    /// size of a cluster.
    pub ignore_delimiters: bool,

    /// Lines starting with a non-empty match of one of these regular
    /// expressions never match.
    pub ignore_patterns: Vec<String>,
}

/// Splits text into one token per line, each keeping its line terminator.
///
/// ```not_rust
/// "Hello\nWorld" -> ["Hello\n", "World"]
/// "Line 1\r\nLine 2" -> ["Line 1\r\n", "Line 2"]
/// ```
#[derive(Debug, Clone, Default)]
pub struct LineTokenizer {
    options: LineOptions,
    ignore_patterns: Vec<Regex>,
}

/// Tokenize lines with the default `LineOptions`.
pub fn line_tokenizer(text: &str) -> Vec<Token> { LineTokenizer::default().tokenize(text) }

impl LineTokenizer {
    /// # Errors
    ///
    /// Returns `SimilarityError::InvalidIgnorePattern` for the first
    /// pattern which is not a valid regular expression.
    pub fn new(options: LineOptions) -> Result<Self, SimilarityError> {
        let ignore_patterns = compile_ignore_patterns(&options.ignore_patterns)?;

        Ok(Self {
            options,
            ignore_patterns,
        })
    }

    #[must_use]
    pub fn options(&self) -> &LineOptions { &self.options }

    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split_inclusive('\n')
            .map(|line| self.line_token(line))
            .collect()
    }

    fn line_token(&self, line: &str) -> Token {
        let content = line_content(line);

        if is_ignored(&self.ignore_patterns, content) {
            return Token::new(line, ItemKind::White, 0);
        }

        let mut checksum = Checksum::default();
        let mut has_alphanumerics = false;
        let mut has_delimiters = false;
        let mut previous_is_space = false;
        let mut buffer = [0; 4];

        for character in content.chars() {
            let is_space = character.is_whitespace();
            if is_space {
                if self.options.ignore_all_space
                    || (self.options.ignore_space_change && previous_is_space)
                {
                    previous_is_space = true;
                    continue;
                }
            } else if character.is_alphanumeric() {
                has_alphanumerics = true;
            } else {
                has_delimiters = true;
            }
            previous_is_space = is_space;

            let significant = if is_space && self.options.ignore_space_change {
                ' '
            } else if self.options.ignore_case {
                character.to_ascii_uppercase()
            } else {
                character
            };
            for &byte in significant.encode_utf8(&mut buffer).as_bytes() {
                checksum.push(byte);
            }
        }

        let kind = if has_alphanumerics {
            ItemKind::Normal
        } else if !has_delimiters && self.options.ignore_blank_lines {
            ItemKind::White
        } else if self.options.ignore_delimiters {
            ItemKind::Delimiter
        } else {
            ItemKind::Normal
        };

        Token::new(line, kind, checksum.value())
    }
}

/// Compile ignore patterns so that they only match at the start of a line.
pub(super) fn compile_ignore_patterns(patterns: &[String]) -> Result<Vec<Regex>, SimilarityError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(&format!("^(?:{pattern})")).map_err(|source| {
                SimilarityError::InvalidIgnorePattern {
                    pattern: pattern.clone(),
                    source,
                }
            })
        })
        .collect()
}

/// The line without its terminator.
pub(super) fn line_content(line: &str) -> &str {
    line.strip_suffix('\n')
        .map_or(line, |content| content.strip_suffix('\r').unwrap_or(content))
}

pub(super) fn is_ignored(patterns: &[Regex], content: &str) -> bool {
    patterns.iter().any(|pattern| {
        pattern
            .find(content)
            .is_some_and(|found| !found.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use crate::tokenizer::checksum::checksum;

    fn tokenize(options: LineOptions, text: &str) -> Vec<Token> {
        LineTokenizer::new(options).unwrap().tokenize(text)
    }

    fn checksums(options: LineOptions, text: &str) -> Vec<u32> {
        tokenize(options, text)
            .into_iter()
            .map(|token| token.checksum)
            .collect()
    }

    #[test]
    fn test_terminators_are_kept_but_not_hashed() {
        let tokens = line_tokenizer("a\nb\r\nc");

        assert_eq!(
            tokens,
            vec![
                Token::new("a\n", ItemKind::Normal, checksum(b"a")),
                Token::new("b\r\n", ItemKind::Normal, checksum(b"b")),
                Token::new("c", ItemKind::Normal, checksum(b"c")),
            ]
        );
        assert!(line_tokenizer("").is_empty());
    }

    #[test]
    fn test_ignore_case() {
        let text = "Hello\nHELLO\n";
        let options = LineOptions {
            ignore_case: true,
            ..LineOptions::default()
        };

        let [first, second] = checksums(LineOptions::default(), text)[..] else {
            panic!("expected two lines");
        };
        assert_ne!(first, second);

        let [first, second] = checksums(options, text)[..] else {
            panic!("expected two lines");
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_whitespace_options() {
        let text = "a  b\na b\nab\n";

        let all_space = checksums(
            LineOptions {
                ignore_all_space: true,
                ..LineOptions::default()
            },
            text,
        );
        assert_eq!(all_space, vec![checksum(b"ab"); 3]);

        let space_change = checksums(
            LineOptions {
                ignore_space_change: true,
                ..LineOptions::default()
            },
            text,
        );
        assert_eq!(
            space_change,
            vec![checksum(b"a b"), checksum(b"a b"), checksum(b"ab")]
        );
    }

    #[test_case("x = 1", false, false, ItemKind::Normal ; "code")]
    #[test_case("};", false, false, ItemKind::Normal ; "punctuation")]
    #[test_case("};", false, true, ItemKind::Delimiter ; "ignored punctuation")]
    #[test_case("   ", false, false, ItemKind::Normal ; "blank")]
    #[test_case("   ", true, false, ItemKind::White ; "ignored blank")]
    #[test_case("", false, true, ItemKind::Delimiter ; "empty with ignored delimiters")]
    #[test_case("};", true, false, ItemKind::Normal ; "punctuation is not blank")]
    fn test_classification(
        line: &str,
        ignore_blank_lines: bool,
        ignore_delimiters: bool,
        expected: ItemKind,
    ) {
        let options = LineOptions {
            ignore_blank_lines,
            ignore_delimiters,
            ..LineOptions::default()
        };

        let tokens = tokenize(options, &format!("{line}\n"));

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, expected);
    }

    #[test]
    fn test_ignore_patterns() {
        let options = LineOptions {
            ignore_patterns: vec!["#".to_owned(), "x*".to_owned()],
            ..LineOptions::default()
        };

        let kinds = tokenize(options, "# comment\ncode # not a comment\nyyy\n")
            .into_iter()
            .map(|token| token.kind)
            .collect::<Vec<_>>();

        assert_eq!(
            kinds,
            vec![ItemKind::White, ItemKind::Normal, ItemKind::Normal]
        );
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        let options = LineOptions {
            ignore_patterns: vec!["(".to_owned()],
            ..LineOptions::default()
        };

        let result = LineTokenizer::new(options);

        assert!(matches!(
            result,
            Err(SimilarityError::InvalidIgnorePattern { ref pattern, .. }) if pattern == "("
        ));
    }
}
