use regex::Regex;

use super::{
    checksum::checksum,
    line_tokenizer::{compile_ignore_patterns, is_ignored, line_content},
    token::Token,
};
use crate::{errors::SimilarityError, items::ItemKind};

/// Splits text into one `Normal` token per word, a word being a maximal run
/// of non-whitespace characters hashed on its bytes.
///
/// Whitespace and ignored lines are kept in the `original` of the preceding
/// word, or of the first word for what comes before it, so that every item
/// of a stream is a word. A text without words has no tokens.
///
/// ## Example
///
/// ```not_rust
/// "Hi there!" -> ["Hi ", "there!"]
/// " what? \n" -> [" what? \n"]
/// ```
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer {
    ignore_patterns: Vec<Regex>,
}

/// Tokenize words without ignoring any line.
pub fn word_tokenizer(text: &str) -> Vec<Token> { WordTokenizer::default().tokenize(text) }

impl WordTokenizer {
    /// Lines starting with a non-empty match of one of `ignore_patterns`
    /// contribute no word.
    ///
    /// # Errors
    ///
    /// Returns `SimilarityError::InvalidIgnorePattern` for the first
    /// pattern which is not a valid regular expression.
    pub fn new(ignore_patterns: &[String]) -> Result<Self, SimilarityError> {
        Ok(Self {
            ignore_patterns: compile_ignore_patterns(ignore_patterns)?,
        })
    }

    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut result = Vec::new();
        let mut leading = String::new();

        for line in text.split_inclusive('\n') {
            if is_ignored(&self.ignore_patterns, line_content(line)) {
                skip(&mut result, &mut leading, line);
                continue;
            }

            let mut rest = line;
            loop {
                let word_start = rest
                    .find(|character: char| !character.is_whitespace())
                    .unwrap_or(rest.len());
                skip(&mut result, &mut leading, &rest[..word_start]);
                rest = &rest[word_start..];
                if rest.is_empty() {
                    break;
                }

                let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                let word = &rest[..word_end];
                result.push(Token::new(
                    format!("{leading}{word}"),
                    ItemKind::Normal,
                    checksum(word.as_bytes()),
                ));
                leading.clear();
                rest = &rest[word_end..];
            }
        }

        result
    }
}

/// Keep `text` without giving it an item of its own.
fn skip(tokens: &mut [Token], leading: &mut String, text: &str) {
    match tokens.last_mut() {
        Some(last) => last.original.push_str(text),
        None => leading.push_str(text),
    }
}
