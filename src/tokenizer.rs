use std::ops::Deref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use token::Token;

pub mod checksum;
pub mod line_tokenizer;
pub mod token;
pub mod word_tokenizer;

/// Turns a text into the items of one stream.
pub type Tokenizer = dyn Fn(&str) -> Vec<Token>;

/// The tokenizers shipped with the crate, usable as `&*BuiltinTokenizer::Line`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuiltinTokenizer {
    /// One item per line, see `line_tokenizer`.
    #[default]
    Line,

    /// One item per word, see `word_tokenizer`.
    Word,
}

impl Deref for BuiltinTokenizer {
    type Target = Tokenizer;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Line => &line_tokenizer::line_tokenizer,
            Self::Word => &word_tokenizer::word_tokenizer,
        }
    }
}
