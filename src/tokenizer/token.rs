#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::items::ItemKind;

/// One item of a text, together with the text it was read from.
///
/// Concatenating the `original` field of every token of a text gives back
/// that text; `checksum` only covers the bytes deemed significant.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub original: String,
    pub kind: ItemKind,
    pub checksum: u32,
}

impl Token {
    #[must_use]
    pub fn new(original: impl Into<String>, kind: ItemKind, checksum: u32) -> Self {
        Self {
            original: original.into(),
            kind,
            checksum,
        }
    }
}
