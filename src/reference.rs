//! Map global item indices back to human readable locations.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::items::{ItemIndex, ItemStore, StreamId};

/// A location inside one stream: `number` counts items from 1.
///
/// The sentinel closing a stream of `n` items is item `n + 1` of that
/// stream, the leading sentinel is item 0 of the first one.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reference {
    pub stream: StreamId,
    pub number: usize,
}

impl ItemStore {
    /// Locate any item, sentinels included. Returns `None` if the store has
    /// no stream or `item` lies past the final sentinel.
    #[must_use]
    pub fn reference(&self, item: ItemIndex) -> Option<Reference> {
        let stream = self
            .streams()
            .partition_point(|stream| stream.item_limit < item);
        let bounds = self.streams().get(stream)?;

        Some(Reference {
            stream,
            number: item + 1 - bounds.first_item,
        })
    }
}

/// Short names for `count` streams: `-` and `+` for two streams, as diff
/// does, lower case letters otherwise, all of the same length.
#[must_use]
pub fn nick_names(count: usize) -> Vec<String> {
    const LETTERS: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

    if count == 2 {
        return vec!["-".to_owned(), "+".to_owned()];
    }

    let mut width = 1;
    let mut capacity = 26_usize;
    while count > capacity {
        width += 1;
        capacity = capacity.saturating_mul(26);
    }

    (0..count)
        .map(|mut value| {
            let mut letters = vec!['a'; width];
            for letter in letters.iter_mut().rev() {
                *letter = char::from(LETTERS[value % 26]);
                value /= 26;
            }
            letters.into_iter().collect()
        })
        .collect()
}

/// A reference paired with the nick name of its stream, such as `b12` or
/// `+.EOF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceString<'a> {
    pub nick_name: &'a str,
    pub reference: Reference,
    pub is_end_of_stream: bool,
}

impl fmt::Display for ReferenceString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end_of_stream {
            write!(f, "{}.EOF", self.nick_name)
        } else {
            write!(f, "{}{}", self.nick_name, self.reference.number)
        }
    }
}
