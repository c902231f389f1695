use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ItemIndex;

/// Ordinal of an input stream, counted from 0 in insertion order.
pub type StreamId = usize;

/// The half-open range of item indices holding one input stream. The item at
/// `item_limit` is the sentinel closing the stream.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stream {
    pub first_item: ItemIndex,
    pub item_limit: ItemIndex,
}

impl Stream {
    #[must_use]
    pub fn len(&self) -> usize { self.item_limit - self.first_item }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.first_item == self.item_limit }

    #[must_use]
    pub fn contains(&self, item: ItemIndex) -> bool { self.range().contains(&item) }

    #[must_use]
    pub fn range(&self) -> Range<ItemIndex> { self.first_item..self.item_limit }
}
