use std::ops::Range;

use super::{Item, ItemIndex, ItemKind, Stream, StreamId};
use crate::{errors::SimilarityError, tokenizer::token::Token};

/// The checksummed, typed items of every input stream, concatenated.
///
/// A sentinel item exists before the first stream, between every two
/// consecutive streams and after the last one. Items are only ever appended,
/// and only through whole streams so that this layout always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStore {
    items: Vec<Item>,
    streams: Vec<Stream>,
}

impl Default for ItemStore {
    fn default() -> Self { Self::new() }
}

impl ItemStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: vec![Item::sentinel()],
            streams: Vec::new(),
        }
    }

    /// Append one stream given as `(kind, checksum)` pairs, in order, and
    /// close it with a sentinel.
    ///
    /// # Errors
    ///
    /// Returns `SimilarityError::UnexpectedSentinel` if the source yields a
    /// `Sentinel` item; the store is left as it was before the call.
    pub fn push_stream<I>(&mut self, items: I) -> Result<StreamId, SimilarityError>
    where
        I: IntoIterator<Item = (ItemKind, u32)>,
    {
        let stream = self.streams.len();
        let first_item = self.items.len();

        for (position, (kind, checksum)) in items.into_iter().enumerate() {
            if kind == ItemKind::Sentinel {
                self.items.truncate(first_item);
                return Err(SimilarityError::UnexpectedSentinel { stream, position });
            }
            self.append(kind, checksum);
        }

        let item_limit = self.append(ItemKind::Sentinel, 0);
        self.streams.push(Stream {
            first_item,
            item_limit,
        });

        Ok(stream)
    }

    /// Append one tokenized stream.
    ///
    /// # Errors
    ///
    /// Returns `SimilarityError::UnexpectedSentinel` if a token is a
    /// sentinel.
    pub fn push_tokens(&mut self, tokens: &[Token]) -> Result<StreamId, SimilarityError> {
        self.push_stream(tokens.iter().map(|token| (token.kind, token.checksum)))
    }

    pub(crate) fn append(&mut self, kind: ItemKind, checksum: u32) -> ItemIndex {
        self.items.push(Item::new(kind, checksum));
        self.items.len() - 1
    }

    /// Total number of slots, sentinels included.
    #[must_use]
    pub fn len(&self) -> usize { self.items.len() }

    /// Whether no stream holds any item.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.items.len() == self.streams.len() + 1 }

    #[must_use]
    pub fn items(&self) -> &[Item] { &self.items }

    #[must_use]
    pub fn item(&self, index: ItemIndex) -> Item { self.items[index] }

    #[must_use]
    pub fn kind_of(&self, index: ItemIndex) -> ItemKind { self.items[index].kind }

    #[must_use]
    pub fn checksum_of(&self, index: ItemIndex) -> u32 { self.items[index].checksum }

    #[must_use]
    pub fn streams(&self) -> &[Stream] { &self.streams }

    #[must_use]
    pub fn stream(&self, stream: StreamId) -> Stream { self.streams[stream] }

    /// The stream owning a non-sentinel item.
    #[must_use]
    pub fn stream_of(&self, item: ItemIndex) -> Option<StreamId> {
        let stream = self
            .streams
            .partition_point(|stream| stream.item_limit <= item);
        self.streams
            .get(stream)
            .filter(|candidate| candidate.contains(item))
            .map(|_| stream)
    }

    /// Move to the next item that is not `White`.
    ///
    /// # Panics
    ///
    /// Panics when called on the final sentinel: callers must stop at the
    /// first sentinel they reach.
    #[must_use]
    pub fn next_significant(&self, mut index: ItemIndex) -> ItemIndex {
        assert!(
            index + 1 < self.items.len(),
            "cannot advance past the final sentinel"
        );

        index += 1;
        while self.kind_of(index) == ItemKind::White {
            index += 1;
        }
        index
    }

    /// Move to the previous item that is not `White`.
    ///
    /// # Panics
    ///
    /// Panics when called on the leading sentinel.
    #[must_use]
    pub fn previous_significant(&self, mut index: ItemIndex) -> ItemIndex {
        assert!(index > 0, "cannot move before the leading sentinel");

        index -= 1;
        while self.kind_of(index) == ItemKind::White {
            index -= 1;
        }
        index
    }

    /// Number of `Normal` items in `range`.
    #[must_use]
    pub fn normal_count(&self, range: Range<ItemIndex>) -> usize {
        self.items[range]
            .iter()
            .filter(|item| item.kind == ItemKind::Normal)
            .count()
    }

    /// Number of items covered by a run of `normal_count` `Normal` items
    /// starting at `first_item`, including embedded items of other kinds and
    /// the `Delimiter` and `White` items trailing the run up to the next
    /// `Normal` item or sentinel. A run never extends past its stream.
    #[must_use]
    pub fn extent(&self, first_item: ItemIndex, normal_count: usize) -> usize {
        let mut index = first_item;
        let mut remaining = normal_count;

        while remaining > 0 {
            match self.kind_of(index) {
                ItemKind::Normal => remaining -= 1,
                ItemKind::Delimiter | ItemKind::White => {}
                ItemKind::Sentinel => break,
            }
            index += 1;
        }

        while matches!(self.kind_of(index), ItemKind::Delimiter | ItemKind::White) {
            index += 1;
        }

        index - first_item
    }
}
