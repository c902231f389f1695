#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position of an item in the global, insertion-ordered item sequence.
pub type ItemIndex = usize;

/// Role of an item in the clustering process.
///
/// `Normal` and `Delimiter` items take part in matching, but only `Normal`
/// items count towards a cluster's size. `White` items occupy a slot and are
/// otherwise skipped over. `Sentinel` items mark stream boundaries and never
/// compare equal to anything.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Normal,
    Delimiter,
    White,
    Sentinel,
}

impl ItemKind {
    /// Whether items of this kind may start or continue a matched run.
    #[must_use]
    pub fn is_matchable(self) -> bool { matches!(self, ItemKind::Normal | ItemKind::Delimiter) }
}

/// One checksummed token of an input stream.
///
/// The checksum is only meaningful for `Normal` and `Delimiter` items.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub kind: ItemKind,
    pub checksum: u32,
}

impl Item {
    #[must_use]
    pub fn new(kind: ItemKind, checksum: u32) -> Self { Self { kind, checksum } }

    #[must_use]
    pub fn sentinel() -> Self { Self::new(ItemKind::Sentinel, 0) }
}
