#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::items::ItemIndex;

/// Ordinal of a cluster in its `ClusterTable`.
pub type ClusterId = usize;

/// Ordinal of a member in its `ClusterTable`. Member ids stay valid for the
/// whole run: members are invalidated, never removed.
pub type MemberId = usize;

/// A run of items repeated at two or more places of the input streams.
///
/// Every member of a cluster holds `size` `Normal` items. The members may
/// still differ in extent because of embedded `Delimiter` and `White` items.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    pub size: usize,

    /// Members of a cluster are stored next to each other, from here up to
    /// the next cluster's `first_member`.
    pub first_member: MemberId,
}

/// One occurrence of a cluster.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    /// The owning cluster, or `None` once the member has been invalidated
    /// because it overlapped another member.
    pub cluster: Option<ClusterId>,
    pub first_item: ItemIndex,
}

impl Member {
    #[must_use]
    pub fn is_live(&self) -> bool { self.cluster.is_some() }
}
