//! The linear plan walking all streams in parallel, one cluster at a time.

mod sequencer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
pub use sequencer::sequence_mergings;

use crate::{clusters::MemberId, items::StreamId};

/// One step of the plan: catch up on the different items of `stream` until
/// `member`, then skip over that member.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merging {
    /// This step begins a new merge group.
    pub is_group_start: bool,

    /// The member is not an occurrence of the group's cluster but an
    /// incidental match standing in the way, to be listed as a difference.
    pub is_cross_match: bool,

    pub stream: StreamId,
    pub member: MemberId,
}

/// Split a plan into its merge groups.
pub fn merge_groups(mergings: &[Merging]) -> impl Iterator<Item = &[Merging]> {
    let mut rest = mergings;

    std::iter::from_fn(move || {
        let (first, tail) = rest.split_first()?;
        debug_assert!(first.is_group_start, "a plan must start with a group");

        let length = tail
            .iter()
            .position(|merging| merging.is_group_start)
            .map_or(rest.len(), |position| position + 1);
        let (group, remaining) = rest.split_at(length);
        rest = remaining;

        Some(group)
    })
}
