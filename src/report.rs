//! Replay a merge plan into the hunks of a merged listing.

use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    clusters::{ClusterId, ClusterTable, MemberId},
    items::{ItemIndex, ItemStore, StreamId},
    merging::{Merging, merge_groups},
};

/// Items of one stream listed as they are, without a counterpart.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    pub stream: StreamId,
    pub items: Range<ItemIndex>,

    /// Set when the items form a member of another cluster, crossed while
    /// catching up with the hunk's cluster.
    pub crossed: Option<MemberId>,
}

/// One occurrence of the hunk's cluster.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub stream: StreamId,
    pub member: MemberId,
    pub items: Range<ItemIndex>,
}

/// The differences leading to one merge group, then the group's common
/// material. The final hunk of a listing has no cluster and holds the
/// trailing differences of every stream.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub cluster: Option<ClusterId>,
    pub differences: Vec<Difference>,
    pub common: Vec<Occurrence>,
}

/// Walk the plan, following every stream from its first item to its end.
///
/// # Panics
///
/// Panics if the plan refers to an invalidated member.
#[must_use]
pub fn replay(store: &ItemStore, table: &ClusterTable, mergings: &[Merging]) -> Vec<Hunk> {
    let mut positions = store
        .streams()
        .iter()
        .map(|stream| stream.first_item)
        .collect::<Vec<_>>();
    let mut hunks = Vec::new();

    for group in merge_groups(mergings) {
        let mut hunk = Hunk {
            cluster: None,
            differences: Vec::new(),
            common: Vec::new(),
        };

        for &Merging {
            is_cross_match,
            stream,
            member,
            ..
        } in group
        {
            let Some(items) = table.member_span(store, member) else {
                panic!("member {member} is merged but was invalidated");
            };

            let position = &mut positions[stream];
            if *position < items.start {
                hunk.differences.push(Difference {
                    stream,
                    items: *position..items.start,
                    crossed: None,
                });
            }
            *position = items.end;

            if is_cross_match {
                hunk.differences.push(Difference {
                    stream,
                    items,
                    crossed: Some(member),
                });
            } else {
                hunk.cluster = table.member(member).cluster;
                hunk.common.push(Occurrence {
                    stream,
                    member,
                    items,
                });
            }
        }

        hunks.push(hunk);
    }

    let trailing = store
        .streams()
        .iter()
        .zip(positions)
        .enumerate()
        .filter(|(_, (bounds, position))| *position < bounds.item_limit)
        .map(|(stream, (bounds, position))| Difference {
            stream,
            items: position..bounds.item_limit,
            crossed: None,
        })
        .collect::<Vec<_>>();
    if !trailing.is_empty() {
        hunks.push(Hunk {
            cluster: None,
            differences: trailing,
            common: Vec::new(),
        });
    }

    hunks
}
