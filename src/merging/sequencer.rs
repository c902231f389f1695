use log::{debug, trace};

use super::Merging;
use crate::{
    clusters::{ClusterId, ClusterTable, MemberId},
    indexing::PositionIndex,
    items::{ItemIndex, ItemStore, StreamId},
};

/// Progress through one stream.
#[derive(Debug, Clone)]
struct StreamCursor {
    /// Next item to be listed.
    item: ItemIndex,

    /// Position in the position index of the next member to be listed, up
    /// to `member_limit` (excluded).
    next_member: usize,
    member_limit: usize,
}

impl StreamCursor {
    fn pending(&self, index: &PositionIndex) -> Option<MemberId> {
        (self.next_member < self.member_limit).then(|| index.order()[self.next_member])
    }
}

/// Decide the order in which streams are advanced over their members.
///
/// At each step, every cluster owning the next pending member of some stream
/// is costed by the number of items all streams would have to list as
/// different before reaching their first unlisted member of it. The cheapest
/// cluster wins, ties going to the one found first in stream order. This is
/// greedy: a cheap step now may force expensive ones later.
///
/// Committing a cluster lists, in every stream holding one of its unlisted
/// members, the other clusters' members standing in the way as cross matches,
/// then the cluster's member itself.
///
/// # Panics
///
/// Panics if the plan does not list every surviving member exactly once.
#[must_use]
pub fn sequence_mergings(
    store: &ItemStore,
    table: &ClusterTable,
    index: &PositionIndex,
) -> Vec<Merging> {
    let mut cursors = store
        .streams()
        .iter()
        .enumerate()
        .map(|(stream, bounds)| {
            let slice = index.stream_slice(stream);
            StreamCursor {
                item: bounds.first_item,
                next_member: slice.start,
                member_limit: slice.end,
            }
        })
        .collect::<Vec<_>>();

    let mut mergings = Vec::with_capacity(index.order().len());
    let mut group_count = 0;

    while let Some((cluster, cost)) = cheapest_cluster(store, table, index, &cursors) {
        trace!("Selected cluster {cluster} at cost {cost}");
        commit(store, table, index, &mut cursors, cluster, &mut mergings);
        group_count += 1;
    }

    assert_eq!(
        mergings.len(),
        index.order().len(),
        "every surviving member must be merged exactly once"
    );

    debug!(
        "Sequenced {} mergings in {group_count} groups",
        mergings.len()
    );

    mergings
}

fn pending_cluster(
    table: &ClusterTable,
    index: &PositionIndex,
    cursor: &StreamCursor,
) -> Option<ClusterId> {
    cursor
        .pending(index)
        .and_then(|member| table.member(member).cluster)
}

fn cheapest_cluster(
    store: &ItemStore,
    table: &ClusterTable,
    index: &PositionIndex,
    cursors: &[StreamCursor],
) -> Option<(ClusterId, usize)> {
    let mut best: Option<(ClusterId, usize)> = None;

    for (stream, cursor) in cursors.iter().enumerate() {
        let Some(cluster) = pending_cluster(table, index, cursor) else {
            continue;
        };

        let already_evaluated = cursors[..stream]
            .iter()
            .any(|earlier| pending_cluster(table, index, earlier) == Some(cluster));
        if already_evaluated {
            continue;
        }

        let cost = cluster_cost(store, table, cursors, cluster);
        trace!("Cluster {cluster} pending in stream {stream} costs {cost}");

        if best.is_none_or(|(_, best_cost)| cost < best_cost) {
            best = Some((cluster, cost));
        }
    }

    best
}

/// The items to be listed before reaching, in every stream, the first
/// unlisted member of `cluster`.
fn cluster_cost(
    store: &ItemStore,
    table: &ClusterTable,
    cursors: &[StreamCursor],
    cluster: ClusterId,
) -> usize {
    let mut cost = 0;

    for_each_next_occurrence(store, table, cursors, cluster, |stream, member| {
        cost += table.member(member).first_item - cursors[stream].item;
    });

    cost
}

/// Call `action` with the first unlisted member of `cluster` in each stream
/// holding one, in stream order.
fn for_each_next_occurrence(
    store: &ItemStore,
    table: &ClusterTable,
    cursors: &[StreamCursor],
    cluster: ClusterId,
    mut action: impl FnMut(StreamId, MemberId),
) {
    let mut stream = 0;
    let mut visited = None;

    for member in table.live_members(cluster) {
        let first_item = table.member(member).first_item;
        while first_item >= store.stream(stream).item_limit {
            stream += 1;
        }

        if first_item < cursors[stream].item || visited == Some(stream) {
            continue;
        }
        visited = Some(stream);

        action(stream, member);
    }
}

fn commit(
    store: &ItemStore,
    table: &ClusterTable,
    index: &PositionIndex,
    cursors: &mut [StreamCursor],
    cluster: ClusterId,
    mergings: &mut Vec<Merging>,
) {
    let mut targets = Vec::new();
    for_each_next_occurrence(store, table, cursors, cluster, |stream, member| {
        targets.push((stream, member));
    });

    let size = table.cluster(cluster).size;
    let mut is_group_start = true;

    for (stream, member) in targets {
        let cursor = &mut cursors[stream];

        loop {
            let pending = cursor.pending(index);
            assert!(
                pending.is_some(),
                "stream {stream} ran out of members before reaching member {member}"
            );
            let Some(pending) = pending.filter(|&pending| pending != member) else {
                break;
            };

            mergings.push(Merging {
                is_group_start,
                is_cross_match: true,
                stream,
                member: pending,
            });
            is_group_start = false;
            cursor.next_member += 1;
        }

        mergings.push(Merging {
            is_group_start,
            is_cross_match: false,
            stream,
            member,
        });
        is_group_start = false;

        let first_item = table.member(member).first_item;
        cursor.item = first_item + store.extent(first_item, size);
        cursor.next_member += 1;
    }
}
