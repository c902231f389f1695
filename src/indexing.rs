//! Put cluster members back into textual order and resolve overlaps between
//! members of different clusters.

use std::{cmp::Reverse, ops::Range};

use log::debug;

use crate::{
    clusters::{ClusterTable, MemberId},
    items::{ItemIndex, ItemStore, StreamId},
};

/// The surviving members in textual order, split into one slice per stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionIndex {
    order: Vec<MemberId>,
    stream_slices: Vec<Range<usize>>,
    overlap_count: usize,
    discarded_count: usize,
}

impl PositionIndex {
    /// Every surviving member, ordered by first item.
    #[must_use]
    pub fn order(&self) -> &[MemberId] { &self.order }

    /// Positions in `order()` of the members living in `stream`.
    #[must_use]
    pub fn stream_slice(&self, stream: StreamId) -> Range<usize> {
        self.stream_slices[stream].clone()
    }

    #[must_use]
    pub fn stream_members(&self, stream: StreamId) -> &[MemberId] {
        &self.order[self.stream_slice(stream)]
    }

    /// Members invalidated because they ran into an earlier member.
    #[must_use]
    pub fn overlap_count(&self) -> usize { self.overlap_count }

    /// Members invalidated because no other member of their cluster survived.
    #[must_use]
    pub fn discarded_count(&self) -> usize { self.discarded_count }
}

/// Order all members textually and invalidate those overlapping an earlier
/// kept member.
///
/// Members starting together are ordered by decreasing cluster size, so the
/// larger one is kept. A cluster left with a single surviving member no
/// longer describes a repetition and loses that member too.
pub fn index_positions(store: &ItemStore, table: &mut ClusterTable) -> PositionIndex {
    let mut order = (0..table.members().len())
        .filter(|&member| table.member(member).is_live())
        .collect::<Vec<_>>();
    order.sort_by_key(|&member| {
        let first_item = table.member(member).first_item;
        let size = table.member(member).cluster.map_or(0, |cluster| table.cluster(cluster).size);
        (first_item, Reverse(size), member)
    });

    let mut overlap_count = 0;
    let mut kept_until: ItemIndex = 0;
    for &member in &order {
        let Some(span) = table.member_span(store, member) else {
            continue;
        };
        if span.start < kept_until {
            table.invalidate(member);
            overlap_count += 1;
        } else {
            kept_until = span.end;
        }
    }

    let mut discarded_count = 0;
    for cluster in 0..table.len() {
        let live = table.live_members(cluster).take(2).collect::<Vec<_>>();
        if let [lonely] = live[..] {
            table.invalidate(lonely);
            discarded_count += 1;
        }
    }

    order.retain(|&member| table.member(member).is_live());

    let mut stream_slices = Vec::with_capacity(store.streams().len());
    let mut cursor = 0;
    for stream in store.streams() {
        let start = cursor;
        while cursor < order.len() && table.member(order[cursor]).first_item < stream.item_limit {
            cursor += 1;
        }
        stream_slices.push(start..cursor);
    }
    assert_eq!(
        cursor,
        order.len(),
        "every surviving member must belong to a stream"
    );

    debug!(
        "Indexed {} members, {overlap_count} overlapping and {discarded_count} isolated ones \
         invalidated",
        order.len()
    );

    PositionIndex {
        order,
        stream_slices,
        overlap_count,
        discarded_count,
    }
}
