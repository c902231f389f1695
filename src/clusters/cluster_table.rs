use std::ops::Range;

use super::{Cluster, ClusterId, Member, MemberId};
use crate::items::{ItemIndex, ItemStore};

/// Clusters and their members.
///
/// The cluster list is always terminated by an empty sentinel cluster whose
/// `first_member` is one past the last member, so that the members of
/// cluster `c` are exactly `clusters[c].first_member..clusters[c +
/// 1].first_member`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterTable {
    clusters: Vec<Cluster>,
    members: Vec<Member>,
}

impl Default for ClusterTable {
    fn default() -> Self { Self::new() }
}

impl ClusterTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clusters: vec![Cluster {
                size: 0,
                first_member: 0,
            }],
            members: Vec::new(),
        }
    }

    /// Add a cluster of `size` normal items whose members start at
    /// `first_items`, given in ascending order.
    pub(crate) fn push_cluster(&mut self, size: usize, first_items: &[ItemIndex]) -> ClusterId {
        debug_assert!(
            first_items.is_sorted(),
            "cluster members must be in textual order"
        );

        let id = self.clusters.len() - 1;
        self.clusters[id].size = size;
        self.members
            .extend(first_items.iter().map(|&first_item| Member {
                cluster: Some(id),
                first_item,
            }));
        self.clusters.push(Cluster {
            size: 0,
            first_member: self.members.len(),
        });

        id
    }

    /// Mark a member as dead. Its id stays valid.
    pub(crate) fn invalidate(&mut self, member: MemberId) { self.members[member].cluster = None; }

    /// Number of clusters, the terminating sentinel excluded.
    #[must_use]
    pub fn len(&self) -> usize { self.clusters.len() - 1 }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// All clusters, the terminating sentinel excluded.
    #[must_use]
    pub fn clusters(&self) -> &[Cluster] { &self.clusters[..self.len()] }

    #[must_use]
    pub fn cluster(&self, cluster: ClusterId) -> &Cluster { &self.clusters[cluster] }

    /// All members of all clusters, dead ones included.
    #[must_use]
    pub fn members(&self) -> &[Member] { &self.members }

    #[must_use]
    pub fn member(&self, member: MemberId) -> &Member { &self.members[member] }

    #[must_use]
    pub fn member_ids(&self, cluster: ClusterId) -> Range<MemberId> {
        self.clusters[cluster].first_member..self.clusters[cluster + 1].first_member
    }

    /// The surviving members of a cluster, in textual order.
    pub fn live_members(&self, cluster: ClusterId) -> impl Iterator<Item = MemberId> + '_ {
        self.member_ids(cluster)
            .filter(|&member| self.members[member].is_live())
    }

    #[must_use]
    pub fn live_member_count(&self) -> usize {
        self.members.iter().filter(|member| member.is_live()).count()
    }

    /// The items occupied by a surviving member, or `None` for a dead one.
    #[must_use]
    pub fn member_span(&self, store: &ItemStore, member: MemberId) -> Option<Range<ItemIndex>> {
        let Member {
            cluster,
            first_item,
        } = self.members[member];
        let size = self.clusters[cluster?].size;

        Some(first_item..first_item + store.extent(first_item, size))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::items::ItemKind;

    #[test]
    fn test_sentinel_cluster_bounds_members() {
        let mut table = ClusterTable::new();
        assert!(table.is_empty());

        let first = table.push_cluster(3, &[1, 9]);
        let second = table.push_cluster(1, &[2, 5, 7]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.member_ids(first), 0..2);
        assert_eq!(table.member_ids(second), 2..5);
        assert_eq!(
            table.clusters(),
            &[
                Cluster {
                    size: 3,
                    first_member: 0
                },
                Cluster {
                    size: 1,
                    first_member: 2
                }
            ]
        );
    }

    #[test]
    fn test_invalidated_members_keep_their_ids() {
        let mut table = ClusterTable::new();
        let cluster = table.push_cluster(1, &[1, 3, 5]);

        table.invalidate(1);

        assert_eq!(table.live_members(cluster).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(table.live_member_count(), 2);
        assert_eq!(
            table.member(1),
            &Member {
                cluster: None,
                first_item: 3
            }
        );
    }

    #[test]
    fn test_member_span() {
        let mut store = ItemStore::new();
        store
            .push_stream([
                (ItemKind::Normal, 1),
                (ItemKind::White, 0),
                (ItemKind::Normal, 2),
                (ItemKind::Normal, 3),
            ])
            .unwrap();
        let mut table = ClusterTable::new();
        table.push_cluster(2, &[1, 3]);
        table.invalidate(1);

        assert_eq!(table.member_span(&store, 0), Some(1..4));
        assert_eq!(table.member_span(&store, 1), None);
    }
}
