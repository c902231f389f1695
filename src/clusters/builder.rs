use log::{debug, trace};

use super::ClusterTable;
use crate::{
    config::Config,
    equivalence::{identical_size, normal_distance, sorted_candidates},
    items::{ItemIndex, ItemKind, ItemStore},
};

/// Discover every cluster of repeated items.
///
/// The sorted candidates are cut into blocks whose neighbours share at least
/// `minimum_cluster_size` normal items. Within a block, clusters are emitted
/// from the longest common size down to the shortest, dropping runs that are
/// merely the tail of a longer run and members overlapping the previous
/// member of the same cluster.
#[must_use]
pub fn build_clusters(store: &ItemStore, config: &Config) -> ClusterTable {
    let candidates = sorted_candidates(store);
    let mut table = ClusterTable::new();
    let mut block_count = 0;

    let mut block_start = 0;
    while block_start + 1 < candidates.len() {
        // `link_sizes[i]` is the common size of the block's candidates `i`
        // and `i + 1`.
        let mut link_sizes = Vec::new();
        while block_start + link_sizes.len() + 1 < candidates.len() {
            let position = block_start + link_sizes.len();
            let size = identical_size(
                store,
                candidates[position],
                candidates[position + 1],
                config.tolerance,
            );
            if size < config.minimum_cluster_size {
                break;
            }
            link_sizes.push(size);
        }

        let block_end = block_start + link_sizes.len() + 1;
        if !link_sizes.is_empty() {
            block_count += 1;
            cluster_block(
                store,
                config,
                &candidates[block_start..block_end],
                &mut link_sizes,
                &mut table,
            );
        }

        block_start = block_end;
    }

    debug!(
        "Found {} clusters with {} members in {block_count} blocks",
        table.len(),
        table.members().len()
    );

    table
}

fn cluster_block(
    store: &ItemStore,
    config: &Config,
    block: &[ItemIndex],
    link_sizes: &mut [usize],
    table: &mut ClusterTable,
) {
    debug_assert_eq!(block.len(), link_sizes.len() + 1);

    let mut previous_size = None;

    while let Some(cluster_size) =
        next_cluster_size(link_sizes, config.minimum_cluster_size, previous_size)
    {
        previous_size = Some(cluster_size);

        let mut link = 0;
        loop {
            // A link below the cluster size separates two clusters of the
            // same size but different contents.
            while link < link_sizes.len() && link_sizes[link] < cluster_size {
                link += 1;
            }
            if link == link_sizes.len() {
                break;
            }

            let run_start = link;
            while link < link_sizes.len() && link_sizes[link] >= cluster_size {
                link += 1;
            }

            // Links `run_start..link` join the candidates `run_start..=link`.
            let run = &block[run_start..=link];
            if extends_longer_run(store, run) {
                continue;
            }

            let first_items = separate_members(store, run, run_start, cluster_size, link_sizes);
            if first_items.len() >= 2 {
                let cluster = table.push_cluster(cluster_size, &first_items);
                trace!(
                    "Cluster {cluster} of size {cluster_size} with members at {first_items:?}"
                );
            }
        }
    }
}

/// The largest link size not yet processed: each pass proposes a strictly
/// smaller cluster size than the previous one.
fn next_cluster_size(
    link_sizes: &[usize],
    minimum_cluster_size: usize,
    previous_size: Option<usize>,
) -> Option<usize> {
    link_sizes
        .iter()
        .copied()
        .filter(|&size| {
            size >= minimum_cluster_size && previous_size.is_none_or(|previous| size < previous)
        })
        .max()
}

/// Whether every candidate of the run is preceded by the same item, in which
/// case the run is only the tail of a longer match anchored one item earlier.
/// That longer match is reported on its own, so the tail is dropped.
///
/// Tolerant matching may defeat this test: the tail of a fuzzy match is not
/// recognised as such.
fn extends_longer_run(store: &ItemStore, run: &[ItemIndex]) -> bool {
    let preceding = |candidate: ItemIndex| {
        let previous = store.previous_significant(candidate);
        (store.kind_of(previous) != ItemKind::Sentinel).then(|| store.checksum_of(previous))
    };

    let Some(checksum) = preceding(run[0]) else {
        return false;
    };

    run[1..]
        .iter()
        .all(|&candidate| preceding(candidate) == Some(checksum))
}

/// Keep the members of a tentative cluster that do not overlap the previous
/// kept member, in textual order.
///
/// When two members overlap, the later one is dropped and the link size
/// recorded next to the earlier of the two in the block is reduced to their
/// actual distance, so that a later, smaller pass may still cluster the
/// non-overlapping part.
fn separate_members(
    store: &ItemStore,
    run: &[ItemIndex],
    run_start: usize,
    cluster_size: usize,
    link_sizes: &mut [usize],
) -> Vec<ItemIndex> {
    let mut positions = run
        .iter()
        .enumerate()
        .map(|(offset, &first_item)| (first_item, run_start + offset))
        .collect::<Vec<_>>();
    positions.sort_unstable();

    let mut kept: Vec<(ItemIndex, usize)> = Vec::with_capacity(positions.len());
    for (first_item, block_position) in positions {
        let Some(&(anchor, anchor_position)) = kept.last() else {
            kept.push((first_item, block_position));
            continue;
        };

        match normal_distance(store, anchor, first_item, cluster_size) {
            None => kept.push((first_item, block_position)),
            Some(distance) => {
                // Both candidates belong to the run, so the link following
                // the earlier one in block order also does.
                let link = anchor_position.min(block_position);
                link_sizes[link] = link_sizes[link].min(distance);
            }
        }
    }

    kept.into_iter().map(|(first_item, _)| first_item).collect()
}
