//! Bring items starting identical runs next to each other, and measure how
//! long those runs are.

use std::cmp::Ordering;

use log::debug;

use crate::items::{ItemIndex, ItemKind, ItemStore};

/// All `Normal` and `Delimiter` items, ordered so that candidates beginning
/// identical runs are contiguous.
///
/// Candidates are compared on their checksum, then on the checksums of
/// the following non-white items, and so on until a difference is found.
/// A run reaching a sentinel first sorts after the other one; two runs
/// reaching sentinels together keep their original order.
#[must_use]
pub fn sorted_candidates(store: &ItemStore) -> Vec<ItemIndex> {
    let mut candidates = store
        .items()
        .iter()
        .enumerate()
        .filter(|(_, item)| item.kind.is_matchable())
        .map(|(index, _)| index)
        .collect::<Vec<_>>();

    candidates.sort_by(|&first, &second| compare_checksum_runs(store, first, second));

    debug!("Sorted {} candidate items", candidates.len());

    candidates
}

fn compare_checksum_runs(store: &ItemStore, first: ItemIndex, second: ItemIndex) -> Ordering {
    let mut left = first;
    let mut right = second;

    loop {
        match store.checksum_of(left).cmp(&store.checksum_of(right)) {
            Ordering::Equal => {}
            unequal => return unequal,
        }

        left = store.next_significant(left);
        right = store.next_significant(right);

        match (
            store.kind_of(left) == ItemKind::Sentinel,
            store.kind_of(right) == ItemKind::Sentinel,
        ) {
            (true, true) => return first.cmp(&second),
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
    }
}

/// Count the `Normal` items shared by the runs starting at `first` and
/// `second`, skipping over white items.
///
/// Once at least one item matched, up to `tolerance` mismatching positions
/// are accepted inside the run; a mismatch between two `Normal` items still
/// counts towards the size. Neither start may be a sentinel or a white item.
#[must_use]
pub fn identical_size(
    store: &ItemStore,
    first: ItemIndex,
    second: ItemIndex,
    tolerance: usize,
) -> usize {
    let mut left = first;
    let mut right = second;
    let mut normal_count = 0;
    let mut mismatch_count = 0;

    loop {
        if store.checksum_of(left) == store.checksum_of(right) {
            if store.kind_of(left) == ItemKind::Normal {
                normal_count += 1;
            }
        } else if normal_count > 0 && mismatch_count < tolerance {
            if store.kind_of(left) == ItemKind::Normal && store.kind_of(right) == ItemKind::Normal
            {
                normal_count += 1;
            }
            mismatch_count += 1;
        } else {
            break;
        }

        left = store.next_significant(left);
        right = store.next_significant(right);

        if store.kind_of(left) == ItemKind::Sentinel || store.kind_of(right) == ItemKind::Sentinel
        {
            break;
        }
    }

    normal_count
}

/// Count the `Normal` items from `start` up to `finish` (excluded), giving
/// up with `None` as soon as `maximum` of them have been seen.
///
/// `Some(distance)` therefore means that a run of `maximum` normal items
/// starting at `start` would reach past `finish`.
#[must_use]
pub fn normal_distance(
    store: &ItemStore,
    start: ItemIndex,
    finish: ItemIndex,
    maximum: usize,
) -> Option<usize> {
    debug_assert!(start < finish, "start must precede finish");
    debug_assert!(maximum > 0, "maximum must be positive");

    let mut counter = 0;
    for item in &store.items()[start..finish] {
        if item.kind == ItemKind::Normal {
            counter += 1;
            if counter == maximum {
                return None;
            }
        }
    }

    Some(counter)
}
