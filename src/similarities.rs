use log::info;

use crate::{
    clusters::{ClusterId, ClusterTable, build_clusters},
    config::Config,
    errors::SimilarityError,
    indexing::{PositionIndex, index_positions},
    items::{ItemIndex, ItemStore, StreamId},
    merging::{Merging, merge_groups, sequence_mergings},
    reference::{ReferenceString, nick_names},
    report::{Hunk, replay},
    tokenizer::Tokenizer,
};

/// Everything learnt about the repetitions across a set of streams, along
/// with the plan for listing them side by side.
#[derive(Debug, Clone)]
pub struct Similarities {
    items: ItemStore,
    clusters: ClusterTable,
    index: PositionIndex,
    mergings: Vec<Merging>,
    nick_names: Vec<String>,
}

/// Cluster the items of every stream of `items` and plan their merged
/// listing.
///
/// Stores without streams, with empty streams or without any repetition
/// are fine and simply yield no merging.
///
/// # Errors
///
/// Returns `SimilarityError::InvalidMinimumClusterSize` if `config` is
/// invalid. Nothing is computed in that case.
pub fn find_similarities(
    items: ItemStore,
    config: &Config,
) -> Result<Similarities, SimilarityError> {
    config.validate()?;

    info!(
        "Read {} streams, {} items",
        items.streams().len(),
        items.len() - items.streams().len() - 1
    );

    let mut clusters = build_clusters(&items, config);
    let members = clusters.members().len();
    let index = index_positions(&items, &mut clusters);
    let mergings = sequence_mergings(&items, &clusters, &index);

    info!(
        "Work summary: {} clusters, {members} members, {} overlaps, {} mergings",
        clusters.len(),
        index.overlap_count(),
        mergings.len()
    );

    let nick_names = nick_names(items.streams().len());

    Ok(Similarities {
        items,
        clusters,
        index,
        mergings,
        nick_names,
    })
}

/// Tokenize every text into its own stream, then `find_similarities`.
///
/// # Errors
///
/// Returns `SimilarityError::InvalidMinimumClusterSize` if `config` is
/// invalid, or `SimilarityError::UnexpectedSentinel` if the tokenizer
/// produces a sentinel token.
pub fn compare_texts<S: AsRef<str>>(
    texts: &[S],
    tokenizer: &Tokenizer,
    config: &Config,
) -> Result<Similarities, SimilarityError> {
    // Before tokenizing, so that a bad configuration is reported first.
    config.validate()?;

    let mut items = ItemStore::new();
    for text in texts {
        items.push_tokens(&tokenizer(text.as_ref()))?;
    }

    find_similarities(items, config)
}

impl Similarities {
    #[must_use]
    pub fn items(&self) -> &ItemStore { &self.items }

    #[must_use]
    pub fn clusters(&self) -> &ClusterTable { &self.clusters }

    #[must_use]
    pub fn index(&self) -> &PositionIndex { &self.index }

    #[must_use]
    pub fn mergings(&self) -> &[Merging] { &self.mergings }

    /// The merge groups of the plan, in listing order.
    pub fn groups(&self) -> impl Iterator<Item = &[Merging]> { merge_groups(&self.mergings) }

    /// The plan replayed as the hunks of a merged listing.
    #[must_use]
    pub fn hunks(&self) -> Vec<Hunk> { replay(&self.items, &self.clusters, &self.mergings) }

    /// Clusters with at least one surviving member.
    pub fn live_clusters(&self) -> impl Iterator<Item = ClusterId> + '_ {
        (0..self.clusters.len())
            .filter(|&cluster| self.clusters.live_members(cluster).next().is_some())
    }

    /// Number of `Normal` items of `stream` outside of any occurrence
    /// listed as common.
    #[must_use]
    pub fn different_items(&self, stream: StreamId) -> usize {
        let total = self.items.normal_count(self.items.stream(stream).range());
        let common = self
            .mergings
            .iter()
            .filter(|merging| merging.stream == stream && !merging.is_cross_match)
            .filter_map(|merging| self.clusters.member_span(&self.items, merging.member))
            .map(|span| self.items.normal_count(span))
            .sum::<usize>();

        total - common
    }

    #[must_use]
    pub fn nick_name(&self, stream: StreamId) -> &str { &self.nick_names[stream] }

    /// A printable location for any item, such as `a3`, `+12` or `b.EOF`.
    #[must_use]
    pub fn reference_string(&self, item: ItemIndex) -> Option<ReferenceString<'_>> {
        let reference = self.items.reference(item)?;

        Some(ReferenceString {
            nick_name: self.nick_name(reference.stream),
            reference,
            is_end_of_stream: item == self.items.stream(reference.stream).item_limit,
        })
    }
}
