mod clusters;
mod config;
mod equivalence;
mod errors;
mod indexing;
mod items;
mod merging;
mod reference;
mod report;
mod similarities;
mod tokenizer;

pub use clusters::{Cluster, ClusterId, ClusterTable, Member, MemberId, build_clusters};
pub use config::{
    Config, DEFAULT_MINIMUM_CLUSTER_SIZE, LINE_RELISTING_MINIMUM_SIZE, WORD_RELISTING_MINIMUM_SIZE,
};
pub use equivalence::{identical_size, normal_distance, sorted_candidates};
pub use errors::SimilarityError;
pub use indexing::{PositionIndex, index_positions};
pub use items::{Item, ItemIndex, ItemKind, ItemStore, Stream, StreamId};
pub use merging::{Merging, merge_groups, sequence_mergings};
pub use reference::{Reference, ReferenceString, nick_names};
pub use report::{Difference, Hunk, Occurrence, replay};
pub use similarities::{Similarities, compare_texts, find_similarities};
pub use tokenizer::{
    BuiltinTokenizer, Tokenizer,
    checksum::{Checksum, checksum},
    line_tokenizer::{LineOptions, LineTokenizer, line_tokenizer},
    token::Token,
    word_tokenizer::{WordTokenizer, word_tokenizer},
};
