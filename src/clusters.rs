mod builder;
mod cluster;
mod cluster_table;

pub use builder::build_clusters;
pub use cluster::{Cluster, ClusterId, Member, MemberId};
pub use cluster_table::ClusterTable;
