pub mod batch;
pub mod policy;

pub use batch::{Batch, OutputPlan};
pub use policy::{ContiguousGreedyPolicy, PartitionPolicy, partition_contiguous};
