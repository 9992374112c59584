use super::batch::{Batch, OutputPlan};
use crate::engine::inventory::UnitDescriptor;
use crate::shared::config::SplitConfig;

/// Strategy for grouping inventoried scans into output containers.
pub trait PartitionPolicy {
    fn plan(&self, units: &[UnitDescriptor]) -> OutputPlan;
}

/// First-fit-contiguous greedy grouping: walk units in source order and close the
/// current batch whenever the next unit would push it over the ceiling.
///
/// No reordering and no look-ahead, so the batch count is not always minimal.
/// A unit larger than the ceiling on its own still gets a batch of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContiguousGreedyPolicy {
    pub ceiling_bytes: u64,
}

impl ContiguousGreedyPolicy {
    pub fn new(ceiling_bytes: u64) -> Self {
        Self { ceiling_bytes }
    }

    pub fn from_config(config: &SplitConfig) -> Self {
        Self::new(config.max_file_size_bytes)
    }
}

impl PartitionPolicy for ContiguousGreedyPolicy {
    fn plan(&self, units: &[UnitDescriptor]) -> OutputPlan {
        let batches = partition_contiguous(
            units
                .iter()
                .map(|u| (u.source_index, u.estimated_size_bytes)),
            self.ceiling_bytes,
        );

        tracing::debug!(
            target: "scan_split::partition",
            units = units.len(),
            batches = batches.len(),
            ceiling_bytes = self.ceiling_bytes,
            sizes = ?batches.iter().map(|b| (b.len(), b.estimated_bytes)).collect::<Vec<_>>(),
            "Generated output plan"
        );

        OutputPlan {
            ceiling_bytes: self.ceiling_bytes,
            batches,
        }
    }
}

/// Pure grouping over `(source_index, estimated_bytes)` pairs in source order.
pub fn partition_contiguous<I>(units: I, ceiling_bytes: u64) -> Vec<Batch>
where
    I: IntoIterator<Item = (usize, u64)>,
{
    let mut batches = Vec::new();
    let mut current = Batch::default();

    for (source_index, estimated_bytes) in units {
        let would_total = current.estimated_bytes.saturating_add(estimated_bytes);
        if would_total > ceiling_bytes && !current.is_empty() {
            batches.push(std::mem::take(&mut current));
        }
        current.add(source_index, estimated_bytes);
    }

    if !current.is_empty() {
        batches.push(current);
    }

    batches
}
