use serde::Serialize;

/// Contiguous run of source scan indices destined for one output container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Batch {
    /// Source indices, ascending and in source order
    pub source_indices: Vec<usize>,
    /// Sum of the estimated sizes of the units in this batch
    pub estimated_bytes: u64,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.source_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_indices.is_empty()
    }

    pub fn first(&self) -> Option<usize> {
        self.source_indices.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.source_indices.last().copied()
    }

    pub(super) fn add(&mut self, source_index: usize, estimated_bytes: u64) {
        self.source_indices.push(source_index);
        self.estimated_bytes = self.estimated_bytes.saturating_add(estimated_bytes);
    }
}

/// Every inventoried scan assigned to exactly one batch, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputPlan {
    pub ceiling_bytes: u64,
    pub batches: Vec<Batch>,
}

impl OutputPlan {
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// All planned source indices, flattened in plan order.
    pub fn source_indices(&self) -> Vec<usize> {
        self.batches
            .iter()
            .flat_map(|b| b.source_indices.iter().copied())
            .collect()
    }

    /// Batches whose estimate is above the ceiling. Only single-unit batches can be here.
    pub fn oversized(&self) -> impl Iterator<Item = &Batch> {
        self.batches
            .iter()
            .filter(move |b| b.estimated_bytes > self.ceiling_bytes)
    }
}
