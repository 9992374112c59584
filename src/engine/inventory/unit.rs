use serde::Serialize;

/// One scan of the source container, as seen by the partitioner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitDescriptor {
    /// Scan name, `Scan<index>` when the metadata has none
    pub name: String,
    /// Declared point count; only validated by an advisory sample read
    pub point_count: u64,
    /// Position in the source container, 0-based
    pub source_index: usize,
    pub estimated_size_bytes: u64,
}
