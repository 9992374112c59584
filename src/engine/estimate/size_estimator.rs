use crate::shared::config::SplitConfig;

/// Coarse upper-bound footprint of a scan: `point_count * bytes_per_point`.
///
/// This is not a measurement of the compressed size that ends up on disk; real
/// outputs are usually smaller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeEstimator {
    bytes_per_point: u64,
}

impl SizeEstimator {
    pub fn new(bytes_per_point: u64) -> Self {
        Self { bytes_per_point }
    }

    pub fn from_config(config: &SplitConfig) -> Self {
        Self::new(config.bytes_per_point)
    }

    pub fn bytes_per_point(&self) -> u64 {
        self.bytes_per_point
    }

    pub fn estimate(&self, point_count: u64) -> u64 {
        point_count.saturating_mul(self.bytes_per_point)
    }
}
