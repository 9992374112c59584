use serde::Serialize;
use std::path::PathBuf;

use crate::engine::partition::Batch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitFailure {
    pub index: usize,
    pub reason: String,
}

/// What happened to one planned output container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputReport {
    /// 1-based position in the plan
    pub ordinal: usize,
    pub path: PathBuf,
    pub guid: String,
    pub planned: Vec<usize>,
    pub written: Vec<usize>,
    /// Scans that yielded no points and were not written
    pub empty: Vec<usize>,
    pub failures: Vec<UnitFailure>,
    pub estimated_bytes: u64,
    pub actual_bytes: Option<u64>,
    /// Set when the container itself could not be created or finalized
    pub error: Option<String>,
}

impl OutputReport {
    pub fn planned(ordinal: usize, path: PathBuf, guid: String, batch: &Batch) -> Self {
        Self {
            ordinal,
            path,
            guid,
            planned: batch.source_indices.clone(),
            written: Vec::new(),
            empty: Vec::new(),
            failures: Vec::new(),
            estimated_bytes: batch.estimated_bytes,
            actual_bytes: None,
            error: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.failures.is_empty() && self.written.len() == self.planned.len()
    }
}
