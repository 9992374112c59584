use serde::Serialize;
use std::path::PathBuf;

use crate::engine::copy::OutputReport;
use crate::engine::inventory::Inventory;
use crate::engine::partition::OutputPlan;

/// Everything a run did, per scan and per output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitSummary {
    pub input: PathBuf,
    pub inventory: Inventory,
    pub plan: OutputPlan,
    pub outputs: Vec<OutputReport>,
}

impl SplitSummary {
    pub fn scans_written(&self) -> usize {
        self.outputs.iter().map(|o| o.written.len()).sum()
    }

    pub fn scans_failed(&self) -> usize {
        self.outputs.iter().map(|o| o.failures.len()).sum()
    }

    pub fn failed_outputs(&self) -> usize {
        self.outputs.iter().filter(|o| o.error.is_some()).count()
    }

    /// True when every inventoried scan was written and no output failed.
    pub fn is_clean(&self) -> bool {
        self.inventory.skipped.is_empty() && self.outputs.iter().all(OutputReport::is_complete)
    }
}
