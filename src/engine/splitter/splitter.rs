use std::path::Path;

use super::summary::SplitSummary;
use crate::container::{ContainerBackend, ContainerReader};
use crate::engine::copy::{BatchCopier, GuidGenerator, OutputNamer};
use crate::engine::errors::SplitError;
use crate::engine::events::{EventSink, SplitEvent};
use crate::engine::inventory::{Inventory, InventoryScanner};
use crate::engine::partition::{ContiguousGreedyPolicy, OutputPlan, PartitionPolicy};
use crate::shared::config::SplitConfig;

/// Runs inventory, partitioning and copy for one source container.
///
/// The source is opened once and stays open for the whole run; outputs are
/// written one at a time and each is finalized before the next one is created.
pub struct Splitter<'a, B: ContainerBackend> {
    backend: B,
    config: SplitConfig,
    policy: Box<dyn PartitionPolicy + 'a>,
    guids: GuidGenerator,
    events: &'a dyn EventSink,
}

impl<'a, B: ContainerBackend> Splitter<'a, B> {
    pub fn new(backend: B, config: SplitConfig, events: &'a dyn EventSink) -> Self {
        let policy = Box::new(ContiguousGreedyPolicy::from_config(&config));
        let guids = GuidGenerator::new(&config.guid_prefix);
        Self {
            backend,
            config,
            policy,
            guids,
            events,
        }
    }

    pub fn with_policy(mut self, policy: impl PartitionPolicy + 'a) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn with_guids(mut self, guids: GuidGenerator) -> Self {
        self.guids = guids;
        self
    }

    /// Inventory and plan only; nothing is written.
    pub fn plan(&self, input: &Path) -> Result<(Inventory, OutputPlan), SplitError> {
        let mut reader = self.open(input)?;
        let inventory = self.take_inventory(input, &mut reader)?;
        let plan = self.make_plan(&inventory);
        Ok((inventory, plan))
    }

    pub fn run(&self, input: &Path) -> Result<SplitSummary, SplitError> {
        let mut reader = self.open(input)?;
        let inventory = self.take_inventory(input, &mut reader)?;
        let plan = self.make_plan(&inventory);

        let paths = OutputNamer::for_input(input, &self.config).assign(&plan, &inventory);
        let source_guid = inventory.summary.guid.clone();
        let total = plan.len();

        let mut copier = BatchCopier::new(&self.backend, &mut reader, self.events);
        let mut outputs = Vec::with_capacity(total);
        for (position, (batch, path)) in plan.batches.iter().zip(paths).enumerate() {
            let ordinal = position + 1;
            self.events.emit(SplitEvent::OutputStarted {
                ordinal,
                total,
                path: path.clone(),
            });

            let guid = self.guids.guid_for(ordinal, source_guid.as_deref());
            let report = copier.write_output(ordinal, batch, &path, guid);

            if let Some(actual_bytes) = report.actual_bytes {
                if actual_bytes > plan.ceiling_bytes {
                    self.events.emit(SplitEvent::CeilingExceeded {
                        path: path.clone(),
                        actual_bytes,
                        ceiling_bytes: plan.ceiling_bytes,
                    });
                }
            }
            outputs.push(report);
        }

        Ok(SplitSummary {
            input: input.to_path_buf(),
            inventory,
            plan,
            outputs,
        })
    }

    fn open(&self, input: &Path) -> Result<B::Reader, SplitError> {
        self.backend.open(input).map_err(SplitError::Open)
    }

    fn take_inventory(
        &self,
        input: &Path,
        reader: &mut B::Reader,
    ) -> Result<Inventory, SplitError> {
        self.events.emit(SplitEvent::SourceOpened {
            path: input.to_path_buf(),
            summary: reader.summary(),
        });

        let inventory = InventoryScanner::new(&self.config, self.events).scan(reader);
        if inventory.is_empty() {
            return Err(SplitError::EmptyInventory(input.to_path_buf()));
        }
        Ok(inventory)
    }

    fn make_plan(&self, inventory: &Inventory) -> OutputPlan {
        let plan = self.policy.plan(&inventory.units);
        self.events.emit(SplitEvent::PlanReady {
            units: inventory.len(),
            batches: plan.len(),
            ceiling_bytes: plan.ceiling_bytes,
        });
        plan
    }
}
