use serde::Serialize;

use super::{Advisory, UnitDescriptor};
use crate::container::{ContainerReader, ContainerSummary, PointBuffer, ScanHeader};
use crate::engine::errors::InventoryError;
use crate::engine::estimate::SizeEstimator;
use crate::engine::events::{EventSink, SplitEvent};
use crate::shared::config::SplitConfig;

/// A scan that made it into the inventory, plus what the checks found about it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedUnit {
    pub descriptor: UnitDescriptor,
    pub advisories: Vec<Advisory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedScan {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitAdvisory {
    pub index: usize,
    pub advisory: Advisory,
}

/// Ordered scans of one source container.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Inventory {
    pub summary: ContainerSummary,
    pub units: Vec<UnitDescriptor>,
    pub skipped: Vec<SkippedScan>,
    pub advisories: Vec<UnitAdvisory>,
}

impl Inventory {
    pub fn new(summary: ContainerSummary) -> Self {
        Self {
            summary,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Looks up a descriptor by its source index.
    pub fn unit(&self, source_index: usize) -> Option<&UnitDescriptor> {
        self.units
            .binary_search_by_key(&source_index, |u| u.source_index)
            .ok()
            .map(|pos| &self.units[pos])
    }

    pub fn total_points(&self) -> u64 {
        self.units.iter().map(|u| u.point_count).sum()
    }

    pub fn total_estimated_bytes(&self) -> u64 {
        self.units
            .iter()
            .fold(0u64, |acc, u| acc.saturating_add(u.estimated_size_bytes))
    }

    fn record(&mut self, scanned: ScannedUnit) {
        let index = scanned.descriptor.source_index;
        self.advisories.extend(
            scanned
                .advisories
                .into_iter()
                .map(|advisory| UnitAdvisory { index, advisory }),
        );
        self.units.push(scanned.descriptor);
    }
}

/// Enumerates scans, estimates their size and sanity-checks declared point counts.
pub struct InventoryScanner<'a> {
    estimator: SizeEstimator,
    sample_points: u64,
    suspicious_point_counts: Vec<u64>,
    events: &'a dyn EventSink,
}

impl<'a> InventoryScanner<'a> {
    pub fn new(config: &SplitConfig, events: &'a dyn EventSink) -> Self {
        Self {
            estimator: SizeEstimator::from_config(config),
            sample_points: config.sample_points,
            suspicious_point_counts: config.suspicious_point_counts.clone(),
            events,
        }
    }

    pub fn with_estimator(mut self, estimator: SizeEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Scans every unit in source order. Units whose metadata cannot be read are
    /// recorded as skipped and left out of `units`.
    pub fn scan<R: ContainerReader>(&self, reader: &mut R) -> Inventory {
        let mut inventory = Inventory::new(reader.summary());

        for index in 0..reader.scan_count() {
            match self.scan_unit(reader, index) {
                Ok(scanned) => inventory.record(scanned),
                Err(err) => {
                    let reason = err.to_string();
                    self.events.emit(SplitEvent::ScanSkipped {
                        index: err.index(),
                        reason: reason.clone(),
                    });
                    inventory.skipped.push(SkippedScan {
                        index: err.index(),
                        reason,
                    });
                }
            }
        }

        inventory
    }

    pub fn scan_unit<R: ContainerReader>(
        &self,
        reader: &mut R,
        index: usize,
    ) -> Result<ScannedUnit, InventoryError> {
        let header = reader
            .read_header(index)
            .map_err(|source| InventoryError::Metadata { index, source })?;

        let name = header.display_name(index);
        let point_count = header.point_count();
        let estimated_size_bytes = self.estimator.estimate(point_count);

        self.events.emit(SplitEvent::ScanInventoried {
            index,
            name: name.clone(),
            guid: header.guid().map(str::to_string),
            description: header.description().map(str::to_string),
            sensor_vendor: header.sensor_vendor().map(str::to_string),
            sensor_model: header.sensor_model().map(str::to_string),
            fields: header
                .fields()
                .labels()
                .into_iter()
                .map(str::to_string)
                .collect(),
            point_count,
            estimated_bytes: estimated_size_bytes,
        });

        let mut advisories = self.check_point_count(point_count);
        advisories.extend(self.sample(reader, index, point_count));
        for advisory in &advisories {
            self.events.emit(SplitEvent::Advisory {
                index,
                advisory: advisory.clone(),
            });
        }

        Ok(ScannedUnit {
            descriptor: UnitDescriptor {
                name,
                point_count,
                source_index: index,
                estimated_size_bytes,
            },
            advisories,
        })
    }

    fn check_point_count(&self, point_count: u64) -> Vec<Advisory> {
        if point_count == 0 {
            vec![Advisory::ZeroPointCount]
        } else if self.suspicious_point_counts.contains(&point_count) {
            vec![Advisory::SuspiciousPointCount { point_count }]
        } else {
            Vec::new()
        }
    }

    /// Reads at most `sample_points` points to see whether the declared count is plausible.
    fn sample<R: ContainerReader>(
        &self,
        reader: &mut R,
        index: usize,
        point_count: u64,
    ) -> Option<Advisory> {
        let requested = point_count.min(self.sample_points);
        if requested == 0 {
            return None;
        }
        let mut buffer = PointBuffer::default();

        match reader.read_points(index, requested, &mut buffer) {
            Ok(read) => {
                self.events.emit(SplitEvent::SampleRead {
                    index,
                    requested,
                    read,
                });
                (read < requested).then_some(Advisory::ShortSample { requested, read })
            }
            Err(err) => Some(Advisory::SampleFailed {
                reason: err.to_string(),
            }),
        }
    }
}
