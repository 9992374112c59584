use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::container::{
    ContainerBackend, ContainerReader, ContainerSummary, ContainerWriter, FieldPresence,
    PointBuffer, ScanHeader, WriterOptions,
};
use crate::engine::errors::ContainerError;

pub type MemoryPoint = [f64; 3];

/// Bytes per point reported by [`MemoryBackend::output_size`].
pub const MEMORY_POINT_BYTES: u64 = 24;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryHeader {
    pub name: Option<String>,
    pub guid: Option<String>,
    pub description: Option<String>,
    pub sensor_vendor: Option<String>,
    pub sensor_model: Option<String>,
    pub point_count: u64,
    pub fields: FieldPresence,
    /// Makes the writer fail when this scan is written
    pub reject_on_write: bool,
}

impl ScanHeader for MemoryHeader {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn guid(&self) -> Option<&str> {
        self.guid.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn sensor_vendor(&self) -> Option<&str> {
        self.sensor_vendor.as_deref()
    }

    fn sensor_model(&self) -> Option<&str> {
        self.sensor_model.as_deref()
    }

    fn point_count(&self) -> u64 {
        self.point_count
    }

    fn fields(&self) -> FieldPresence {
        self.fields
    }
}

/// A scan with knobs for the failure modes the splitter has to survive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryScan {
    pub header: MemoryHeader,
    pub points: Vec<MemoryPoint>,
    pub fail_header: bool,
    pub fail_read: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryFile {
    pub guid: Option<String>,
    pub scans: Vec<MemoryScan>,
    pub finalized: bool,
}

impl MemoryFile {
    pub fn scan_names(&self) -> Vec<String> {
        self.scans
            .iter()
            .map(|s| s.header.name.clone().unwrap_or_default())
            .collect()
    }
}

/// Container backend keeping every file in a shared map keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    files: Arc<Mutex<HashMap<PathBuf, MemoryFile>>>,
    failing_creates: Arc<Mutex<HashSet<PathBuf>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, guid: &str, scans: Vec<MemoryScan>) {
        self.files.lock().insert(
            path.into(),
            MemoryFile {
                guid: Some(guid.to_string()),
                scans,
                finalized: true,
            },
        );
    }

    pub fn fail_create(&self, path: impl Into<PathBuf>) {
        self.failing_creates.lock().insert(path.into());
    }

    pub fn file(&self, path: &Path) -> Option<MemoryFile> {
        self.files.lock().get(path).cloned()
    }

    /// Every path except `source`, sorted.
    pub fn outputs_besides(&self, source: &Path) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .files
            .lock()
            .keys()
            .filter(|p| p.as_path() != source)
            .cloned()
            .collect();
        paths.sort();
        paths
    }
}

impl ContainerBackend for MemoryBackend {
    type Header = MemoryHeader;
    type Point = MemoryPoint;
    type Reader = MemorySource;
    type Writer = MemorySink;

    fn open(&self, path: &Path) -> Result<MemorySource, ContainerError> {
        let file = self.file(path).ok_or_else(|| ContainerError::Open {
            path: path.to_path_buf(),
            reason: "no such container".to_string(),
        })?;
        Ok(MemorySource { file })
    }

    fn create(&self, path: &Path, options: &WriterOptions) -> Result<MemorySink, ContainerError> {
        if self.failing_creates.lock().contains(path) {
            return Err(ContainerError::Create {
                path: path.to_path_buf(),
                reason: "refused by test backend".to_string(),
            });
        }
        self.files.lock().insert(
            path.to_path_buf(),
            MemoryFile {
                guid: Some(options.guid.clone()),
                scans: Vec::new(),
                finalized: false,
            },
        );
        Ok(MemorySink {
            files: Arc::clone(&self.files),
            path: path.to_path_buf(),
        })
    }

    fn output_size(&self, path: &Path) -> Option<u64> {
        self.file(path).map(|f| {
            f.scans
                .iter()
                .map(|s| s.points.len() as u64 * MEMORY_POINT_BYTES)
                .sum()
        })
    }
}

pub struct MemorySource {
    file: MemoryFile,
}

impl MemorySource {
    fn scan(&self, index: usize) -> Result<&MemoryScan, ContainerError> {
        self.file.scans.get(index).ok_or(ContainerError::ScanIndex {
            index,
            count: self.file.scans.len(),
        })
    }
}

impl ContainerReader for MemorySource {
    type Header = MemoryHeader;
    type Point = MemoryPoint;

    fn summary(&self) -> ContainerSummary {
        ContainerSummary {
            format_name: "memory".to_string(),
            library_version: None,
            guid: self.file.guid.clone(),
            scan_count: self.file.scans.len(),
        }
    }

    fn scan_count(&self) -> usize {
        self.file.scans.len()
    }

    fn read_header(&self, index: usize) -> Result<MemoryHeader, ContainerError> {
        let scan = self.scan(index)?;
        if scan.fail_header {
            return Err(ContainerError::Metadata {
                index,
                reason: "corrupt scan header".to_string(),
            });
        }
        Ok(scan.header.clone())
    }

    fn read_points(
        &mut self,
        index: usize,
        max_points: u64,
        buffer: &mut PointBuffer<MemoryPoint>,
    ) -> Result<u64, ContainerError> {
        let scan = self.scan(index)?;
        if scan.fail_read {
            return Err(ContainerError::PointRead {
                index,
                reason: "truncated point section".to_string(),
            });
        }
        let mut read = 0u64;
        for point in scan.points.iter().take(max_points as usize) {
            buffer.push(*point);
            read += 1;
        }
        Ok(read)
    }
}

pub struct MemorySink {
    files: Arc<Mutex<HashMap<PathBuf, MemoryFile>>>,
    path: PathBuf,
}

impl ContainerWriter for MemorySink {
    type Header = MemoryHeader;
    type Point = MemoryPoint;

    fn write_scan(
        &mut self,
        header: &MemoryHeader,
        points: PointBuffer<MemoryPoint>,
    ) -> Result<(), ContainerError> {
        if header.reject_on_write {
            return Err(ContainerError::PointWrite("disk full".to_string()));
        }
        let mut files = self.files.lock();
        let file = files.entry(self.path.clone()).or_default();
        file.scans.push(MemoryScan {
            header: header.clone(),
            points: points.into_points(),
            ..MemoryScan::default()
        });
        Ok(())
    }

    fn finish(self) -> Result<(), ContainerError> {
        if let Some(file) = self.files.lock().get_mut(&self.path) {
            file.finalized = true;
        }
        Ok(())
    }
}
