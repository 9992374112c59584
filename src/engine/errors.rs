use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, error};

/// Failures raised by a container backend.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open container {}: {reason}", .path.display())]
    Open { path: PathBuf, reason: String },

    #[error("Failed to create container {}: {reason}", .path.display())]
    Create { path: PathBuf, reason: String },

    #[error("Scan index {index} out of range ({count} scans)")]
    ScanIndex { index: usize, count: usize },

    #[error("Scan metadata unreadable at index {index}: {reason}")]
    Metadata { index: usize, reason: String },

    #[error("Point read failed for scan {index}: {reason}")]
    PointRead { index: usize, reason: String },

    #[error("Point write failed: {0}")]
    PointWrite(String),

    #[error("Cannot allocate a buffer for {points} points")]
    Allocation { points: u64 },

    #[error("Failed to finalize container: {0}")]
    Finalize(String),
}

/// A scan left out of the inventory.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Cannot read scan metadata at index {index}: {source}")]
    Metadata {
        index: usize,
        #[source]
        source: ContainerError,
    },
}

impl InventoryError {
    pub fn index(&self) -> usize {
        match self {
            InventoryError::Metadata { index, .. } => *index,
        }
    }
}

/// A scan that could not be copied into its output container.
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("Cannot re-read scan metadata at index {index}: {source}")]
    Header {
        index: usize,
        #[source]
        source: ContainerError,
    },

    #[error("Cannot allocate point buffer for scan {index}: {source}")]
    Buffer {
        index: usize,
        #[source]
        source: ContainerError,
    },

    #[error("Reading points of scan {index} failed: {source}")]
    Read {
        index: usize,
        #[source]
        source: ContainerError,
    },

    #[error("Writing scan {index} failed: {source}")]
    Write {
        index: usize,
        #[source]
        source: ContainerError,
    },
}

impl CopyError {
    pub fn index(&self) -> usize {
        match self {
            CopyError::Header { index, .. }
            | CopyError::Buffer { index, .. }
            | CopyError::Read { index, .. }
            | CopyError::Write { index, .. } => *index,
        }
    }
}

/// An output container that could not be created or finalized.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Cannot create output {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: ContainerError,
    },

    #[error("Cannot finalize output {}: {source}", .path.display())]
    Finalize {
        path: PathBuf,
        #[source]
        source: ContainerError,
    },
}


/// Errors that abort a whole split run.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Input file does not exist: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("Cannot open source container: {0}")]
    Open(#[source] ContainerError),

    #[error("No valid scans found in {}", .0.display())]
    EmptyInventory(PathBuf),
}

impl SplitError {
    pub fn log_error(&self) {
        match self {
            SplitError::InputMissing(path) => {
                error!(target: "scan_split::splitter", path = %path.display(), "Input file does not exist");
            }
            SplitError::Open(e) => {
                error!(target: "scan_split::splitter", "Cannot open source container: {}", e);
                debug!(target: "scan_split::splitter", "Open error details: {:?}", e);
            }
            SplitError::EmptyInventory(path) => {
                error!(target: "scan_split::splitter", path = %path.display(), "No valid scans found");
            }
        }
    }
}
