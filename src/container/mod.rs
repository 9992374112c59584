//! Seams between the splitter and the point-cloud container format.
//!
//! The engine only talks to these traits; the E57 layout itself lives in the
//! `e57` crate behind [`E57Backend`].

pub mod buffer;
pub mod e57_backend;
pub mod header;

pub use buffer::PointBuffer;
pub use e57_backend::{E57Backend, E57Sink, E57Source};
pub use header::{ContainerSummary, FieldPresence, ScanHeader, WriterOptions};

use crate::engine::errors::ContainerError;
use std::path::Path;


/// Read side of a container: scan enumeration, metadata and point streaming.
pub trait ContainerReader {
    type Header: ScanHeader + Clone;
    type Point;

    fn summary(&self) -> ContainerSummary;

    fn scan_count(&self) -> usize;

    fn read_header(&self, index: usize) -> Result<Self::Header, ContainerError>;

    /// Reads at most `max_points` points of scan `index` into `buffer` and returns
    /// how many were actually read.
    fn read_points(
        &mut self,
        index: usize,
        max_points: u64,
        buffer: &mut PointBuffer<Self::Point>,
    ) -> Result<u64, ContainerError>;
}

/// Write side of a container. Scans are appended in call order.
pub trait ContainerWriter {
    type Header;
    type Point;

    fn write_scan(
        &mut self,
        header: &Self::Header,
        points: PointBuffer<Self::Point>,
    ) -> Result<(), ContainerError>;

    /// Finalizes the container. Nothing may be written afterwards.
    fn finish(self) -> Result<(), ContainerError>;
}

/// Opens sources and creates outputs for one container format.
pub trait ContainerBackend {
    type Header: ScanHeader + Clone;
    type Point;
    type Reader: ContainerReader<Header = Self::Header, Point = Self::Point>;
    type Writer: ContainerWriter<Header = Self::Header, Point = Self::Point>;

    fn open(&self, path: &Path) -> Result<Self::Reader, ContainerError>;

    fn create(&self, path: &Path, options: &WriterOptions) -> Result<Self::Writer, ContainerError>;

    /// Size in bytes of a finished output, when it can be measured.
    fn output_size(&self, path: &Path) -> Option<u64> {
        std::fs::metadata(path).ok().map(|m| m.len())
    }
}
