use std::path::Path;

use super::report::{OutputReport, UnitFailure};
use crate::container::{
    ContainerBackend, ContainerReader, ContainerWriter, PointBuffer, ScanHeader, WriterOptions,
};
use crate::engine::errors::{CopyError, OutputError};
use crate::engine::events::{EventSink, SplitEvent};
use crate::engine::partition::Batch;

/// Result of copying one scan that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOutcome {
    Written { points: u64 },
    /// Nothing could be read, so nothing was written
    Empty,
}

/// Copies batches of scans from the open source into fresh output containers.
///
/// A scan that fails is recorded and skipped; the batch always runs to the end.
pub struct BatchCopier<'a, B: ContainerBackend> {
    backend: &'a B,
    reader: &'a mut B::Reader,
    events: &'a dyn EventSink,
}

impl<'a, B: ContainerBackend> BatchCopier<'a, B> {
    pub fn new(backend: &'a B, reader: &'a mut B::Reader, events: &'a dyn EventSink) -> Self {
        Self {
            backend,
            reader,
            events,
        }
    }

    /// Creates the output at `path`, copies every scan of `batch` into it in order
    /// and finalizes it.
    pub fn write_output(
        &mut self,
        ordinal: usize,
        batch: &Batch,
        path: &Path,
        guid: String,
    ) -> OutputReport {
        let mut report = OutputReport::planned(ordinal, path.to_path_buf(), guid, batch);
        let options = WriterOptions {
            guid: report.guid.clone(),
        };

        let mut writer = match self.backend.create(path, &options) {
            Ok(writer) => writer,
            Err(source) => {
                self.fail_output(
                    &mut report,
                    OutputError::Create {
                        path: path.to_path_buf(),
                        source,
                    },
                );
                return report;
            }
        };

        self.copy_batch(batch, &mut writer, &mut report);

        if let Err(source) = writer.finish() {
            self.fail_output(
                &mut report,
                OutputError::Finalize {
                    path: path.to_path_buf(),
                    source,
                },
            );
        }

        report.actual_bytes = self.backend.output_size(path);
        self.events.emit(SplitEvent::OutputFinished {
            path: path.to_path_buf(),
            written: report.written.len(),
            actual_bytes: report.actual_bytes,
        });
        report
    }

    /// Copies the scans of `batch` into an already open writer.
    pub fn copy_batch(&mut self, batch: &Batch, writer: &mut B::Writer, report: &mut OutputReport) {
        for &index in &batch.source_indices {
            match self.copy_unit(index, writer) {
                Ok(UnitOutcome::Written { .. }) => report.written.push(index),
                Ok(UnitOutcome::Empty) => report.empty.push(index),
                Err(err) => report.failures.push(UnitFailure {
                    index: err.index(),
                    reason: err.to_string(),
                }),
            }
        }
    }

    /// Re-reads the scan header, reads all declared points and writes them out.
    pub fn copy_unit(
        &mut self,
        index: usize,
        writer: &mut B::Writer,
    ) -> Result<UnitOutcome, CopyError> {
        let result = self.try_copy_unit(index, writer);
        if let Err(err) = &result {
            self.events.emit(SplitEvent::ScanCopyFailed {
                index,
                reason: err.to_string(),
            });
        }
        result
    }

    fn try_copy_unit(
        &mut self,
        index: usize,
        writer: &mut B::Writer,
    ) -> Result<UnitOutcome, CopyError> {
        let header = self
            .reader
            .read_header(index)
            .map_err(|source| CopyError::Header { index, source })?;
        let name = header.display_name(index);
        let declared = header.point_count();

        let mut buffer = PointBuffer::with_declared(declared)
            .map_err(|source| CopyError::Buffer { index, source })?;
        let read = self
            .reader
            .read_points(index, declared, &mut buffer)
            .map_err(|source| CopyError::Read { index, source })?;

        if read == 0 {
            self.events.emit(SplitEvent::ScanEmpty { index, name });
            return Ok(UnitOutcome::Empty);
        }

        writer
            .write_scan(&header, buffer)
            .map_err(|source| CopyError::Write { index, source })?;
        self.events.emit(SplitEvent::ScanCopied {
            index,
            name,
            points: read,
        });
        Ok(UnitOutcome::Written { points: read })
    }

    fn fail_output(&self, report: &mut OutputReport, err: OutputError) {
        let reason = err.to_string();
        self.events.emit(SplitEvent::OutputFailed {
            path: report.path.clone(),
            reason: reason.clone(),
        });
        report.error = Some(reason);
    }
}
