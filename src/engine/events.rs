use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::container::ContainerSummary;
use crate::engine::inventory::Advisory;
use crate::shared::bytes::format_bytes;

/// Progress and diagnostics emitted while a split runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SplitEvent {
    SourceOpened {
        path: PathBuf,
        summary: ContainerSummary,
    },
    ScanInventoried {
        index: usize,
        name: String,
        guid: Option<String>,
        description: Option<String>,
        sensor_vendor: Option<String>,
        sensor_model: Option<String>,
        fields: Vec<String>,
        point_count: u64,
        estimated_bytes: u64,
    },
    SampleRead {
        index: usize,
        requested: u64,
        read: u64,
    },
    Advisory {
        index: usize,
        advisory: Advisory,
    },
    ScanSkipped {
        index: usize,
        reason: String,
    },
    PlanReady {
        units: usize,
        batches: usize,
        ceiling_bytes: u64,
    },
    OutputStarted {
        ordinal: usize,
        total: usize,
        path: PathBuf,
    },
    ScanCopied {
        index: usize,
        name: String,
        points: u64,
    },
    ScanEmpty {
        index: usize,
        name: String,
    },
    ScanCopyFailed {
        index: usize,
        reason: String,
    },
    OutputFailed {
        path: PathBuf,
        reason: String,
    },
    OutputFinished {
        path: PathBuf,
        written: usize,
        actual_bytes: Option<u64>,
    },
    CeilingExceeded {
        path: PathBuf,
        actual_bytes: u64,
        ceiling_bytes: u64,
    },
}

/// Receives every [`SplitEvent`] of a run.
pub trait EventSink {
    fn emit(&self, event: SplitEvent);
}

/// Default sink: forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: SplitEvent) {
        match event {
            SplitEvent::SourceOpened { path, summary } => info!(
                target: "scan_split::inventory",
                path = %path.display(),
                format = %summary.format_name,
                library_version = ?summary.library_version,
                guid = ?summary.guid,
                scans = summary.scan_count,
                "Opened source container"
            ),
            SplitEvent::ScanInventoried {
                index,
                name,
                guid,
                description,
                sensor_vendor,
                sensor_model,
                fields,
                point_count,
                estimated_bytes,
            } => info!(
                target: "scan_split::inventory",
                index,
                name = %name,
                guid = guid.as_deref().unwrap_or("none"),
                description = description.as_deref().unwrap_or("none"),
                sensor_vendor = sensor_vendor.as_deref().unwrap_or("unknown"),
                sensor_model = sensor_model.as_deref().unwrap_or("unknown"),
                fields = %fields.join(" "),
                point_count,
                estimated = %format_bytes(estimated_bytes),
                "Found scan"
            ),
            SplitEvent::SampleRead {
                index,
                requested,
                read,
            } => debug!(
                target: "scan_split::inventory",
                index, requested, read, "Sample read"
            ),
            SplitEvent::Advisory { index, advisory } => warn!(
                target: "scan_split::inventory",
                index,
                advisory = ?advisory,
                "{}",
                advisory
            ),
            SplitEvent::ScanSkipped { index, reason } => warn!(
                target: "scan_split::inventory",
                index,
                reason = %reason,
                "Skipping unreadable scan"
            ),
            SplitEvent::PlanReady {
                units,
                batches,
                ceiling_bytes,
            } => info!(
                target: "scan_split::partition",
                units,
                batches,
                ceiling = %format_bytes(ceiling_bytes),
                "Planned output files"
            ),
            SplitEvent::OutputStarted {
                ordinal,
                total,
                path,
            } => info!(
                target: "scan_split::copy",
                ordinal,
                total,
                path = %path.display(),
                "Creating output file"
            ),
            SplitEvent::ScanCopied {
                index,
                name,
                points,
            } => info!(
                target: "scan_split::copy",
                index, name = %name, points, "Copied scan"
            ),
            SplitEvent::ScanEmpty { index, name } => warn!(
                target: "scan_split::copy",
                index, name = %name, "No points read, scan not written"
            ),
            SplitEvent::ScanCopyFailed { index, reason } => warn!(
                target: "scan_split::copy",
                index, reason = %reason, "Scan copy failed"
            ),
            SplitEvent::OutputFailed { path, reason } => warn!(
                target: "scan_split::copy",
                path = %path.display(),
                reason = %reason,
                "Output file failed"
            ),
            SplitEvent::OutputFinished {
                path,
                written,
                actual_bytes,
            } => info!(
                target: "scan_split::copy",
                path = %path.display(),
                written,
                size = %actual_bytes.map(format_bytes).unwrap_or_else(|| "unknown".to_string()),
                "Finished output file"
            ),
            SplitEvent::CeilingExceeded {
                path,
                actual_bytes,
                ceiling_bytes,
            } => warn!(
                target: "scan_split::copy",
                path = %path.display(),
                actual = %format_bytes(actual_bytes),
                ceiling = %format_bytes(ceiling_bytes),
                "Output is larger than the configured ceiling"
            ),
        }
    }
}
