use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read, Seek, Write};
use std::path::{Path, PathBuf};

use e57::{PointCloud, PointCloudWriter, RawValues, RecordName};
use tracing::debug;

use super::{
    ContainerBackend, ContainerReader, ContainerSummary, ContainerWriter, FieldPresence,
    PointBuffer, ScanHeader, WriterOptions,
};
use crate::engine::errors::ContainerError;

/// E57 files through the `e57` crate. Points are copied as raw record values so
/// every attribute of the source prototype survives the split unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct E57Backend;

impl ContainerBackend for E57Backend {
    type Header = PointCloud;
    type Point = RawValues;
    type Reader = E57Source;
    type Writer = E57Sink;

    fn open(&self, path: &Path) -> Result<E57Source, ContainerError> {
        E57Source::open(path)
    }

    fn create(&self, path: &Path, options: &WriterOptions) -> Result<E57Sink, ContainerError> {
        E57Sink::create(path, options)
    }
}

impl ScanHeader for PointCloud {
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
        self.records
    }

    fn fields(&self) -> FieldPresence {
        let mut fields = FieldPresence::default();
        for record in &self.prototype {
            match record.name {
                RecordName::CartesianX => fields.cartesian_x = true,
                RecordName::CartesianY => fields.cartesian_y = true,
                RecordName::CartesianZ => fields.cartesian_z = true,
                RecordName::Intensity => fields.intensity = true,
                RecordName::ColorRed => fields.color_red = true,
                RecordName::ColorGreen => fields.color_green = true,
                RecordName::ColorBlue => fields.color_blue = true,
                _ => {}
            }
        }
        fields
    }
}

pub struct E57Source {
    reader: e57::E57Reader<BufReader<File>>,
    pointclouds: Vec<PointCloud>,
    summary: ContainerSummary,
}

impl E57Source {
    pub fn open(path: &Path) -> Result<Self, ContainerError> {
        let reader = e57::E57Reader::from_file(path).map_err(|e| ContainerError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let pointclouds = reader.pointclouds();
        let summary = ContainerSummary {
            format_name: reader.format_name().to_string(),
            library_version: reader.library_version().map(str::to_string),
            guid: Some(reader.guid())
                .filter(|guid| !guid.is_empty())
                .map(str::to_string),
            scan_count: pointclouds.len(),
        };
        debug!(
            target: "scan_split::e57",
            path = %path.display(),
            scans = pointclouds.len(),
            "Opened E57 source"
        );
        Ok(Self {
            reader,
            pointclouds,
            summary,
        })
    }

    fn pointcloud(&self, index: usize) -> Result<&PointCloud, ContainerError> {
        self.pointclouds
            .get(index)
            .ok_or(ContainerError::ScanIndex {
                index,
                count: self.pointclouds.len(),
            })
    }
}

impl ContainerReader for E57Source {
    type Header = PointCloud;
    type Point = RawValues;

    fn summary(&self) -> ContainerSummary {
        self.summary.clone()
    }

    fn scan_count(&self) -> usize {
        self.pointclouds.len()
    }

    fn read_header(&self, index: usize) -> Result<PointCloud, ContainerError> {
        self.pointcloud(index).cloned()
    }

    fn read_points(
        &mut self,
        index: usize,
        max_points: u64,
        buffer: &mut PointBuffer<RawValues>,
    ) -> Result<u64, ContainerError> {
        let pointcloud = self.pointcloud(index)?.clone();
        let read_error = |e: e57::Error| ContainerError::PointRead {
            index,
            reason: e.to_string(),
        };

        let points = self.reader.pointcloud_raw(&pointcloud).map_err(read_error)?;
        let mut read = 0u64;
        for values in points {
            if read >= max_points {
                break;
            }
            buffer.push(values.map_err(read_error)?);
            read += 1;
        }
        Ok(read)
    }
}

/// Carries every descriptive field of the source scan over to the output scan.
/// Limits left unset in the source keep the writer's prototype-derived default.
fn copy_metadata<T: Read + Write + Seek>(
    scan: &mut PointCloudWriter<'_, T>,
    header: &PointCloud,
) {
    scan.set_name(header.name.clone());
    scan.set_description(header.description.clone());
    scan.set_original_guids(header.original_guids.clone());
    scan.set_transform(header.transform.clone());
    scan.set_acquisition_start(header.acquisition_start.clone());
    scan.set_acquisition_end(header.acquisition_end.clone());
    scan.set_sensor_vendor(header.sensor_vendor.clone());
    scan.set_sensor_model(header.sensor_model.clone());
    scan.set_sensor_serial(header.sensor_serial.clone());
    scan.set_sensor_hw_version(header.sensor_hw_version.clone());
    scan.set_sensor_sw_version(header.sensor_sw_version.clone());
    scan.set_sensor_fw_version(header.sensor_fw_version.clone());
    scan.set_temperature(header.temperature);
    scan.set_humidity(header.humidity);
    scan.set_atmospheric_pressure(header.atmospheric_pressure);
    if header.intensity_limits.is_some() {
        scan.set_intensity_limits(header.intensity_limits.clone());
    }
    if header.color_limits.is_some() {
        scan.set_color_limits(header.color_limits.clone());
    }
}

pub struct E57Sink {
    writer: e57::E57Writer<File>,
    path: PathBuf,
    guid: String,
    scans_written: usize,
}

impl E57Sink {
    pub fn create(path: &Path, options: &WriterOptions) -> Result<Self, ContainerError> {
        let create_error = |reason: String| ContainerError::Create {
            path: path.to_path_buf(),
            reason,
        };
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| create_error(e.to_string()))?;
        let writer =
            e57::E57Writer::new(file, &options.guid).map_err(|e| create_error(e.to_string()))?;

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            guid: options.guid.clone(),
            scans_written: 0,
        })
    }
}

impl ContainerWriter for E57Sink {
    type Header = PointCloud;
    type Point = RawValues;

    fn write_scan(
        &mut self,
        header: &PointCloud,
        points: PointBuffer<RawValues>,
    ) -> Result<(), ContainerError> {
        let write_error = |e: e57::Error| ContainerError::PointWrite(e.to_string());
        let scan_guid = header
            .guid
            .clone()
            .unwrap_or_else(|| format!("{}_scan{}", self.guid, self.scans_written));

        let mut scan = self
            .writer
            .add_pointcloud(&scan_guid, header.prototype.clone())
            .map_err(write_error)?;
        copy_metadata(&mut scan, header);
        for values in points.into_points() {
            scan.add_point(values).map_err(write_error)?;
        }
        // Bounds are recomputed per point; the declared index bounds win.
        if header.index_bounds.is_some() {
            scan.set_index_bounds(header.index_bounds.clone());
        }
        scan.finalize().map_err(write_error)?;

        self.scans_written += 1;
        debug!(
            target: "scan_split::e57",
            path = %self.path.display(),
            scan = %scan_guid,
            "Wrote scan"
        );
        Ok(())
    }

    fn finish(mut self) -> Result<(), ContainerError> {
        self.writer
            .finalize()
            .map_err(|e| ContainerError::Finalize(e.to_string()))
    }
}
