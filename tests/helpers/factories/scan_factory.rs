use crate::container::FieldPresence;
use crate::test_helpers::memory_container::{MemoryHeader, MemoryPoint, MemoryScan};

/// Builds in-memory scans whose declared point count matches the stored points
/// unless overridden.
pub struct ScanFactory {
    name: Option<String>,
    points: usize,
    declared: Option<u64>,
    fail_header: bool,
    fail_read: bool,
    reject_on_write: bool,
}

impl ScanFactory {
    pub fn new() -> Self {
        Self {
            name: None,
            points: 4,
            declared: None,
            fail_header: false,
            fail_read: false,
            reject_on_write: false,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    /// Declared point count that disagrees with the stored points.
    pub fn declaring(mut self, declared: u64) -> Self {
        self.declared = Some(declared);
        self
    }

    pub fn failing_header(mut self) -> Self {
        self.fail_header = true;
        self
    }

    pub fn failing_read(mut self) -> Self {
        self.fail_read = true;
        self
    }

    pub fn rejecting_write(mut self) -> Self {
        self.reject_on_write = true;
        self
    }

    pub fn create(self) -> MemoryScan {
        let points: Vec<MemoryPoint> = (0..self.points)
            .map(|i| [i as f64, i as f64 * 0.5, 1.0])
            .collect();
        MemoryScan {
            header: MemoryHeader {
                guid: self.name.as_ref().map(|n| format!("{{{}-guid}}", n)),
                name: self.name,
                description: Some("factory scan".to_string()),
                sensor_vendor: Some("Acme".to_string()),
                sensor_model: None,
                point_count: self.declared.unwrap_or(self.points as u64),
                fields: FieldPresence {
                    cartesian_x: true,
                    cartesian_y: true,
                    cartesian_z: true,
                    ..FieldPresence::default()
                },
                reject_on_write: self.reject_on_write,
            },
            points,
            fail_header: self.fail_header,
            fail_read: self.fail_read,
        }
    }
}
