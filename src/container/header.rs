use serde::Serialize;

/// Which point attributes a scan carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldPresence {
    pub cartesian_x: bool,
    pub cartesian_y: bool,
    pub cartesian_z: bool,
    pub intensity: bool,
    pub color_red: bool,
    pub color_green: bool,
    pub color_blue: bool,
}

impl FieldPresence {
    /// Short labels of the present fields, in a stable order.
    pub fn labels(&self) -> Vec<&'static str> {
        [
            (self.cartesian_x, "X"),
            (self.cartesian_y, "Y"),
            (self.cartesian_z, "Z"),
            (self.intensity, "Intensity"),
            (self.color_red, "Red"),
            (self.color_green, "Green"),
            (self.color_blue, "Blue"),
        ]
        .into_iter()
        .filter_map(|(present, label)| present.then_some(label))
        .collect()
    }
}

/// Read-only view over the metadata of one scan inside a container.
pub trait ScanHeader {
    fn name(&self) -> Option<&str>;
    fn guid(&self) -> Option<&str>;
    fn description(&self) -> Option<&str>;
    fn sensor_vendor(&self) -> Option<&str>;
    fn sensor_model(&self) -> Option<&str>;
    /// Point count as declared by the metadata, which may be wrong
    fn point_count(&self) -> u64;
    fn fields(&self) -> FieldPresence;

    /// Scan name, or `Scan<index>` when the metadata carries none.
    fn display_name(&self, index: usize) -> String {
        match self.name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Scan{}", index),
        }
    }
}

/// Container-level information reported when a source is opened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerSummary {
    pub format_name: String,
    pub library_version: Option<String>,
    pub guid: Option<String>,
    pub scan_count: usize,
}

/// Options applied when creating an output container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    pub guid: String,
}
