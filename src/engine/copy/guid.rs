use chrono::Utc;

/// Identifiers for output containers: `<prefix>_<unix millis>_<ordinal>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidGenerator {
    prefix: String,
    stamp_millis: i64,
}

impl GuidGenerator {
    pub fn new(prefix: &str) -> Self {
        Self::with_stamp(prefix, Utc::now().timestamp_millis())
    }

    pub fn with_stamp(prefix: &str, stamp_millis: i64) -> Self {
        Self {
            prefix: prefix.to_string(),
            stamp_millis,
        }
    }

    /// Never returns the source container's own GUID.
    pub fn guid_for(&self, ordinal: usize, source_guid: Option<&str>) -> String {
        let guid = format!("{}_{}_{}", self.prefix, self.stamp_millis, ordinal);
        if source_guid == Some(guid.as_str()) {
            format!("{}_split", guid)
        } else {
            guid
        }
    }
}
