use serde::Serialize;
use std::fmt;

/// Findings about a scan that are reported but never change what gets copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    ZeroPointCount,
    SuspiciousPointCount { point_count: u64 },
    ShortSample { requested: u64, read: u64 },
    SampleFailed { reason: String },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::ZeroPointCount => {
                write!(f, "Point count is 0, the scan metadata may be wrong")
            }
            Advisory::SuspiciousPointCount { point_count } => write!(
                f,
                "Point count is exactly {}, a known placeholder value",
                point_count
            ),
            Advisory::ShortSample { requested, read } => write!(
                f,
                "Requested {} sample points but only {} could be read",
                requested, read
            ),
            Advisory::SampleFailed { reason } => write!(
                f,
                "Sample read failed, point count metadata may be wrong: {}",
                reason
            ),
        }
    }
}
