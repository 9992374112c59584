use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the settings file.
pub const CONFIG_PATH_ENV: &str = "SCAN_SPLIT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "scan_split";
const ENV_PREFIX: &str = "SCAN_SPLIT";

/// 4.5 GiB
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 4_831_838_208;
pub const DEFAULT_BYTES_PER_POINT: u64 = 30;
pub const DEFAULT_SAMPLE_POINTS: u64 = 10;
/// Point count observed in exports where the scanner wrote a placeholder.
pub const KNOWN_BAD_POINT_COUNT: u64 = 42_359_888;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub split: SplitConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Target ceiling for one output container, compared against estimated sizes
    pub max_file_size_bytes: u64,
    /// Per-point cost used by the size estimator
    pub bytes_per_point: u64,
    /// Upper bound of the advisory sample read done during inventory
    pub sample_points: u64,
    /// Point counts that are flagged when seen in scan metadata
    pub suspicious_point_counts: Vec<u64>,
    pub output_extension: String,
    pub guid_prefix: String,
    /// Directory for output files; the input's directory when unset
    pub output_dir: Option<PathBuf>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            bytes_per_point: DEFAULT_BYTES_PER_POINT,
            sample_points: DEFAULT_SAMPLE_POINTS,
            suspicious_point_counts: vec![KNOWN_BAD_POINT_COUNT],
            output_extension: "e57".to_string(),
            guid_prefix: "E57Splitter".to_string(),
            output_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Daily rolling log files are written here when set
    pub log_dir: Option<String>,
    pub stdout_level: String,
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            stdout_level: "info".to_string(),
            file_level: "debug".to_string(),
        }
    }
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path =
        env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_settings_from(Path::new(&config_path))
}

/// Layers the optional settings file under `SCAN_SPLIT__SECTION__KEY` environment overrides.
pub fn load_settings_from(path: &Path) -> Result<Settings, config::ConfigError> {
    let file_name = path.to_string_lossy();

    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(&file_name).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
