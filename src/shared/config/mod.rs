pub mod model;

pub use model::{LoggingConfig, Settings, SplitConfig, load_settings, load_settings_from};
