mod config;
pub mod logging;
pub mod settings;

pub use config::{
    MANIFEST_FILE_NAME, MANIFEST_TEMP_SUFFIX, default_config_path, manifest_path, temp_path,
};
pub use settings::Settings;

pub const PROGRAM_NAME: &str = "efulist";
pub const PROGRAM_LOG_LEVEL: &str = "EFULIST_LOG_LEVEL";
