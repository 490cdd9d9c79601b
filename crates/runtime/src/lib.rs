mod config;
pub mod logging;

pub use config::{
    DEFAULT_TARGET_K, DEFAULT_THRESHOLD, PROGRAM_LOG_LEVEL, PROGRAM_NAME, default_table_path,
    vgram_dir,
};

pub use logging::init;
