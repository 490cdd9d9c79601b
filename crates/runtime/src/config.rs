use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "vgram";
pub const PROGRAM_LOG_LEVEL: &str = "VGRAM_LOG_LEVEL";
pub const TABLE_FILE_NAME: &str = "table.bin";

/// Default document-frequency threshold for the frequent-gram aggregate.
pub const DEFAULT_THRESHOLD: f64 = 0.05;
/// Default number of most-common elements kept by analyze.
pub const DEFAULT_TARGET_K: usize = 100;

/// Per-user data directory for this program.
pub fn vgram_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(PROGRAM_NAME)
}

/// Default location of the persisted frequent-gram table.
pub fn default_table_path() -> PathBuf {
    vgram_dir().join(TABLE_FILE_NAME)
}
