use thiserror::Error;

/// Errors surfaced by eager parameter validation and the query surface.
///
/// Internal algorithmic postconditions (sort order, presence after a
/// successful probe) are debug assertions, not error values.
#[derive(Debug, Error)]
pub enum VgramError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid usage: {0}")]
    InvalidUsage(String),

    #[error("corrupted input: {0}")]
    CorruptedInput(String),

    #[error("unsupported match strategy {0:?} (expected \"like\" or \"ilike\")")]
    UnsupportedStrategy(String),
}

pub type Result<T> = std::result::Result<T, VgramError>;
