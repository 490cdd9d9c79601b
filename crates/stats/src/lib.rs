mod estimate;
mod exact;
mod key;
mod lossy;

pub use estimate::{fragment_selectivity, pattern_selectivity};
pub use exact::FrequentCollector;
pub use lossy::{ColumnStats, MAX_STAT_Q, Mcelem, TopKCollector, analyze_rows};
