mod chars;
mod error;
mod extract;
mod gram;
mod options;
mod pattern;
mod persist;
mod segment;
mod table;

pub use chars::{SENTINEL, char_count, char_offsets, is_extractable, mblen};
pub use error::{Result, VgramError};
pub use extract::extract_value;
pub use gram::{Gram, sort_unique};
pub use options::IndexOptions;
pub use pattern::{DEFAULT_ESCAPE, Fragment, MatchStrategy, Pads, extract_query, tokenize};
pub use persist::{
    TABLE_MAGIC, TABLE_VERSION, TableHeader, load_table, write_table_atomic, write_table_to,
};
pub use segment::{for_each_qgram, segment_words};
pub use table::{GRAM_CHARS_LIMIT, GramTable, SearchWindow, validate_q_range};
