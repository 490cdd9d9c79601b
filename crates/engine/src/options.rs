use serde::{Deserialize, Serialize};

use crate::{
    chars::char_count,
    error::{Result, VgramError},
    table::{GramTable, validate_q_range},
};

const DEFAULT_Q: usize = 2;

fn default_q() -> usize {
    DEFAULT_Q
}

/// Operator-class options supplied at index build time.
///
/// Validation is eager: a build with invalid parameters must fail before
/// any index state exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexOptions {
    #[serde(default = "default_q")]
    pub min_q: usize,
    #[serde(default = "default_q")]
    pub max_q: usize,
    /// The frequent grams, one per element.
    #[serde(default, rename = "vgrams")]
    pub grams: Vec<String>,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            min_q: DEFAULT_Q,
            max_q: DEFAULT_Q,
            grams: Vec::new(),
        }
    }
}

impl IndexOptions {
    /// Parse the option string handed over by the index DDL.
    pub fn from_json(s: &str) -> Result<Self> {
        let options: IndexOptions = serde_json::from_str(s)
            .map_err(|e| VgramError::InvalidParameter(format!("malformed options: {e}")))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        validate_q_range(self.min_q, self.max_q)?;
        for gram in &self.grams {
            let chars = char_count(gram.as_bytes());
            if chars < self.min_q || chars > self.max_q {
                return Err(VgramError::InvalidParameter(format!(
                    "gram {gram:?} is {chars} characters long, outside [{}, {}]",
                    self.min_q, self.max_q,
                )));
            }
        }
        Ok(())
    }

    /// Build the frequent-gram table these options describe.
    pub fn build_table(&self) -> Result<GramTable> {
        GramTable::fill(&self.grams, self.min_q, self.max_q)
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
