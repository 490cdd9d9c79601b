use hashbrown::HashMap;
use log::debug;

use vgram_engine::{Gram, Result, VgramError, for_each_qgram, validate_q_range};

use crate::key::GramKey;

struct DocEntry {
    count: i64,
    seen: bool,
}

/// Streaming document-frequency aggregate over q-grams.
///
/// For each input document, every distinct q-gram of length in
/// `[min_q, max_q]` occurring in its words increments its count at most
/// once, however often it repeats inside the document. `finish` returns
/// the byte-sorted grams whose count reaches
/// `floor(threshold * total_documents)`.
///
/// The map assigns each gram an entry index; the `touched` list records
/// the entries seen in the current document so that clearing the flags
/// after a document costs O(touched), not O(map).
pub struct FrequentCollector {
    min_q: usize,
    max_q: usize,
    threshold: f64,
    total_docs: i64,
    map: HashMap<GramKey, usize>,
    entries: Vec<DocEntry>,
    touched: Vec<usize>,
}

impl FrequentCollector {
    pub fn new(min_q: usize, max_q: usize, threshold: f64) -> Result<Self> {
        validate_q_range(min_q, max_q)?;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(VgramError::InvalidParameter(format!(
                "threshold {threshold} is outside [0, 1]"
            )));
        }

        Ok(Self {
            min_q,
            max_q,
            threshold,
            total_docs: 0,
            map: HashMap::new(),
            entries: Vec::new(),
            touched: Vec::new(),
        })
    }

    /// Feed one document. `None` is a NULL document: it counts toward the
    /// threshold denominator but contributes no grams.
    pub fn add_document(&mut self, doc: Option<&str>) {
        self.total_docs += 1;
        let Some(doc) = doc else {
            return;
        };

        let map = &mut self.map;
        let entries = &mut self.entries;
        let touched = &mut self.touched;

        for_each_qgram(doc.as_bytes(), self.min_q, self.max_q, |gram| {
            match map.get(gram) {
                Some(&idx) => {
                    let entry = &mut entries[idx];
                    if !entry.seen {
                        entry.count += 1;
                        entry.seen = true;
                        touched.push(idx);
                    }
                }
                None => {
                    let idx = entries.len();
                    entries.push(DocEntry {
                        count: 1,
                        seen: true,
                    });
                    map.insert(GramKey::from_slice(gram), idx);
                    touched.push(idx);
                }
            }
        });

        for &idx in &self.touched {
            self.entries[idx].seen = false;
        }
        self.touched.clear();
    }

    #[inline]
    pub fn documents_seen(&self) -> i64 {
        self.total_docs
    }

    /// Byte-sorted grams whose document frequency meets the threshold.
    pub fn finish(self) -> Vec<Gram> {
        let min_count = (self.threshold * self.total_docs as f64).floor() as i64;

        let mut out: Vec<Gram> = self
            .map
            .iter()
            .filter(|&(_, &idx)| self.entries[idx].count >= min_count)
            .map(|(key, _)| Gram::from_slice(key.as_bytes()))
            .collect();
        out.sort_unstable();

        debug!(
            "kept {} of {} distinct grams over {} documents (min count {min_count})",
            out.len(),
            self.entries.len(),
            self.total_docs,
        );
        out
    }
}

#[cfg(test)]
#[path = "exact_tests.rs"]
mod tests;
