use hashbrown::HashMap;
use log::debug;

use vgram_engine::{Gram, for_each_qgram};

use crate::key::GramKey;

/// Largest gram length kept in the statistics table: single characters,
/// bigrams, and trigrams, which is what the Markov estimator consumes.
pub const MAX_STAT_Q: usize = 3;

struct LcEntry {
    count: i64,
    delta: i64,
    seen: bool,
}

/// Lossy Counting (Manku & Motwani) over the per-document deduplicated
/// gram stream of lengths `1..=MAX_STAT_Q`.
///
/// Each entry underestimates its true document count by at most
/// `tokens_seen / bucket_width`; pruning at bucket boundaries removes
/// entries whose `count + delta` no longer exceeds the bucket number.
pub struct TopKCollector {
    target_k: usize,
    bucket_width: i64,
    b_current: i64,
    qgrams_count: i64,
    nonnull_docs: i64,
    null_docs: i64,
    map: HashMap<GramKey, LcEntry>,
    touched: Vec<GramKey>,
}

impl TopKCollector {
    pub fn new(target_k: usize) -> Self {
        // ceil((k + 10) * 1000 / 7)
        let bucket_width = ((target_k as i64 + 10) * 1000 + 6) / 7;

        Self {
            target_k,
            bucket_width,
            b_current: 0,
            qgrams_count: 0,
            nonnull_docs: 0,
            null_docs: 0,
            map: HashMap::new(),
            touched: Vec::new(),
        }
    }

    /// Feed one sample row. `None` rows count only toward the NULL
    /// fraction.
    pub fn add_row(&mut self, row: Option<&str>) {
        let Some(row) = row else {
            self.null_docs += 1;
            return;
        };
        self.nonnull_docs += 1;

        let map = &mut self.map;
        let touched = &mut self.touched;
        let b_current = self.b_current;
        let mut processed = 0i64;

        for_each_qgram(row.as_bytes(), 1, MAX_STAT_Q, |gram| {
            match map.get_mut(gram) {
                Some(entry) => {
                    if entry.seen {
                        return;
                    }
                    entry.seen = true;
                    entry.count += 1;
                }
                None => {
                    map.insert(
                        GramKey::from_slice(gram),
                        LcEntry {
                            count: 1,
                            delta: b_current - 1,
                            seen: true,
                        },
                    );
                }
            }
            touched.push(GramKey::from_slice(gram));
            processed += 1;
        });

        self.qgrams_count += processed;

        for key in self.touched.drain(..) {
            // Entries can disappear between touch and reset once pruning
            // kicks in below, so a miss here is fine.
            if let Some(entry) = self.map.get_mut(key.as_bytes()) {
                entry.seen = false;
            }
        }

        let b_new = self.qgrams_count / self.bucket_width;
        if b_new > self.b_current {
            self.b_current = b_new;
            let before = self.map.len();
            self.map.retain(|_, entry| entry.count + entry.delta > b_new);
            debug!(
                "pruned {} of {before} entries entering bucket {b_new}",
                before - self.map.len(),
            );
        }
    }

    #[inline]
    pub fn tokens_seen(&self) -> i64 {
        self.qgrams_count
    }

    /// Finish the scan and build the statistics slot.
    pub fn finish(self) -> ColumnStats {
        let cutoff = 9 * self.qgrams_count / self.bucket_width;

        let mut kept: Vec<(GramKey, i64)> = self
            .map
            .into_iter()
            .filter(|(_, entry)| entry.count > cutoff)
            .map(|(key, entry)| (key, entry.count))
            .collect();

        if kept.len() > self.target_k {
            kept.sort_unstable_by(|a, b| {
                b.1.cmp(&a.1)
                    .then_with(|| a.0.as_bytes().cmp(b.0.as_bytes()))
            });
            kept.truncate(self.target_k);
        }
        kept.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

        debug!(
            "statistics keep {} grams over {} rows (cutoff {cutoff})",
            kept.len(),
            self.nonnull_docs,
        );

        let denom = self.nonnull_docs.max(1) as f64;
        let items: Vec<(Gram, f64)> = kept
            .into_iter()
            .map(|(key, count)| (Gram::from_slice(key.as_bytes()), count as f64 / denom))
            .collect();
        let mcelem = Mcelem::from_parts(items);

        let total = self.nonnull_docs + self.null_docs;
        let null_frac = if total == 0 {
            0.0
        } else {
            self.null_docs as f64 / total as f64
        };

        ColumnStats { mcelem, null_frac }
    }
}

/// Most-common-elements statistics: byte-sorted grams, their estimated
/// frequencies in `[0, 1]`, and the min/max frequency among the kept
/// entries. Immutable once built; shared read-only at query time.
pub struct Mcelem {
    grams: Vec<Gram>,
    freqs: Vec<f64>,
    min_freq: f64,
    max_freq: f64,
}

impl Mcelem {
    /// Assemble a slot from `(gram, frequency)` pairs, sorting bytewise.
    pub fn from_parts(mut items: Vec<(Gram, f64)>) -> Self {
        items.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let mut min_freq = f64::MAX;
        let mut max_freq: f64 = 0.0;
        for &(_, freq) in &items {
            min_freq = min_freq.min(freq);
            max_freq = max_freq.max(freq);
        }
        if items.is_empty() {
            min_freq = 0.0;
        }

        let (grams, freqs) = items.into_iter().unzip();
        Self {
            grams,
            freqs,
            min_freq,
            max_freq,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.grams.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.grams.is_empty()
    }

    /// Estimated frequency of `gram`, if it was kept.
    pub fn lookup(&self, gram: &[u8]) -> Option<f64> {
        self.grams
            .binary_search_by(|probe| probe.as_bytes().cmp(gram))
            .ok()
            .map(|i| self.freqs[i])
    }

    #[inline]
    pub fn min_freq(&self) -> f64 {
        self.min_freq
    }

    #[inline]
    pub fn max_freq(&self) -> f64 {
        self.max_freq
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], f64)> {
        self.grams
            .iter()
            .map(|g| g.as_bytes())
            .zip(self.freqs.iter().copied())
    }
}

/// Everything the selectivity estimator needs about one analyzed column.
pub struct ColumnStats {
    pub mcelem: Mcelem,
    pub null_frac: f64,
}

/// Analyze a sample of rows and build the statistics slot.
pub fn analyze_rows<'a, I>(rows: I, target_k: usize) -> ColumnStats
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut collector = TopKCollector::new(target_k);
    for row in rows {
        collector.add_row(row);
    }
    collector.finish()
}

#[cfg(test)]
#[path = "lossy_tests.rs"]
mod tests;
