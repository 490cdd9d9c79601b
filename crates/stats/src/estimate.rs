use log::debug;

use vgram_engine::{char_offsets, tokenize};

use crate::lossy::{ColumnStats, MAX_STAT_Q, Mcelem};

/// Fragment selectivity when analyze kept no elements at all; without any
/// statistics every estimate would otherwise collapse to zero.
const DEFAULT_FRAGMENT_SEL: f64 = 0.005;

/// Estimate the selectivity of a LIKE/ILIKE pattern against an analyzed
/// column: the product of the per-fragment estimates, scaled by the
/// non-NULL fraction and clamped to `[0, 1]`.
pub fn pattern_selectivity(stats: &ColumnStats, pattern: &[u8], escape: u8) -> f64 {
    let mut sel = 1.0;
    for fragment in tokenize(pattern, escape) {
        let frag_sel = fragment_selectivity(&stats.mcelem, fragment.as_bytes());
        debug!(
            "fragment {:?} estimated at {frag_sel:.6}",
            String::from_utf8_lossy(fragment.as_bytes()),
        );
        sel *= frag_sel;
    }

    sel *= 1.0 - stats.null_frac;
    sel.clamp(0.0, 1.0)
}

/// Estimate the frequency of one literal fragment.
///
/// Fragments no longer than `MAX_STAT_Q` characters are looked up
/// directly; a miss is scored below anything kept, at half the minimum
/// kept frequency. Longer fragments use a first-order Markov chain over
/// sliding trigrams: start from the leading trigram's frequency, then for
/// each one-character slide multiply by `freq(trigram) / freq(overlap
/// bigram)`. A missing denominator is widened by stepping its left
/// boundary forward until some kept gram is found, or taken as 1.0 once
/// it is empty.
pub fn fragment_selectivity(mc: &Mcelem, fragment: &[u8]) -> f64 {
    if mc.is_empty() {
        return DEFAULT_FRAGMENT_SEL;
    }

    let offsets = char_offsets(fragment);
    let nchars = offsets.len() - 1;
    if nchars == 0 {
        return 1.0;
    }

    let rare = mc.min_freq() * 0.5;

    if nchars <= MAX_STAT_Q {
        return mc.lookup(fragment).unwrap_or(rare).clamp(0.0, 1.0);
    }

    let slice = |lo: usize, hi: usize| &fragment[offsets[lo]..offsets[hi]];

    let mut sel = mc.lookup(slice(0, MAX_STAT_Q)).unwrap_or(rare);

    for i in 1..=(nchars - MAX_STAT_Q) {
        let numer = mc.lookup(slice(i, i + MAX_STAT_Q)).unwrap_or(rare);

        // The overlap with the previous trigram, widened while absent.
        let mut lo = i;
        let hi = i + MAX_STAT_Q - 1;
        let denom = loop {
            if lo == hi {
                break 1.0;
            }
            if let Some(freq) = mc.lookup(slice(lo, hi)) {
                break freq;
            }
            lo += 1;
        };

        if denom > 0.0 {
            sel *= numer / denom;
        }
    }

    sel.clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "estimate_tests.rs"]
mod tests;
