use smallvec::SmallVec;

use crate::chars::{SENTINEL, ascii_fold, char_offsets, is_extractable, mblen};

const WORD_INLINE: usize = 64;

/// Split `input` into maximal runs of extractable characters and hand each
/// run to `emit`, ASCII-folded and wrapped in sentinels: `$run$`.
///
/// The walk steps by `mblen`; multibyte characters are non-extractable and
/// terminate the current word. Every emitted buffer starts and ends with
/// the sentinel, is at least three bytes long, and contains no interior
/// sentinel (an input `$` is itself non-extractable).
pub fn segment_words(input: &[u8], mut emit: impl FnMut(&[u8])) {
    let mut buf: SmallVec<[u8; WORD_INLINE]> = SmallVec::new();
    let mut i = 0;

    while i < input.len() {
        let step = mblen(&input[i..]);
        let b = input[i];

        if step == 1 && is_extractable(b) {
            if buf.is_empty() {
                buf.push(SENTINEL);
            }
            buf.push(ascii_fold(b));
        } else if !buf.is_empty() {
            buf.push(SENTINEL);
            emit(&buf);
            buf.clear();
        }

        i += step;
    }

    if !buf.is_empty() {
        buf.push(SENTINEL);
        emit(&buf);
    }
}

/// Enumerate every q-gram of every word of `input`, for each
/// `q in [min_q, max_q]`, at every character position.
///
/// Occurrences are emitted in document order and are *not* deduplicated;
/// the statistics collectors own their per-document dedup discipline.
pub fn for_each_qgram(input: &[u8], min_q: usize, max_q: usize, mut emit: impl FnMut(&[u8])) {
    segment_words(input, |word| {
        let offsets = char_offsets(word);
        let nchars = offsets.len() - 1;
        for start in 0..nchars {
            let upper = max_q.min(nchars - start);
            for q in min_q..=upper {
                emit(&word[offsets[start]..offsets[start + q]]);
            }
        }
    });
}

#[cfg(test)]
#[path = "segment_tests.rs"]
mod tests;
