use crate::{
    chars::mblen,
    gram::{Gram, sort_unique},
    segment::segment_words,
    table::GramTable,
};

/// Emit the minimal cover of rare V-grams for one word span.
///
/// At each character position the walker grows a candidate one character
/// at a time, reusing the table window narrowed for the shorter prefix,
/// and stops at the shortest length in `[min_q, max_q]` whose gram is not
/// a table entry. A recorded candidate is emitted only when a later
/// candidate reaches strictly further right; a candidate that ends at or
/// before the recorded one replaces it (it is a substring of the recorded
/// span, so any window containing the recorded span contains it too).
///
/// The cover guarantees that every all-extractable substring of at least
/// `max_q + 1` characters contains at least one emitted gram.
pub(crate) fn walk_word(table: &GramTable, word: &[u8], emit: &mut impl FnMut(&[u8])) {
    let min_q = table.min_q();
    let max_q = table.max_q();

    let mut pending: Option<(usize, usize)> = None;
    let mut p = 0;

    while p < word.len() {
        let mut win = table.full_window();
        let mut r = p;
        let mut len = 0;
        let mut found = None;

        while r < word.len() && len < max_q {
            r += mblen(&word[r..]);
            len += 1;
            let exact = table.probe(&word[p..r], &mut win);
            if len >= min_q && !exact {
                found = Some(r);
                break;
            }
        }

        if let Some(end) = found {
            if let Some((start, prev_end)) = pending
                && end > prev_end
            {
                emit(&word[start..prev_end]);
            }
            pending = Some((p, end));
        }

        p += mblen(&word[p..]);
    }

    if let Some((start, end)) = pending {
        emit(&word[start..end]);
    }
}

/// Extract the byte-sorted, deduplicated V-gram set of an indexed value.
pub fn extract_value(table: &GramTable, text: &str) -> Vec<Gram> {
    let mut grams = Vec::new();
    segment_words(text.as_bytes(), |word| {
        walk_word(table, word, &mut |gram| grams.push(Gram::from_slice(gram)));
    });
    sort_unique(&mut grams);
    grams
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
