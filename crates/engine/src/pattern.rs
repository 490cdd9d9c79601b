use std::str::FromStr;

use smallvec::SmallVec;

use crate::{
    chars::{SENTINEL, ascii_fold, char_count, is_extractable, mblen},
    error::VgramError,
    extract::walk_word,
    gram::{Gram, sort_unique},
    table::GramTable,
};

/// Escape byte used when the pattern does not supply its own.
pub const DEFAULT_ESCAPE: u8 = b'\\';

/// Zero-or-more-characters wildcard.
const META_ANY: u8 = b'%';
/// Exactly-one-character wildcard.
const META_ONE: u8 = b'_';

const FRAGMENT_INLINE: usize = 48;

bitflags::bitflags! {
    /// Which sides of a fragment carry a word-boundary pad.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Pads: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
    }
}

/// A literal run between wildcards, assembled for extraction.
///
/// The buffer is ASCII-folded and already includes the sentinel pads, so
/// it can be fed to the V-gram walker exactly like a segmented word.
#[derive(Debug, Clone)]
pub struct Fragment {
    buf: SmallVec<[u8; FRAGMENT_INLINE]>,
    pads: Pads,
}

impl Fragment {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn pads(&self) -> Pads {
        self.pads
    }

    /// Character length including pads; pads are ordinary characters.
    #[inline]
    pub fn char_len(&self) -> usize {
        char_count(&self.buf)
    }
}

/// The query strategies the gram extractor accepts.
///
/// Extraction folds case either way, so both strategies produce the same
/// gram set; the mandatory recheck is what enforces case for `Like`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    Like,
    ILike,
}

impl FromStr for MatchStrategy {
    type Err = VgramError;

    fn from_str(s: &str) -> Result<Self, VgramError> {
        match s.to_ascii_lowercase().as_str() {
            "like" => Ok(MatchStrategy::Like),
            "ilike" => Ok(MatchStrategy::ILike),
            _ => Err(VgramError::UnsupportedStrategy(s.to_owned())),
        }
    }
}

fn flush(
    fragments: &mut Vec<Fragment>,
    body: &mut SmallVec<[u8; FRAGMENT_INLINE]>,
    left_pad: bool,
    right_pad: bool,
) {
    if body.is_empty() {
        return;
    }

    let mut pads = Pads::empty();
    let mut buf: SmallVec<[u8; FRAGMENT_INLINE]> = SmallVec::with_capacity(body.len() + 2);
    if left_pad {
        pads |= Pads::LEFT;
        buf.push(SENTINEL);
    }
    buf.extend_from_slice(body);
    if right_pad {
        pads |= Pads::RIGHT;
        buf.push(SENTINEL);
    }

    fragments.push(Fragment { buf, pads });
    body.clear();
}

/// Split a LIKE/ILIKE pattern into literal fragments.
///
/// `%` and `_` separate fragments and suppress the pad on their side: a
/// fragment bordering a wildcard may match anywhere on that side. Pattern
/// start/end and non-extractable separators are word boundaries and do
/// add a pad. An escaped byte is appended literally and counts as
/// extractable; an unterminated trailing escape ends tokenization with
/// whatever was assembled (the recheck keeps results exact).
pub fn tokenize(pattern: &[u8], escape: u8) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut body: SmallVec<[u8; FRAGMENT_INLINE]> = SmallVec::new();
    // Pattern start counts as a word boundary.
    let mut left_pad = true;
    let mut i = 0;

    while i < pattern.len() {
        let step = mblen(&pattern[i..]);
        let b = pattern[i];

        if step == 1 && b == escape {
            let Some(rest) = pattern.get(i + 1..)
                .filter(|rest| !rest.is_empty())
            else {
                break;
            };
            let lit = &rest[..mblen(rest)];
            body.extend(lit.iter().map(|&lb| ascii_fold(lb)));
            i += 1 + lit.len();
            continue;
        }

        if step == 1 && (b == META_ANY || b == META_ONE) {
            flush(&mut fragments, &mut body, left_pad, false);
            left_pad = false;
            i += 1;
            continue;
        }

        if step == 1 && is_extractable(b) {
            body.push(ascii_fold(b));
        } else {
            flush(&mut fragments, &mut body, left_pad, true);
            left_pad = true;
        }

        i += step;
    }

    flush(&mut fragments, &mut body, left_pad, true);
    fragments
}

/// Extract the byte-sorted unique V-gram set for a LIKE/ILIKE pattern.
///
/// An empty result means no fragment yielded a selective gram and the
/// caller must fall back to a full scan. A non-empty result is necessary
/// but not sufficient for a match: the recheck is always required.
pub fn extract_query(table: &GramTable, pattern: &[u8], escape: u8) -> Vec<Gram> {
    let mut grams = Vec::new();
    for fragment in tokenize(pattern, escape) {
        walk_word(table, fragment.as_bytes(), &mut |gram| {
            grams.push(Gram::from_slice(gram));
        });
    }
    sort_unique(&mut grams);
    grams
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
