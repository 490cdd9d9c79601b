use std::fmt;
use std::ops::Deref;

use smallvec::SmallVec;

const INLINE: usize = 16;

/// An extracted V-gram: a short owned byte string.
///
/// Ordering is plain byte comparison, which puts a proper prefix before any
/// of its extensions. Grams extracted from words are at most
/// `GRAM_CHARS_LIMIT + 2` ASCII bytes, so they stay inline.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gram(SmallVec<[u8; INLINE]>);

impl Gram {
    #[inline]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Gram(SmallVec::from_slice(bytes))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Gram {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Gram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gram({:?})", String::from_utf8_lossy(&self.0))
    }
}

/// Byte-sort and deduplicate an extracted gram set in place.
#[inline]
pub fn sort_unique(grams: &mut Vec<Gram>) {
    grams.sort_unstable();
    grams.dedup();
}

#[cfg(test)]
#[path = "gram_tests.rs"]
mod tests;
