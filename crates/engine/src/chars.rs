use smallvec::SmallVec;

/// Word-boundary marker prefixed and suffixed to every extractable run.
///
/// Downstream code treats it as an ordinary character; its only job is to
/// make word-initial and word-final grams first-class table entries.
pub const SENTINEL: u8 = b'$';

const OFFSETS_INLINE: usize = 32;

/// Byte length of the character starting at `bytes[0]`, clamped to the
/// remaining input so a truncated multibyte tail still makes progress.
///
/// Classification is lead-byte only; a bare continuation byte counts as a
/// one-byte character.
#[inline]
pub fn mblen(bytes: &[u8]) -> usize {
    debug_assert!(!bytes.is_empty());
    let len = match bytes[0] {
        b if b < 0xC0 => 1,
        b if b < 0xE0 => 2,
        b if b < 0xF0 => 3,
        _ => 4,
    };
    len.min(bytes.len())
}

/// A character is extractable iff its lead byte is ASCII alphanumeric.
/// Multibyte characters are non-extractable and terminate a word.
#[inline]
pub fn is_extractable(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// ASCII-only case folding for a single byte.
///
/// - 'A'..'Z' = 'a'..'z'
/// - All other bytes (including non-ASCII) are returned unchanged.
#[inline]
pub fn ascii_fold(b: u8) -> u8 {
    if b.is_ascii_uppercase() { b + 32 } else { b }
}

/// Number of characters in `bytes`, stepping by `mblen`.
#[inline]
pub fn char_count(bytes: &[u8]) -> usize {
    let mut n = 0;
    let mut i = 0;
    while i < bytes.len() {
        i += mblen(&bytes[i..]);
        n += 1;
    }
    n
}

/// Byte offsets of every character start, plus a final entry holding
/// `bytes.len()`. `offsets[s]..offsets[s + q]` is the byte range of the
/// q-character substring starting at character `s`.
pub fn char_offsets(bytes: &[u8]) -> SmallVec<[usize; OFFSETS_INLINE]> {
    let mut offsets: SmallVec<[usize; OFFSETS_INLINE]> = SmallVec::new();
    let mut i = 0;
    while i < bytes.len() {
        offsets.push(i);
        i += mblen(&bytes[i..]);
    }
    offsets.push(bytes.len());
    offsets
}

#[cfg(test)]
#[path = "chars_tests.rs"]
mod tests;
