use bytemuck::pod_read_unaligned;

use crate::{
    chars::char_count,
    error::{Result, VgramError},
};

/// Hard upper bound on `min_q` / `max_q`, in characters.
pub const GRAM_CHARS_LIMIT: usize = 10;

/// Byte offset of the gram-count field inside the packed blob. Offsets
/// stored in the offset array are relative to this base, so the base is
/// part of the format rather than an artifact of any in-memory struct.
const COUNT_BASE: usize = 0;
/// Byte width of the count field and of each offset entry.
const SLOT: usize = 4;

/// Check `1 <= min_q <= max_q <= GRAM_CHARS_LIMIT`.
pub fn validate_q_range(min_q: usize, max_q: usize) -> Result<()> {
    if min_q < 1 || max_q > GRAM_CHARS_LIMIT || min_q > max_q {
        return Err(VgramError::InvalidParameter(format!(
            "gram length range [{min_q}, {max_q}] must satisfy 1 <= min <= max <= {GRAM_CHARS_LIMIT}"
        )));
    }
    Ok(())
}

/// The frequent-gram table: an immutable, bytewise-sorted list of grams
/// judged too common to index.
///
/// Packed layout (native-endian):
///
/// ```text
/// i32  count
/// i32  offset[0..count-1]   // byte offsets into the blob, relative to
///                           // the start of the count field
/// u8   payload[]            // grams with NUL terminators, ascending
/// ```
///
/// The arena-plus-offset-array shape keeps lookups cache-friendly and the
/// whole table serialization-ready as a single byte run.
#[derive(Debug)]
pub struct GramTable {
    min_q: usize,
    max_q: usize,
    raw: Vec<u8>,
    count: usize,
}

/// Half-open range of gram indices still compatible with the probe prefix.
///
/// The table is sorted, so all grams sharing a prefix are contiguous; a
/// window narrowed for a prefix can be narrowed again, cheaper, for any
/// extension of that prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    lo: usize,
    hi: usize,
}

impl SearchWindow {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lo >= self.hi
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hi.saturating_sub(self.lo)
    }
}

impl GramTable {
    /// Validate, sort, deduplicate, and pack a gram list.
    ///
    /// Every gram must have a *character* length (not byte length) in
    /// `[min_q, max_q]` and no interior NUL.
    pub fn fill<S: AsRef<[u8]>>(grams: &[S], min_q: usize, max_q: usize) -> Result<Self> {
        validate_q_range(min_q, max_q)?;

        let mut sorted: Vec<&[u8]> = Vec::with_capacity(grams.len());
        for gram in grams {
            let gram = gram.as_ref();
            let chars = char_count(gram);
            if chars < min_q || chars > max_q {
                return Err(VgramError::InvalidParameter(format!(
                    "gram {:?} is {} characters long, outside [{min_q}, {max_q}]",
                    String::from_utf8_lossy(gram),
                    chars,
                )));
            }
            if gram.contains(&0) {
                return Err(VgramError::InvalidParameter(format!(
                    "gram {:?} contains a NUL byte",
                    String::from_utf8_lossy(gram),
                )));
            }
            sorted.push(gram);
        }

        sorted.sort_unstable();
        sorted.dedup();

        let count = sorted.len();
        let header_len = COUNT_BASE + SLOT + SLOT * count;
        let payload_len: usize = sorted.iter().map(|g| g.len() + 1).sum();

        let mut raw = Vec::with_capacity(header_len + payload_len);
        raw.extend_from_slice(&(count as i32).to_ne_bytes());
        let mut offset = header_len;
        for gram in &sorted {
            raw.extend_from_slice(&(offset as i32).to_ne_bytes());
            offset += gram.len() + 1;
        }
        for gram in &sorted {
            raw.extend_from_slice(gram);
            raw.push(0);
        }
        debug_assert_eq!(raw.len(), header_len + payload_len);

        Ok(Self {
            min_q,
            max_q,
            raw,
            count,
        })
    }

    /// Rebuild a table from its packed form, validating the full layout.
    pub fn from_packed(bytes: &[u8], min_q: usize, max_q: usize) -> Result<Self> {
        validate_q_range(min_q, max_q)?;

        if bytes.len() < SLOT {
            return Err(VgramError::CorruptedInput(
                "packed table shorter than its count field".into(),
            ));
        }
        let count = pod_read_unaligned::<i32>(&bytes[COUNT_BASE..COUNT_BASE + SLOT]);
        if count < 0 {
            return Err(VgramError::CorruptedInput(format!(
                "negative gram count {count}"
            )));
        }
        let count = count as usize;
        let header_len = COUNT_BASE + SLOT + SLOT * count;
        if bytes.len() < header_len {
            return Err(VgramError::CorruptedInput(format!(
                "packed table truncated inside the offset array ({} < {header_len})",
                bytes.len()
            )));
        }

        let table = Self {
            min_q,
            max_q,
            raw: bytes.to_vec(),
            count,
        };

        let mut expected_offset = header_len;
        let mut prev: Option<&[u8]> = None;
        for i in 0..count {
            let offset = table.offset(i);
            if offset != expected_offset {
                return Err(VgramError::CorruptedInput(format!(
                    "gram {i} offset {offset} does not follow the previous gram"
                )));
            }
            let Some(nul) = bytes[offset..].iter().position(|&b| b == 0) else {
                return Err(VgramError::CorruptedInput(format!(
                    "gram {i} is not NUL-terminated"
                )));
            };
            let gram = &bytes[offset..offset + nul];
            let chars = char_count(gram);
            if chars < min_q || chars > max_q {
                return Err(VgramError::CorruptedInput(format!(
                    "gram {i} is {chars} characters long, outside [{min_q}, {max_q}]"
                )));
            }
            if let Some(prev) = prev
                && prev >= gram
            {
                return Err(VgramError::CorruptedInput(format!(
                    "grams {} and {i} are not in strict ascending byte order",
                    i - 1
                )));
            }
            prev = Some(gram);
            expected_offset = offset + nul + 1;
        }
        if expected_offset != bytes.len() {
            return Err(VgramError::CorruptedInput(format!(
                "{} trailing bytes after the last gram",
                bytes.len() - expected_offset
            )));
        }

        Ok(table)
    }

    /// The packed byte run described in the layout above.
    #[inline]
    pub fn as_packed(&self) -> &[u8] {
        &self.raw
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn min_q(&self) -> usize {
        self.min_q
    }

    #[inline]
    pub fn max_q(&self) -> usize {
        self.max_q
    }

    #[inline]
    fn offset(&self, i: usize) -> usize {
        let at = COUNT_BASE + SLOT + SLOT * i;
        pod_read_unaligned::<i32>(&self.raw[at..at + SLOT]) as usize
    }

    /// The i-th gram in ascending byte order, without its terminator.
    #[inline]
    pub fn get(&self, i: usize) -> &[u8] {
        debug_assert!(i < self.count);
        let start = self.offset(i);
        let rest = &self.raw[start..];
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .expect("packed gram is NUL-terminated");
        &rest[..nul]
    }

    /// Window covering the whole table.
    #[inline]
    pub fn full_window(&self) -> SearchWindow {
        SearchWindow {
            lo: 0,
            hi: self.count,
        }
    }

    /// Narrow `win` to the grams having `probe` as a byte prefix and
    /// report whether some gram equals `probe` exactly.
    ///
    /// Callers extend `probe` one character at a time and pass the window
    /// back in, so each step searches only the survivors of the previous
    /// prefix.
    pub fn probe(&self, probe: &[u8], win: &mut SearchWindow) -> bool {
        let lo = self.lower_bound(win.lo, win.hi, |gram| gram < probe);
        let hi = self.lower_bound(lo, win.hi, |gram| gram.starts_with(probe));
        win.lo = lo;
        win.hi = hi;
        lo < hi && self.get(lo) == probe
    }

    /// Exact membership against the whole table.
    pub fn contains(&self, gram: &[u8]) -> bool {
        let mut win = self.full_window();
        self.probe(gram, &mut win)
    }

    /// First index in `[lo, hi)` where `pred` turns false. `pred` must be
    /// monotone over the sorted gram order.
    fn lower_bound(&self, mut lo: usize, mut hi: usize, pred: impl Fn(&[u8]) -> bool) -> usize {
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if pred(self.get(mid)) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
