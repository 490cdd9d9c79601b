use std::borrow::Borrow;

use smallvec::SmallVec;

const INLINE: usize = 12;

/// Owned gram key for the count maps.
///
/// Stays inline for every gram the engine can emit, and borrows as raw
/// bytes so map lookups on a transient gram slice allocate nothing.
#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct GramKey(SmallVec<[u8; INLINE]>);

impl GramKey {
    #[inline]
    pub(crate) fn from_slice(bytes: &[u8]) -> Self {
        GramKey(SmallVec::from_slice(bytes))
    }

    #[inline]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for GramKey {
    #[inline]
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for GramKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GramKey({:?})", String::from_utf8_lossy(&self.0))
    }
}
