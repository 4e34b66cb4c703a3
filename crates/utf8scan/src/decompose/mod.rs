//! Single-level canonical decomposition.
//!
//! Maps a precomposed scalar such as `é` to its base scalar and one combining
//! mark. Only one level is resolved: a result whose base is itself
//! precomposed can be looked up again.

mod table;

/// One canonical decomposition: `composed` is equivalent to `base` followed
/// by `mark`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decomposition {
    /// The precomposed scalar.
    pub composed: u32,
    /// The base scalar.
    pub base: u32,
    /// The combining mark.
    pub mark: u32,
}

/// Every known decomposition, strictly ascending by `composed`.
#[must_use]
pub fn table() -> &'static [Decomposition] {
    table::TABLE
}

/// The decomposition of `code`, if it has one.
///
/// # Examples
///
/// ```rust
/// let d = utf8scan::lookup(0xe9).unwrap();
/// assert_eq!((d.base, d.mark), (0x65, 0x301));
/// assert!(utf8scan::lookup(0x41).is_none());
/// ```
#[must_use]
pub fn lookup(code: u32) -> Option<&'static Decomposition> {
    let found = table::TABLE
        .binary_search_by_key(&code, |d| d.composed)
        .ok()
        .map(|index| &table::TABLE[index]);
    tracing::trace!(code, found = found.is_some(), "decomposition lookup");
    found
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn table_is_strictly_ascending() {
        assert_eq!(table().len(), 1013);
        assert!(table().windows(2).all(|w| w[0].composed < w[1].composed));
    }

    #[test]
    fn every_entry_is_found() {
        for entry in table() {
            assert_eq!(lookup(entry.composed), Some(entry));
        }
    }

    #[rstest]
    #[case::nul(0)]
    #[case::ascii(0x41)]
    #[case::below_first(0xbf)]
    #[case::gap(0xc6)]
    #[case::combining_mark(0x301)]
    #[case::above_last(0x1_d1c1)]
    #[case::beyond_unicode(0x1f_ffff)]
    fn absent(#[case] code: u32) {
        assert_eq!(lookup(code), None);
    }

    #[test]
    fn only_table_entries_are_found() {
        #[cfg(not(any(miri, feature = "test-fast")))]
        let stride = 1;
        #[cfg(any(miri, feature = "test-fast"))]
        let stride = 61;

        let mut entries = table().iter().peekable();
        for code in (0..=crate::codec::MAX_UTF8_4).step_by(stride) {
            while entries.next_if(|d| d.composed < code).is_some() {}
            let listed = entries.peek().is_some_and(|d| d.composed == code);
            assert_eq!(lookup(code).is_some(), listed, "{code:#x}");
        }
        for entry in table() {
            assert!(lookup(entry.composed).is_some());
        }
    }

    #[rstest]
    #[case::e_acute(0xe9, 0x65, 0x301)]
    #[case::a_grave(0xc0, 0x41, 0x300)]
    #[case::last(0x1_d1c0, 0x1_d1bc, 0x1_d16f)]
    fn present(#[case] code: u32, #[case] base: u32, #[case] mark: u32) {
        assert_eq!(
            lookup(code),
            Some(&Decomposition {
                composed: code,
                base,
                mark
            })
        );
    }

    #[test]
    fn second_level_needs_another_lookup() {
        // ấ = â + acute, â = a + circumflex
        let outer = lookup(0x1ea5).unwrap();
        assert_eq!((outer.base, outer.mark), (0xe2, 0x301));
        let inner = lookup(outer.base).unwrap();
        assert_eq!((inner.base, inner.mark), (0x61, 0x302));
        assert_eq!(lookup(inner.base), None);
    }
}
