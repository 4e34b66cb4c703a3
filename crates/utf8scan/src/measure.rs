//! Counting scalars for display alignment.
//!
//! Every scalar is taken to occupy one column; double-width glyphs and
//! zero-width marks are not modelled. Escape sequences occupy none when the
//! `_escaped` functions are used.

use crate::{
    escape::EscapeSkipper,
    nav::next_bounded,
    span::Span,
};

/// Number of scalars in `span`, counted with the navigator's step rules.
///
/// Malformed sequences count as whatever the navigator steps over in one go,
/// so `length` agrees with [`crate::nav::skip`].
#[must_use]
pub fn length(span: Span<'_>) -> usize {
    let bytes = span.as_bytes();
    let end = bytes.len();
    let mut pos = 0;
    let mut count = 0;
    while pos < end {
        pos = next_bounded(bytes, pos, end);
        count += 1;
    }
    count
}

/// Number of scalars in `span` outside escape sequences.
#[must_use]
pub fn length_escaped(span: Span<'_>, escapes: &impl EscapeSkipper) -> usize {
    let bytes = span.as_bytes();
    let end = bytes.len();
    let mut pos = 0;
    let mut count = 0;
    loop {
        pos = escapes.skip_bounded(bytes, pos, end);
        if pos >= end {
            return count;
        }
        pos = next_bounded(bytes, pos, end);
        count += 1;
    }
}

/// Byte length a field must have so that `span` fills `wanted` columns.
///
/// Shorter text needs one padding byte per missing column on top of its own
/// bytes; text that already fills the field needs exactly its own bytes.
#[must_use]
pub fn printable_field_width(span: Span<'_>, wanted: usize) -> usize {
    let bytes = span.byte_len();
    let columns = length(span);
    if columns < wanted {
        wanted - columns + bytes
    } else {
        bytes
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::escape::{AnsiEscapes, NoEscapes};

    #[rstest]
    #[case::empty(b"", 0)]
    #[case::ascii(b"hello", 5)]
    #[case::mixed("aé€😀".as_bytes(), 4)]
    #[case::broken(b"a\xc3(\xff", 4)]
    #[case::stray_run(b"\x80\x80\x80\x80", 2)]
    fn lengths(#[case] bytes: &[u8], #[case] expected: usize) {
        assert_eq!(length(Span::Bounded(bytes)), expected);
        assert_eq!(length(Span::Terminated(bytes)), expected);
    }

    #[test]
    fn terminated_and_bounded_differ_only_at_nul() {
        assert_eq!(length(Span::Terminated(b"ab\0cd")), 2);
        assert_eq!(length(Span::Bounded(b"ab\0cd")), 5);
    }

    #[test]
    fn escapes_are_invisible() {
        let span = Span::from(&b"\x1b[1;31mcaf\xc3\xa9\x1b[0m"[..]);
        assert_eq!(length_escaped(span, &AnsiEscapes), 4);
        assert_eq!(length_escaped(span, &NoEscapes), length(span));
        assert_eq!(length_escaped(Span::from(b"\x1b[0m"), &AnsiEscapes), 0);
    }

    #[test]
    fn field_width() {
        let cafe = Span::from("café");
        assert_eq!(printable_field_width(cafe, 6), 7);
        assert_eq!(printable_field_width(cafe, 4), 5);
        assert_eq!(printable_field_width(cafe, 2), 5);
        assert_eq!(printable_field_width(Span::from(""), 3), 3);
    }
}
