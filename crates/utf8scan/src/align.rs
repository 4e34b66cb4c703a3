//! Padding text to a fixed number of columns.
//!
//! Works like `%*.*s` in a format string, but counts scalars instead of bytes:
//! the precision first truncates the text to at most that many scalars, then
//! the field width pads it with ASCII spaces. A negative width pads on the
//! right (left-aligned text), a positive one on the left.

use alloc::vec::Vec;
use core::ops::Range;

use crate::{
    escape::EscapeSkipper,
    measure::{length, length_escaped},
    nav::{skip_bounded, skip_escaped_bounded},
    span::Span,
};

/// Field width and precision for [`align_into`] and friends.
///
/// # Examples
///
/// ```rust
/// use utf8scan::{AlignOptions, Span, align_into};
///
/// let mut out = Vec::new();
/// align_into(&mut out, Span::from("café"), AlignOptions::left(6));
/// assert_eq!(out, "café  ".as_bytes());
/// ```
///
/// # Default
///
/// No width and no precision: the text is copied unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignOptions {
    /// Target width in columns. Negative values left-align the text, positive
    /// values right-align it. A width smaller than the text is ignored.
    pub field_width: isize,
    /// Maximum number of scalars taken from the text.
    pub precision: Option<usize>,
}

impl AlignOptions {
    /// Left-aligned text padded on the right to `width` columns.
    #[must_use]
    pub fn left(width: usize) -> Self {
        Self {
            field_width: -isize::try_from(width).unwrap_or(isize::MAX),
            precision: None,
        }
    }

    /// Right-aligned text padded on the left to `width` columns.
    #[must_use]
    pub fn right(width: usize) -> Self {
        Self {
            field_width: isize::try_from(width).unwrap_or(isize::MAX),
            precision: None,
        }
    }

    /// Same options, taking at most `precision` scalars from the text.
    #[must_use]
    pub fn with_precision(self, precision: usize) -> Self {
        Self {
            precision: Some(precision),
            ..self
        }
    }

    fn is_left(self) -> bool {
        self.field_width < 0
    }

    fn width(self) -> usize {
        self.field_width.unsigned_abs()
    }
}

/// Column and byte counts of one alignment, computed before any copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    /// Bytes of the text that are copied.
    pub copy_len: usize,
    /// Padding spaces.
    pub spaces: usize,
    pub left: bool,
}

impl Layout {
    pub(crate) fn total(self) -> usize {
        self.copy_len + self.spaces
    }

    pub(crate) fn plain(span: Span<'_>, opts: AlignOptions) -> Self {
        let bytes = span.as_bytes();
        let columns = clamp_columns(length(span), opts);
        let end = skip_bounded(bytes, 0, bytes.len(), to_count(columns));
        Self::new(end, columns, opts)
    }

    pub(crate) fn escaped(span: Span<'_>, opts: AlignOptions, escapes: &impl EscapeSkipper) -> Self {
        let bytes = span.as_bytes();
        let columns = clamp_columns(length_escaped(span, escapes), opts);
        let end = skip_escaped_bounded(bytes, 0, bytes.len(), to_count(columns), escapes);
        // Keep escapes that directly follow the copied text, so a trailing
        // reset sequence survives truncation.
        let end = escapes.skip_bounded(bytes, end, bytes.len());
        Self::new(end, columns, opts)
    }

    fn new(copy_len: usize, columns: usize, opts: AlignOptions) -> Self {
        Self {
            copy_len,
            spaces: opts.width().saturating_sub(columns),
            left: opts.is_left(),
        }
    }

    /// Writes padding and text into `out`, which must be `total()` bytes.
    pub(crate) fn write(self, text: &[u8], out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.total());
        let text = &text[..self.copy_len];
        if self.left {
            out[..self.copy_len].copy_from_slice(text);
            out[self.copy_len..].fill(b' ');
        } else {
            out[..self.spaces].fill(b' ');
            out[self.spaces..].copy_from_slice(text);
        }
    }
}

fn clamp_columns(columns: usize, opts: AlignOptions) -> usize {
    match opts.precision {
        Some(precision) => columns.min(precision),
        None => columns,
    }
}

fn to_count(columns: usize) -> isize {
    isize::try_from(columns).unwrap_or(isize::MAX)
}

fn append(dest: &mut Vec<u8>, text: &[u8], layout: Layout) -> Range<usize> {
    let start = dest.len();
    dest.resize(start + layout.total(), 0);
    layout.write(text, &mut dest[start..]);
    start..dest.len()
}

/// Appends `span` to `dest`, truncated and padded per `opts`.
///
/// Returns the range of `dest` that was written.
pub fn align_into(dest: &mut Vec<u8>, span: Span<'_>, opts: AlignOptions) -> Range<usize> {
    append(dest, span.as_bytes(), Layout::plain(span, opts))
}

/// Like [`align_into`], but escape sequences are copied without occupying
/// columns.
pub fn align_escaped_into(
    dest: &mut Vec<u8>,
    span: Span<'_>,
    opts: AlignOptions,
    escapes: &impl EscapeSkipper,
) -> Range<usize> {
    append(dest, span.as_bytes(), Layout::escaped(span, opts, escapes))
}

/// Convenience wrapper returning the aligned text as a new vector.
#[must_use]
pub fn align(span: Span<'_>, opts: AlignOptions) -> Vec<u8> {
    let mut out = Vec::new();
    align_into(&mut out, span, opts);
    out
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use rstest::rstest;

    use super::*;
    use crate::{escape::AnsiEscapes, measure::length};

    #[rstest]
    #[case::no_options("café", AlignOptions::default(), "café")]
    #[case::left("café", AlignOptions::left(6), "café  ")]
    #[case::right("café", AlignOptions::right(6), "  café")]
    #[case::narrow("café", AlignOptions::right(2), "café")]
    #[case::precision("café", AlignOptions::default().with_precision(3), "caf")]
    #[case::precision_keeps_multibyte("éèê", AlignOptions::left(4).with_precision(2), "éè  ")]
    #[case::precision_then_width("abcdef", AlignOptions::right(5).with_precision(2), "   ab")]
    #[case::precision_zero("abc", AlignOptions::left(2).with_precision(0), "  ")]
    #[case::empty("", AlignOptions::left(3), "   ")]
    fn aligns(#[case] text: &str, #[case] opts: AlignOptions, #[case] expected: &str) {
        assert_eq!(align(Span::from(text), opts), expected.as_bytes());
    }

    #[test]
    fn cafe_is_seven_bytes_in_six_columns() {
        let out = align(Span::from("café"), AlignOptions::left(6));
        assert_eq!(out.len(), 7);
        assert_eq!(length(Span::from(&out[..])), 6);
    }

    #[test]
    fn appends_after_existing_content() {
        let mut out = vec![b'['];
        let range = align_into(&mut out, Span::from("ab"), AlignOptions::right(3));
        out.push(b']');
        assert_eq!(range, 1..4);
        assert_eq!(out, b"[ ab]");
    }

    #[test]
    fn terminated_span_stops_at_nul() {
        assert_eq!(
            align(Span::terminated(b"ab\0cd"), AlignOptions::left(4)),
            b"ab  "
        );
    }

    #[test]
    fn escaped_alignment_counts_visible_columns() {
        let text = b"\x1b[1mab\x1b[0m";
        let mut out = Vec::new();
        align_escaped_into(&mut out, Span::from(text), AlignOptions::left(4), &AnsiEscapes);
        assert_eq!(out, b"\x1b[1mab\x1b[0m  ");

        let mut out = Vec::new();
        align_escaped_into(
            &mut out,
            Span::from(text),
            AlignOptions::right(3).with_precision(1),
            &AnsiEscapes,
        );
        assert_eq!(out, b"  \x1b[1ma");
    }
}
