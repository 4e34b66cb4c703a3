//! Stepping between scalar boundaries.
//!
//! All functions take a byte slice and a byte offset and return the offset of
//! a neighbouring boundary. They never fail: on malformed input they step over
//! as much of the broken sequence as can be attributed to it, so a scanner
//! always makes progress and lands back in sync at the next lead byte.
//!
//! Flavours:
//!
//! - `next`, `skip`, ... treat the slice as NUL-terminated. A step at NUL (or
//!   past the slice end) returns its input, which is how loops detect the end.
//! - `next_bounded`, `prev_bounded`, ... take an explicit bound and never read
//!   at or past `end` (or before `begin`). NUL is an ordinary byte.
//! - `*_escaped` variants first hop over a run of escape sequences with an
//!   [`EscapeSkipper`].

use crate::{
    class::{ByteClass, classify, is_continuation},
    codec::byte_at,
    escape::EscapeSkipper,
    measure::{length, length_escaped},
    span::Span,
};

/// Offset just past the scalar starting at `pos` in a NUL-terminated span.
///
/// The lead byte decides how many continuation bytes are wanted; consumption
/// stops at the first byte that is not one. An illegal byte is skipped on its
/// own, a stray continuation byte is skipped with up to two more.
#[must_use]
pub fn next(bytes: &[u8], pos: usize) -> usize {
    let lead = byte_at(bytes, pos);
    if lead == 0 {
        return pos;
    }
    step(bytes, pos, bytes.len())
}

/// Offset just past the scalar at `pos`, reading nothing at or past `end`.
///
/// Returns `end` (clamped to `bytes.len()`) when `pos >= end`.
#[must_use]
pub fn next_bounded(bytes: &[u8], pos: usize, end: usize) -> usize {
    let end = end.min(bytes.len());
    if pos >= end {
        return end;
    }
    step(bytes, pos, end)
}

/// Single forward step; `pos < end <= bytes.len()` unless called from
/// [`next`] with a non-NUL lead, which implies `pos < bytes.len()`.
fn step(bytes: &[u8], pos: usize, end: usize) -> usize {
    let mut cursor = pos + 1;
    for _ in 0..classify(bytes[pos]).trailing_len() {
        if cursor < end && is_continuation(bytes[cursor]) {
            cursor += 1;
        } else {
            break;
        }
    }
    cursor
}

/// Offset of the scalar ending just before `pos`, never going below 0.
#[must_use]
pub fn prev(bytes: &[u8], pos: usize) -> usize {
    prev_bounded(bytes, pos, 0)
}

/// Offset of the scalar ending just before `pos`, never going below `begin`.
///
/// Walks back over at most three continuation bytes, then compares their
/// count `n` with the length `L` the stopping byte declares:
///
/// - `n < L`: the stopping byte starts the scalar (a well-formed or
///   truncated sequence);
/// - `n >= L`: surplus continuation bytes form their own scalar, which
///   starts right after the `L`-byte sequence;
/// - still on a continuation byte after three steps: `pos - 3`;
/// - illegal byte: `pos - 1`.
///
/// The result is clamped into `[begin, pos]`.
#[must_use]
pub fn prev_bounded(bytes: &[u8], pos: usize, begin: usize) -> usize {
    let pos = pos.min(bytes.len());
    if pos <= begin {
        return begin;
    }
    if bytes[pos - 1] < 0x80 {
        return pos - 1;
    }

    let mut cursor = pos - 1;
    let mut walked = 0;
    let mut class = classify(bytes[cursor]);
    while cursor > begin && walked < 3 && class == ByteClass::Continuation {
        walked += 1;
        cursor -= 1;
        class = classify(bytes[cursor]);
    }

    let found = match class {
        ByteClass::Ascii | ByteClass::Lead2 | ByteClass::Lead3 | ByteClass::Lead4 => {
            let declared = class.sequence_len();
            if walked < declared {
                cursor
            } else {
                cursor + declared
            }
        }
        ByteClass::Continuation => pos.saturating_sub(3),
        ByteClass::Illegal => pos - 1,
    };
    found.clamp(begin, pos)
}

/// [`next`] after skipping a run of escape sequences at `pos`.
#[must_use]
pub fn next_escaped(bytes: &[u8], pos: usize, escapes: &impl EscapeSkipper) -> usize {
    next(bytes, escapes.skip(bytes, pos))
}

/// [`next_bounded`] after skipping a run of escape sequences at `pos`.
#[must_use]
pub fn next_escaped_bounded(
    bytes: &[u8],
    pos: usize,
    end: usize,
    escapes: &impl EscapeSkipper,
) -> usize {
    next_bounded(bytes, escapes.skip_bounded(bytes, pos, end), end)
}

/// Resolves a possibly negative scalar count against the text length.
fn resolve_count(count: isize, total: impl FnOnce() -> usize) -> usize {
    if count >= 0 {
        count.unsigned_abs()
    } else {
        total().saturating_sub(count.unsigned_abs())
    }
}

/// Repeats `step` up to `count` times, stopping early when it stalls.
fn repeat_step(mut pos: usize, count: usize, step: impl Fn(usize) -> usize) -> usize {
    for _ in 0..count {
        let after = step(pos);
        if after == pos {
            break;
        }
        pos = after;
    }
    pos
}

/// Moves `count` scalars forward from `pos` in a NUL-terminated span.
///
/// A negative `count` counts from the end: `-1` lands on the last scalar of
/// the text that starts at `pos`.
#[must_use]
pub fn skip(bytes: &[u8], pos: usize, count: isize) -> usize {
    let count = resolve_count(count, || {
        length(Span::Terminated(bytes.get(pos..).unwrap_or_default()))
    });
    repeat_step(pos, count, |p| next(bytes, p))
}

/// Moves `count` scalars forward from `pos` without reading at or past `end`.
#[must_use]
pub fn skip_bounded(bytes: &[u8], pos: usize, end: usize, count: isize) -> usize {
    let end = end.min(bytes.len());
    let count = resolve_count(count, || {
        length(Span::Bounded(bytes.get(pos..end).unwrap_or_default()))
    });
    repeat_step(pos, count, |p| next_bounded(bytes, p, end))
}

/// Like [`skip`], but escape sequences are hopped over and not counted.
#[must_use]
pub fn skip_escaped(
    bytes: &[u8],
    pos: usize,
    count: isize,
    escapes: &impl EscapeSkipper,
) -> usize {
    let count = resolve_count(count, || {
        length_escaped(
            Span::Terminated(bytes.get(pos..).unwrap_or_default()),
            escapes,
        )
    });
    repeat_step(pos, count, |p| next_escaped(bytes, p, escapes))
}

/// Like [`skip_bounded`], but escape sequences are hopped over and not
/// counted.
#[must_use]
pub fn skip_escaped_bounded(
    bytes: &[u8],
    pos: usize,
    end: usize,
    count: isize,
    escapes: &impl EscapeSkipper,
) -> usize {
    let end = end.min(bytes.len());
    let count = resolve_count(count, || {
        length_escaped(
            Span::Bounded(bytes.get(pos..end).unwrap_or_default()),
            escapes,
        )
    });
    repeat_step(pos, count, |p| next_escaped_bounded(bytes, p, end, escapes))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::escape::AnsiEscapes;

    #[rstest]
    #[case::ascii(b"ab", 0, 1)]
    #[case::two(b"\xc3\xa9x", 0, 2)]
    #[case::three(b"\xe2\x82\xacx", 0, 3)]
    #[case::four(b"\xf0\x9f\x98\x80x", 0, 4)]
    #[case::bad_second(b"\xc3(", 0, 1)]
    #[case::four_cut_after_one(b"\xf0\x9fx", 0, 2)]
    #[case::four_cut_after_two(b"\xf0\x9f\x98x", 0, 3)]
    #[case::stray_run(b"\x80\x80\x80\x80", 0, 3)]
    #[case::stray_single(b"\x80a", 0, 1)]
    #[case::illegal(b"\xff\x80", 0, 1)]
    #[case::nul(b"\0a", 0, 0)]
    #[case::past_end(b"a", 1, 1)]
    #[case::truncated_by_slice(b"\xe2\x82", 0, 2)]
    fn next_steps(#[case] bytes: &[u8], #[case] pos: usize, #[case] expected: usize) {
        assert_eq!(next(bytes, pos), expected);
    }

    #[test]
    fn next_bounded_respects_end() {
        let bytes = "€x".as_bytes();
        assert_eq!(next_bounded(bytes, 0, 4), 3);
        assert_eq!(next_bounded(bytes, 0, 2), 2);
        assert_eq!(next_bounded(bytes, 0, 1), 1);
        assert_eq!(next_bounded(bytes, 3, 3), 3);
        assert_eq!(next_bounded(bytes, 5, 3), 3);
        // NUL is data here.
        assert_eq!(next_bounded(b"\0a", 0, 2), 1);
        // `end` past the slice is clamped.
        assert_eq!(next_bounded(b"a", 1, 10), 1);
    }

    #[rstest]
    #[case::ascii(b"ab", 2, 1)]
    #[case::two(b"a\xc3\xa9", 3, 1)]
    #[case::three(b"a\xe2\x82\xac", 4, 1)]
    #[case::four(b"a\xf0\x9f\x98\x80", 5, 1)]
    #[case::lead_alone(b"a\xc3", 2, 1)]
    #[case::truncated_four(b"a\xf0\x9f\x98", 4, 1)]
    #[case::surplus_after_two(b"a\xc3\xa9\x80", 4, 3)]
    #[case::surplus_after_ascii(b"a\x80\x80", 3, 1)]
    #[case::long_stray_run(b"\x80\x80\x80\x80\x80", 5, 2)]
    #[case::illegal(b"a\xff", 2, 1)]
    #[case::illegal_before_continuation(b"a\xff\x80", 3, 2)]
    #[case::at_start(b"ab", 0, 0)]
    fn prev_steps(#[case] bytes: &[u8], #[case] pos: usize, #[case] expected: usize) {
        assert_eq!(prev(bytes, pos), expected);
    }

    #[test]
    fn prev_bounded_never_crosses_begin() {
        let bytes = b"\xe2\x82\xac";
        assert_eq!(prev_bounded(bytes, 3, 0), 0);
        assert_eq!(prev_bounded(bytes, 3, 1), 1);
        assert_eq!(prev_bounded(bytes, 3, 2), 2);
        assert_eq!(prev_bounded(bytes, 3, 3), 3);
        // Stray continuation bytes at the very start.
        assert_eq!(prev_bounded(b"\x80\x80", 2, 0), 0);
    }

    #[test]
    fn scenario_bad_continuation_stops_after_lead() {
        assert_eq!(next(&[0xc3, 0x28], 0), 1);
        assert_eq!(next_bounded(&[0xc3, 0x28], 0, 2), 1);
    }

    #[test]
    fn escaped_steps_hop_over_sequences() {
        let bytes = b"\x1b[31m\xc3\xa9\x1b[0m";
        assert_eq!(next_escaped(bytes, 0, &AnsiEscapes), 7);
        assert_eq!(next_escaped_bounded(bytes, 0, bytes.len(), &AnsiEscapes), 7);
        // Trailing escapes with nothing after them: the step stalls at the end.
        assert_eq!(next_escaped(bytes, 7, &AnsiEscapes), bytes.len());
        assert_eq!(
            next_escaped_bounded(bytes, 7, bytes.len(), &AnsiEscapes),
            bytes.len()
        );
    }

    #[test]
    fn skip_counts_scalars() {
        let bytes = "aé€😀".as_bytes();
        assert_eq!(skip(bytes, 0, 0), 0);
        assert_eq!(skip(bytes, 0, 2), 3);
        assert_eq!(skip(bytes, 0, 4), 10);
        assert_eq!(skip(bytes, 0, 99), 10);
        assert_eq!(skip(bytes, 0, -1), 6);
        assert_eq!(skip(bytes, 0, -4), 0);
        assert_eq!(skip(bytes, 0, -99), 0);
        assert_eq!(skip(bytes, 1, -1), 6);

        assert_eq!(skip_bounded(bytes, 0, 6, 99), 6);
        assert_eq!(skip_bounded(bytes, 0, 6, -1), 3);
    }

    #[test]
    fn skip_stops_at_terminator() {
        assert_eq!(skip(b"ab\0cd", 0, 5), 2);
        assert_eq!(skip_bounded(b"ab\0cd", 0, 5, 5), 5);
    }

    #[test]
    fn skip_escaped_ignores_sequences() {
        let bytes = b"\x1b[1ma\x1b[0mb";
        assert_eq!(skip_escaped(bytes, 0, 1, &AnsiEscapes), 5);
        assert_eq!(skip_escaped(bytes, 0, 2, &AnsiEscapes), bytes.len());
        assert_eq!(skip_escaped(bytes, 0, -1, &AnsiEscapes), 5);
        assert_eq!(
            skip_escaped_bounded(bytes, 0, bytes.len(), -1, &AnsiEscapes),
            5
        );
    }
}
