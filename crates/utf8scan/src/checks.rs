//! Invariant checks shared by the property tests and the fuzz target.
//!
//! Every function panics on the first violation, so a fuzzer or quickcheck
//! can report the offending input.

#![allow(clippy::missing_panics_doc)]

use alloc::vec::Vec;

use bstr::ByteSlice;

use crate::{
    align::{AlignOptions, align},
    codec::{Advance, decode_bounded, scalars, scan_lenient_bounded},
    escape::{AnsiEscapes, EscapeSkipper},
    measure::{length, length_escaped},
    nav::{next, next_bounded, next_escaped_bounded, prev_bounded},
    span::Span,
};

/// Runs every check below on `bytes`.
pub fn check_all(bytes: &[u8], width: u8) {
    check_forward(bytes);
    check_backward(bytes);
    check_decoders(bytes);
    check_escaped(bytes);
    check_alignment(bytes, usize::from(width));
    if let Ok(text) = bytes.to_str() {
        check_valid_text(text);
    }
}

/// Boundaries found walking forward with `next_bounded`.
#[must_use]
pub fn forward_boundaries(bytes: &[u8]) -> Vec<usize> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        out.push(pos);
        pos = next_bounded(bytes, pos, bytes.len());
    }
    out
}

/// Forward steps make progress, stay in bounds and agree with `length`.
pub fn check_forward(bytes: &[u8]) {
    let end = bytes.len();
    for pos in 0..=end {
        let after = next_bounded(bytes, pos, end);
        assert!(after <= end, "next_bounded({pos}) = {after} past {end}");
        if pos < end {
            assert!(after > pos, "next_bounded stalled at {pos}");
            assert!(after - pos <= 4, "next_bounded({pos}) stepped {} bytes", after - pos);
        }
        if bytes.get(pos).is_some_and(|&b| b != 0) {
            assert!(next(bytes, pos) > pos, "next stalled at {pos}");
        }
    }
    assert_eq!(forward_boundaries(bytes).len(), length(Span::Bounded(bytes)));
}

/// Backward steps make progress and stay in `[begin, pos)`.
pub fn check_backward(bytes: &[u8]) {
    for begin in 0..=bytes.len().min(4) {
        for pos in begin + 1..=bytes.len() {
            let before = prev_bounded(bytes, pos, begin);
            assert!(
                (begin..pos).contains(&before),
                "prev_bounded({pos}, {begin}) = {before}"
            );
        }
    }
}

/// Strict and lenient decoders consume input and never overrun.
pub fn check_decoders(bytes: &[u8]) {
    let end = bytes.len();

    let mut pos = 0;
    while pos < end {
        let before = pos;
        let _ = decode_bounded(bytes, &mut pos, end, Advance::Always);
        assert!(pos > before && pos <= end, "decode_bounded stalled at {before}");
    }

    let mut pos = 0;
    while let Some(code) = scan_lenient_bounded(bytes, &mut pos, end) {
        assert!(pos <= end);
        assert!(code <= 0x1f_ffff, "lenient decode produced {code:#x}");
    }
    assert_eq!(pos, end);

    let mut iter = scalars(bytes);
    let mut count = 0;
    while iter.next().is_some() {
        count += 1;
        assert!(count <= end, "scalars yielded more items than bytes");
    }
    assert_eq!(iter.offset(), end);
}

/// Escape-aware stepping and counting.
pub fn check_escaped(bytes: &[u8]) {
    let end = bytes.len();
    let mut pos = 0;
    let mut visible = 0;
    loop {
        let after = next_escaped_bounded(bytes, pos, end, &AnsiEscapes);
        assert!(after <= end);
        if after == pos || AnsiEscapes.skip_bounded(bytes, pos, end) >= end {
            break;
        }
        visible += 1;
        pos = after;
    }
    assert_eq!(visible, length_escaped(Span::Bounded(bytes), &AnsiEscapes));
    assert!(visible <= length(Span::Bounded(bytes)));
}

/// Padded output is exactly as wide as requested, and re-aligning it to the
/// same width changes nothing.
pub fn check_alignment(bytes: &[u8], width: usize) {
    let columns = length(Span::Bounded(bytes));
    for opts in [AlignOptions::left(width), AlignOptions::right(width)] {
        let once = align(Span::Bounded(bytes), opts);
        assert_eq!(length(Span::Bounded(&once)), columns.max(width));
        assert_eq!(align(Span::Bounded(&once), opts), once);
    }
}

/// On well-formed text every API agrees with `str`.
pub fn check_valid_text(text: &str) {
    let bytes = text.as_bytes();
    let expected: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    assert_eq!(forward_boundaries(bytes), expected);

    let decoded: Vec<u32> = scalars(bytes).map(|r| r.unwrap_or(u32::MAX)).collect();
    let chars: Vec<u32> = text.chars().map(u32::from).collect();
    assert_eq!(decoded, chars);

    let mut pos = bytes.len();
    for &boundary in expected.iter().rev() {
        pos = prev_bounded(bytes, pos, 0);
        assert_eq!(pos, boundary);
    }
}
