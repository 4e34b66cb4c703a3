//! Skipping terminal escape sequences.
//!
//! Escape sequences (colour codes, cursor movement, hyperlinks) occupy bytes
//! but no display columns, so the escape-aware navigator and measurements ask
//! an [`EscapeSkipper`] to step over them. [`AnsiEscapes`] understands the
//! ECMA-48 forms a terminal emits; callers with their own markup can plug in a
//! different implementation.

use crate::codec::byte_at;

/// The escape byte that opens every ANSI sequence.
pub const ESC: u8 = 0x1b;
/// Bell, one of the two OSC terminators.
pub const BEL: u8 = 0x07;
/// Second byte of a Control Sequence Introducer (`ESC [`).
pub const CSI_START: u8 = b'[';
/// Second byte of an Operating System Command (`ESC ]`).
pub const OSC_START: u8 = b']';
/// Final byte of the String Terminator (`ESC \`).
pub const ST_FINAL: u8 = b'\\';

/// Steps over a run of escape sequences.
///
/// Both methods take the position of a byte that may start an escape
/// sequence and return the position after the last sequence in the run, or
/// `pos` unchanged when none starts there. `skip` treats the span as
/// NUL-terminated; `skip_bounded` never reads at or past `end`.
pub trait EscapeSkipper {
    /// Skips escape sequences in a NUL-terminated span.
    fn skip(&self, bytes: &[u8], pos: usize) -> usize;

    /// Skips escape sequences without reading at or past `end`.
    fn skip_bounded(&self, bytes: &[u8], pos: usize, end: usize) -> usize;
}

impl<T: EscapeSkipper + ?Sized> EscapeSkipper for &T {
    fn skip(&self, bytes: &[u8], pos: usize) -> usize {
        (**self).skip(bytes, pos)
    }

    fn skip_bounded(&self, bytes: &[u8], pos: usize, end: usize) -> usize {
        (**self).skip_bounded(bytes, pos, end)
    }
}

/// ECMA-48 escape sequences as written by terminals.
///
/// Recognised forms, each starting with [`ESC`]:
///
/// | form | shape                                                      |
/// |------|------------------------------------------------------------|
/// | CSI  | `ESC [` parameters `0x30..=0x3F`, intermediates `0x20..=0x2F`, final `0x40..=0x7E` |
/// | OSC  | `ESC ]` payload, terminated by BEL or `ESC \`              |
/// | nF   | `ESC` intermediates `0x20..=0x2F`, final `0x30..=0x7E`     |
/// | Fp/Fe/Fs | `ESC` followed by one final byte                       |
///
/// An unterminated sequence extends to the end of the span. A lone `ESC`
/// at the end is consumed on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnsiEscapes;

impl AnsiEscapes {
    /// Length of the single sequence at `pos`, or 0 if `pos` is not `ESC`.
    fn sequence_len(bytes: &[u8], pos: usize, end: usize) -> usize {
        let at = |i: usize| if i < end { byte_at(bytes, i) } else { 0 };
        if at(pos) != ESC {
            return 0;
        }
        // Positions are capped at `end`; `at` yields 0 (terminator) there.
        let mut p = pos + 1;
        match at(p) {
            0 => return 1,
            CSI_START => {
                p += 1;
                while matches!(at(p), 0x30..=0x3f) {
                    p += 1;
                }
                while matches!(at(p), 0x20..=0x2f) {
                    p += 1;
                }
                if matches!(at(p), 0x40..=0x7e) {
                    p += 1;
                }
            }
            OSC_START => {
                p += 1;
                loop {
                    match at(p) {
                        0 => break,
                        BEL => {
                            p += 1;
                            break;
                        }
                        ESC if at(p + 1) == ST_FINAL => {
                            p += 2;
                            break;
                        }
                        _ => p += 1,
                    }
                }
            }
            _ => {
                while matches!(at(p), 0x20..=0x2f) {
                    p += 1;
                }
                if matches!(at(p), 0x30..=0x7e) {
                    p += 1;
                }
            }
        }
        p - pos
    }

    fn skip_run(bytes: &[u8], mut pos: usize, end: usize) -> usize {
        loop {
            let len = Self::sequence_len(bytes, pos, end);
            if len == 0 {
                return pos;
            }
            pos += len;
        }
    }
}

impl EscapeSkipper for AnsiEscapes {
    fn skip(&self, bytes: &[u8], pos: usize) -> usize {
        // NUL matches no byte range of any form, so every sequence already
        // stops there; the slice end is the only extra bound needed.
        self.skip_bounded(bytes, pos, bytes.len())
    }

    fn skip_bounded(&self, bytes: &[u8], pos: usize, end: usize) -> usize {
        let end = end.min(bytes.len());
        if pos >= end {
            return pos;
        }
        Self::skip_run(bytes, pos, end)
    }
}

/// An [`EscapeSkipper`] that recognises nothing, turning the escape-aware
/// functions into their plain counterparts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoEscapes;

impl EscapeSkipper for NoEscapes {
    fn skip(&self, _bytes: &[u8], pos: usize) -> usize {
        pos
    }

    fn skip_bounded(&self, _bytes: &[u8], pos: usize, _end: usize) -> usize {
        pos
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::sgr(b"\x1b[1;31mX", 7)]
    #[case::sgr_reset(b"\x1b[0mX", 4)]
    #[case::csi_no_params(b"\x1b[HX", 3)]
    #[case::csi_private(b"\x1b[?25lX", 6)]
    #[case::osc_bel(b"\x1b]0;title\x07X", 10)]
    #[case::osc_st(b"\x1b]8;;http://x\x1b\\X", 15)]
    #[case::two_byte(b"\x1b7X", 2)]
    #[case::charset(b"\x1b(BX", 3)]
    #[case::run(b"\x1b[1m\x1b[4mX", 8)]
    #[case::none(b"X\x1b[0m", 0)]
    fn skips(#[case] bytes: &[u8], #[case] expected: usize) {
        assert_eq!(AnsiEscapes.skip(bytes, 0), expected);
        assert_eq!(AnsiEscapes.skip_bounded(bytes, 0, bytes.len()), expected);
    }

    #[test]
    fn unterminated_sequences_stop_at_the_end() {
        let bytes = b"\x1b[12;";
        assert_eq!(AnsiEscapes.skip(bytes, 0), bytes.len());
        assert_eq!(AnsiEscapes.skip_bounded(bytes, 0, 3), 3);
        assert_eq!(AnsiEscapes.skip(b"\x1b", 0), 1);
        assert_eq!(AnsiEscapes.skip(b"\x1b]unterminated", 0), 14);
    }

    #[test]
    fn terminated_flavour_stops_at_nul() {
        let bytes = b"\x1b[1\0m";
        assert_eq!(AnsiEscapes.skip(bytes, 0), 3);
        assert_eq!(AnsiEscapes.skip_bounded(bytes, 0, bytes.len()), 3);
        assert_eq!(AnsiEscapes.skip(b"\x1b\0", 0), 1);
    }

    #[test]
    fn bounded_never_passes_end() {
        let bytes = b"\x1b[1;31m";
        for end in 0..=bytes.len() {
            assert!(AnsiEscapes.skip_bounded(bytes, 0, end) <= end);
        }
        assert_eq!(AnsiEscapes.skip_bounded(bytes, 5, 2), 5);
    }

    #[test]
    fn no_escapes_is_identity() {
        assert_eq!(NoEscapes.skip(b"\x1b[0m", 0), 0);
        assert_eq!(NoEscapes.skip_bounded(b"\x1b[0m", 0, 4), 0);
    }
}
