//! Conversion between scalar values and their UTF-8 bytes.
//!
//! Three decoders share the byte-class table but differ in how much they
//! trust their input:
//!
//! - [`decode_fast`] looks only at the lead byte and takes the continuation
//!   bytes on faith. Use it on text that is already known to be well formed.
//! - [`decode`] / [`decode_bounded`] validate every continuation byte. A
//!   broken sequence yields [`Malformed`] with the bits decoded so far, and the
//!   [`Advance`] policy decides whether the cursor moves.
//! - [`decode_lenient`] and the `scan_lenient*` functions fall back to reading
//!   the lead byte as a single Latin-1 byte, which is what legacy mixed
//!   encodings usually contain. They never report an error.
//!
//! Positions are byte offsets into a slice. The unbounded functions follow
//! C-string rules: a NUL byte terminates the text and anything past the end of
//! the slice reads as NUL. The `_bounded` functions never read at or past
//! `end`.

use alloc::vec::Vec;
use core::fmt;

use crate::{
    class::{ByteClass, classify, is_continuation},
    error::{EncodeError, Malformed},
};

/// Largest scalar with a one-byte encoding.
pub const MAX_UTF8_1: u32 = 0x7f;
/// Largest scalar with a two-byte encoding.
pub const MAX_UTF8_2: u32 = 0x7ff;
/// Largest scalar with a three-byte encoding.
pub const MAX_UTF8_3: u32 = 0xffff;
/// Largest scalar a four-byte sequence can carry.
pub const MAX_UTF8_4: u32 = 0x1f_ffff;
/// Mask applied to a scalar before it is encoded.
pub const CODE_MASK: u32 = 0x1f_ffff;
/// High bit that marks a decode error in the tagged `u32` representation.
pub const ERROR_FLAG: u32 = 0x8000_0000;

/// Outcome of decoding one sequence.
pub type Decoded = Result<u32, Malformed>;

/// Folds a [`Decoded`] into a single `u32`, setting [`ERROR_FLAG`] on errors.
///
/// This is the representation older callers expect; new code should prefer
/// the `Result`.
#[must_use]
pub fn to_tagged(decoded: Decoded) -> u32 {
    match decoded {
        Ok(code) => code,
        Err(err) => err.partial | ERROR_FLAG,
    }
}

/// Inverse of [`to_tagged`].
///
/// # Errors
///
/// Returns [`Malformed`] with the low bits as partial value when
/// [`ERROR_FLAG`] is set.
pub fn from_tagged(raw: u32) -> Decoded {
    if raw & ERROR_FLAG == 0 {
        Ok(raw)
    } else {
        Err(Malformed::new(raw & !ERROR_FLAG))
    }
}

/// Number of bytes needed to encode `code`, or `0` when it exceeds
/// [`MAX_UTF8_4`].
#[must_use]
pub const fn encoded_len(code: u32) -> usize {
    if code <= MAX_UTF8_1 {
        1
    } else if code <= MAX_UTF8_2 {
        2
    } else if code <= MAX_UTF8_3 {
        3
    } else if code <= MAX_UTF8_4 {
        4
    } else {
        0
    }
}

/// The UTF-8 bytes of a single scalar.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Encoded {
    bytes: [u8; 4],
    len: u8,
}

impl Encoded {
    /// The encoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    /// Number of encoded bytes (1 to 4).
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    /// Always `false`; an encoding has at least one byte.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for Encoded {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Encoded")
            .field(&bstr::BStr::new(self.as_bytes()))
            .finish()
    }
}

/// Encodes `code` after masking it with [`CODE_MASK`].
///
/// There is no failure path: a value above [`MAX_UTF8_4`] loses its high
/// bits and comes out as a four-byte sequence. Use [`try_encode`] when the
/// input is not trusted.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn encode(code: u32) -> Encoded {
    let code = code & CODE_MASK;
    let mut bytes = [0u8; 4];
    let len = if code <= MAX_UTF8_1 {
        bytes[0] = code as u8;
        1
    } else if code <= MAX_UTF8_2 {
        bytes[0] = (code >> 6) as u8 | 0xc0;
        bytes[1] = (code & 0x3f) as u8 | 0x80;
        2
    } else if code <= MAX_UTF8_3 {
        bytes[0] = (code >> 12) as u8 | 0xe0;
        bytes[1] = ((code >> 6) & 0x3f) as u8 | 0x80;
        bytes[2] = (code & 0x3f) as u8 | 0x80;
        3
    } else {
        bytes[0] = ((code >> 18) & 0x07) as u8 | 0xf0;
        bytes[1] = ((code >> 12) & 0x3f) as u8 | 0x80;
        bytes[2] = ((code >> 6) & 0x3f) as u8 | 0x80;
        bytes[3] = (code & 0x3f) as u8 | 0x80;
        4
    };
    Encoded { bytes, len }
}

/// Appends the encoding of `code` to `out`.
pub fn encode_into(code: u32, out: &mut Vec<u8>) {
    out.extend_from_slice(encode(code).as_bytes());
}

/// Encodes `code`, refusing values that do not fit in four bytes.
///
/// # Errors
///
/// [`EncodeError::OutOfRange`] when `code > MAX_UTF8_4`.
pub fn try_encode(code: u32) -> Result<Encoded, EncodeError> {
    if encoded_len(code) == 0 {
        Err(EncodeError::OutOfRange(code))
    } else {
        Ok(encode(code))
    }
}

#[inline]
pub(crate) fn byte_at(bytes: &[u8], pos: usize) -> u8 {
    bytes.get(pos).copied().unwrap_or(0)
}

#[inline]
fn payload(byte: u8) -> u32 {
    u32::from(byte & 0x3f)
}

/// Decodes the scalar at `pos` without validating continuation bytes.
///
/// A stray continuation byte is read as the start of a three-byte sequence.
///
/// # Errors
///
/// Only an illegal lead byte (`11111xxx`) fails; the partial value is the
/// byte with its top bit cleared.
pub fn decode_fast(bytes: &[u8], pos: usize) -> Decoded {
    let lead = byte_at(bytes, pos);
    let at = |i: usize| payload(byte_at(bytes, pos + i));
    let class = classify(lead);
    let head = u32::from(lead & class.lead_mask());
    match class {
        ByteClass::Ascii => Ok(head),
        ByteClass::Lead2 => Ok(head << 6 | at(1)),
        ByteClass::Lead3 | ByteClass::Continuation => Ok(head << 12 | at(1) << 6 | at(2)),
        ByteClass::Lead4 => Ok(head << 18 | at(1) << 12 | at(2) << 6 | at(3)),
        ByteClass::Illegal => Err(Malformed::new(head)),
    }
}

/// When a strict decoder moves the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Advance {
    /// Move only past a completely decoded sequence. On error the cursor stays
    /// put, so the caller can retry byte by byte.
    #[default]
    OnSuccess,
    /// Always move past at least one byte, even on malformed input. Scanners
    /// that resynchronise on corrupted streams rely on this to make progress.
    Always,
}

/// Strict decode of the sequence at `*pos` in a NUL-terminated span.
///
/// See the [module docs](self) for the position rules. A NUL byte decodes as
/// `Ok(0)`; with [`Advance::OnSuccess`] the cursor does not move past it.
///
/// # Errors
///
/// [`Malformed`] when the lead byte is illegal, is a stray continuation byte,
/// or when a required continuation byte is missing.
pub fn decode(bytes: &[u8], pos: &mut usize, advance: Advance) -> Decoded {
    decode_impl(bytes, pos, usize::MAX, advance)
}

/// Strict decode of the sequence at `*pos`, reading nothing at or past `end`.
///
/// `end` is clamped to `bytes.len()`. A sequence cut short by `end` is
/// reported like any other missing continuation byte. At `*pos >= end` the
/// result is an error with partial value `0`; [`Advance::Always`] then clamps
/// the cursor to `end` instead of moving it further.
///
/// # Errors
///
/// As [`decode`], plus the end-of-span case above.
pub fn decode_bounded(bytes: &[u8], pos: &mut usize, end: usize, advance: Advance) -> Decoded {
    let end = end.min(bytes.len());
    if *pos >= end {
        if advance == Advance::Always {
            *pos = end;
        }
        return Err(Malformed::new(0));
    }
    decode_impl(bytes, pos, end, advance)
}

/// Shared body of the strict decoders. `end == usize::MAX` selects C-string
/// rules (NUL terminates, reads past the slice yield NUL).
fn decode_impl(bytes: &[u8], pos: &mut usize, end: usize, advance: Advance) -> Decoded {
    let terminated = end == usize::MAX;
    let in_span = |i: usize| i < end && (!terminated || byte_at(bytes, i) != 0);

    let start = *pos;
    let lead = byte_at(bytes, start);
    let class = classify(lead);

    let mut cursor = start + 1;
    let result = match class {
        ByteClass::Ascii => {
            if lead == 0 && terminated && advance == Advance::OnSuccess {
                return Ok(0);
            }
            Ok(u32::from(lead))
        }
        ByteClass::Illegal => Err(Malformed::new(u32::from(lead & 0x7f))),
        ByteClass::Continuation => {
            // Resynchronise: swallow up to two more bytes unless they are
            // illegal, hoping to land on the next lead byte.
            let mut extra = 0;
            while extra < 2
                && in_span(cursor)
                && classify(byte_at(bytes, cursor)) != ByteClass::Illegal
            {
                cursor += 1;
                extra += 1;
            }
            Err(Malformed::new(0))
        }
        ByteClass::Lead2 | ByteClass::Lead3 | ByteClass::Lead4 => {
            let mut code = u32::from(lead & class.lead_mask());
            let mut complete = true;
            for _ in 0..class.trailing_len() {
                let byte = byte_at(bytes, cursor);
                if in_span(cursor) && is_continuation(byte) {
                    code = code << 6 | payload(byte);
                    cursor += 1;
                } else {
                    complete = false;
                    break;
                }
            }
            if complete { Ok(code) } else { Err(Malformed::new(code)) }
        }
    };

    if result.is_ok() || advance == Advance::Always {
        *pos = cursor;
    }
    result
}

/// Lenient decode of the scalar at `pos`; the cursor is not moved.
///
/// A multi-byte sequence with all its continuation bytes present is decoded;
/// anything else is returned as the single byte value, so legacy Latin-1 text
/// mixed into UTF-8 still renders.
#[must_use]
pub fn decode_lenient(bytes: &[u8], pos: usize) -> u32 {
    lenient_at(bytes, pos, usize::MAX).0
}

/// Lenient decode of the scalar at `*pos` in a NUL-terminated span, moving the
/// cursor past it. The cursor stays on a NUL byte.
pub fn scan_lenient(bytes: &[u8], pos: &mut usize) -> u32 {
    let (code, len) = lenient_at(bytes, *pos, usize::MAX);
    if code != 0 || byte_at(bytes, *pos) != 0 {
        *pos += len;
    }
    code
}

/// Lenient decode of the scalar at `*pos`, reading nothing at or past `end`.
///
/// Returns `None` once the cursor has reached `end`.
pub fn scan_lenient_bounded(bytes: &[u8], pos: &mut usize, end: usize) -> Option<u32> {
    let end = end.min(bytes.len());
    if *pos >= end {
        return None;
    }
    let (code, len) = lenient_at(bytes, *pos, end);
    *pos += len;
    Some(code)
}

fn lenient_at(bytes: &[u8], pos: usize, end: usize) -> (u32, usize) {
    let lead = byte_at(bytes, pos);
    let class = classify(lead);
    let trailing = match class {
        ByteClass::Lead2 | ByteClass::Lead3 | ByteClass::Lead4 => class.trailing_len(),
        _ => return (u32::from(lead), 1),
    };
    let tail_end = pos + 1 + trailing;
    if tail_end > end {
        return (u32::from(lead), 1);
    }
    let mut code = u32::from(lead & class.lead_mask());
    for i in pos + 1..tail_end {
        let byte = byte_at(bytes, i);
        if !is_continuation(byte) {
            return (u32::from(lead), 1);
        }
        code = code << 6 | payload(byte);
    }
    (code, 1 + trailing)
}

/// Iterator over the scalars of a bounded span.
///
/// Uses [`Advance::Always`], so every item consumes at least one byte and the
/// iterator ends after at most `bytes.len()` items, whatever the input.
#[derive(Clone)]
pub struct Scalars<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scalars<'a> {
    /// Byte offset of the next item.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The bytes not yet decoded.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

impl Iterator for Scalars<'_> {
    type Item = Decoded;

    fn next(&mut self) -> Option<Decoded> {
        if self.pos >= self.bytes.len() {
            return None;
        }
        Some(decode_bounded(
            self.bytes,
            &mut self.pos,
            self.bytes.len(),
            Advance::Always,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.bytes.len() - self.pos;
        (left.div_ceil(4), Some(left))
    }
}

impl fmt::Debug for Scalars<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scalars")
            .field("remaining", &bstr::BStr::new(self.remaining()))
            .finish()
    }
}

/// Decodes `bytes` scalar by scalar, resynchronising on malformed input.
#[must_use]
pub fn scalars(bytes: &[u8]) -> Scalars<'_> {
    Scalars { bytes, pos: 0 }
}
