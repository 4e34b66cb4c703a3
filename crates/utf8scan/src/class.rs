//! Classification of single bytes by their UTF-8 role.
//!
//! Every byte value maps to exactly one [`ByteClass`], derived from its
//! leading bits alone. The mapping lives in a 256-entry table built at compile
//! time, so classification is a single indexed load on every hot path of the
//! codec and the navigator.
//!
//! | bit pattern | class                       |
//! |-------------|-----------------------------|
//! | `0xxxxxxx`  | [`ByteClass::Ascii`]        |
//! | `10xxxxxx`  | [`ByteClass::Continuation`] |
//! | `110xxxxx`  | [`ByteClass::Lead2`]        |
//! | `1110xxxx`  | [`ByteClass::Lead3`]        |
//! | `11110xxx`  | [`ByteClass::Lead4`]        |
//! | `11111xxx`  | [`ByteClass::Illegal`]      |

/// The role a byte plays in a UTF-8 sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ByteClass {
    /// `11111xxx`: never valid anywhere in UTF-8.
    Illegal = 0,
    /// `0xxxxxxx`: a complete one-byte sequence (NUL included).
    Ascii = 1,
    /// `10xxxxxx`: carries six payload bits of a multi-byte sequence.
    Continuation = 2,
    /// `110xxxxx`: starts a two-byte sequence.
    Lead2 = 3,
    /// `1110xxxx`: starts a three-byte sequence.
    Lead3 = 4,
    /// `11110xxx`: starts a four-byte sequence.
    Lead4 = 5,
}

impl ByteClass {
    /// Length of the sequence this byte starts, or `0` for bytes that cannot
    /// start one.
    #[must_use]
    pub const fn sequence_len(self) -> usize {
        match self {
            ByteClass::Ascii => 1,
            ByteClass::Lead2 => 2,
            ByteClass::Lead3 => 3,
            ByteClass::Lead4 => 4,
            ByteClass::Illegal | ByteClass::Continuation => 0,
        }
    }

    /// Number of continuation bytes the navigator tries to consume after a
    /// byte of this class.
    ///
    /// A stray continuation byte is skipped as if it started a three-byte
    /// sequence, which resynchronises on most corrupted streams within one
    /// step.
    #[must_use]
    pub const fn trailing_len(self) -> usize {
        match self {
            ByteClass::Lead2 => 1,
            ByteClass::Lead3 | ByteClass::Continuation => 2,
            ByteClass::Lead4 => 3,
            ByteClass::Ascii | ByteClass::Illegal => 0,
        }
    }

    /// Mask selecting the payload bits of a lead byte of this class.
    pub(crate) const fn lead_mask(self) -> u8 {
        match self {
            ByteClass::Ascii | ByteClass::Illegal => 0x7f,
            ByteClass::Lead2 => 0x1f,
            ByteClass::Lead3 => 0x0f,
            ByteClass::Lead4 => 0x07,
            ByteClass::Continuation => 0x3f,
        }
    }

    /// Whether this is a `10xxxxxx` byte.
    #[inline]
    #[must_use]
    pub const fn is_continuation(self) -> bool {
        matches!(self, ByteClass::Continuation)
    }
}

const fn class_of(byte: u8) -> ByteClass {
    match byte {
        0x00..=0x7f => ByteClass::Ascii,
        0x80..=0xbf => ByteClass::Continuation,
        0xc0..=0xdf => ByteClass::Lead2,
        0xe0..=0xef => ByteClass::Lead3,
        0xf0..=0xf7 => ByteClass::Lead4,
        0xf8..=0xff => ByteClass::Illegal,
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn build_table() -> [ByteClass; 256] {
    let mut table = [ByteClass::Illegal; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = class_of(i as u8);
        i += 1;
    }
    table
}

static BYTE_CLASS: [ByteClass; 256] = build_table();

/// Classifies `byte` by its leading bits.
#[inline]
#[must_use]
pub fn classify(byte: u8) -> ByteClass {
    BYTE_CLASS[usize::from(byte)]
}

/// Shorthand for `classify(byte).is_continuation()`.
#[inline]
#[must_use]
pub fn is_continuation(byte: u8) -> bool {
    classify(byte).is_continuation()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0x00, ByteClass::Ascii)]
    #[case(b'A', ByteClass::Ascii)]
    #[case(0x7f, ByteClass::Ascii)]
    #[case(0x80, ByteClass::Continuation)]
    #[case(0xbf, ByteClass::Continuation)]
    #[case(0xc0, ByteClass::Lead2)]
    #[case(0xdf, ByteClass::Lead2)]
    #[case(0xe0, ByteClass::Lead3)]
    #[case(0xef, ByteClass::Lead3)]
    #[case(0xf0, ByteClass::Lead4)]
    #[case(0xf7, ByteClass::Lead4)]
    #[case(0xf8, ByteClass::Illegal)]
    #[case(0xfc, ByteClass::Illegal)]
    #[case(0xff, ByteClass::Illegal)]
    fn boundaries(#[case] byte: u8, #[case] expected: ByteClass) {
        assert_eq!(classify(byte), expected);
    }

    #[test]
    fn table_agrees_with_leading_ones() {
        for byte in 0..=u8::MAX {
            let expected = match byte.leading_ones() {
                0 => ByteClass::Ascii,
                1 => ByteClass::Continuation,
                2 => ByteClass::Lead2,
                3 => ByteClass::Lead3,
                4 => ByteClass::Lead4,
                _ => ByteClass::Illegal,
            };
            assert_eq!(classify(byte), expected, "byte {byte:#04x}");
        }
    }

    #[test]
    fn sequence_len_matches_std_for_valid_leads() {
        for ch in ['a', 'é', '€', '😀'] {
            let mut buf = [0u8; 4];
            let first = ch.encode_utf8(&mut buf).as_bytes()[0];
            assert_eq!(classify(first).sequence_len(), ch.len_utf8());
        }
    }
}
