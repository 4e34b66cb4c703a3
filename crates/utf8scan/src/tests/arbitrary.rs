use alloc::{boxed::Box, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use crate::codec::encode;

/// Bytes that are mostly UTF-8 with damage mixed in: truncated sequences,
/// stray continuation bytes, illegal bytes, NULs and escape sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MixedBytes(pub Vec<u8>);

const DAMAGE: &[&[u8]] = &[
    b"\x80",
    b"\xbf\xbf",
    b"\xc3",
    b"\xe2\x82",
    b"\xf0\x9f\x98",
    b"\xf8",
    b"\xff",
    b"\0",
    b"\x1b[1;31m",
    b"\x1b]8;;x\x07",
    b"\x1b",
];

impl Arbitrary for MixedBytes {
    fn arbitrary(g: &mut Gen) -> Self {
        let pieces = usize::arbitrary(g) % g.size().max(1);
        let mut out = Vec::new();
        for _ in 0..pieces {
            match u8::arbitrary(g) % 8 {
                0 => out.extend_from_slice(g.choose(DAMAGE).copied().unwrap_or_default()),
                1 => out.push(u8::arbitrary(g)),
                2 => out.extend_from_slice(encode(u32::arbitrary(g) % 0x20_0000).as_bytes()),
                3 | 4 => out.push(b'a' + u8::arbitrary(g) % 26),
                _ => {
                    let c = char::arbitrary(g);
                    out.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes());
                }
            }
        }
        Self(out)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}
