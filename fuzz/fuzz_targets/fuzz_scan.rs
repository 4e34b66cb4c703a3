#![no_main]
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use utf8scan::checks::check_all;

const HEADER: usize = 1; // alignment width

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

/// Fragments that exercise the resynchronisation paths.
static DAMAGE: &[&[u8]] = &[
    b"\x80",
    b"\xbf\xbf\xbf",
    b"\xc3",
    b"\xe2\x82",
    b"\xf0\x9f\x98",
    b"\xf8",
    b"\xff",
    b"\0",
    b"\x1b[38;5;208m",
    b"\x1b]8;;https://example.com\x1b\\",
    b"\x1b(B",
    b"\x1b",
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// One piece of input: either a scalar or a known-bad fragment.
#[derive(Debug, Arbitrary)]
enum Piece {
    Scalar(char),
    Wide(u32),
    Damage(u8),
}

impl Piece {
    fn write(&self, out: &mut Vec<u8>) {
        match *self {
            Piece::Scalar(c) => out.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes()),
            Piece::Wide(code) => out.extend_from_slice(utf8scan::encode(code).as_bytes()),
            Piece::Damage(i) => out.extend_from_slice(DAMAGE[usize::from(i) % DAMAGE.len()]),
        }
    }
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if max_size > HEADER && (size < HEADER || seed.is_multiple_of(10)) {
        data[0] = with_rng(|rng| rng.next_u32() as u8);
        let raw: Vec<u8> = with_rng(|rng| {
            let n = rng.random_range(0..=max_size.min(256));
            (0..n).map(|_| rng.random::<u8>()).collect()
        });
        let mut out = Vec::new();
        let mut u = Unstructured::new(&raw);
        while let Ok(piece) = Piece::arbitrary(&mut u) {
            piece.write(&mut out);
            if u.is_empty() {
                break;
            }
        }
        let len = out.len().min(max_size - HEADER);
        data[HEADER..HEADER + len].copy_from_slice(&out[..len]);
        HEADER + len
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

fuzz_target!(|data: &[u8]| {
    if let Some((&width, bytes)) = data.split_first() {
        check_all(bytes, width);
    }
});
