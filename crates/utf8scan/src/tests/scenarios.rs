use alloc::vec::Vec;

use crate::{
    AlignOptions, Scratch, Span, align,
    codec::{Advance, ERROR_FLAG, decode, encode, to_tagged},
    decompose::lookup,
    error::Malformed,
    measure::length,
    nav::next,
};

#[test]
fn encodes_ascii_and_latin() {
    assert_eq!(encode(0x41).as_bytes(), b"A");
    assert_eq!(encode(0xe9).as_bytes(), [0xc3, 0xa9]);
}

#[test]
fn decodes_e_acute() {
    let mut pos = 0;
    assert_eq!(decode(&[0xc3, 0xa9], &mut pos, Advance::OnSuccess), Ok(0xe9));
    assert_eq!(pos, 2);
}

#[test]
fn broken_continuation_is_flagged_and_skipped_alone() {
    let bytes = [0xc3, 0x28];

    let mut pos = 0;
    let decoded = decode(&bytes, &mut pos, Advance::OnSuccess);
    assert_eq!(decoded, Err(Malformed { partial: 0x03 }));
    assert_eq!(to_tagged(decoded), ERROR_FLAG | 0x03);
    assert_eq!(pos, 0);

    assert_eq!(decode(&bytes, &mut pos, Advance::Always), decoded);
    assert_eq!(pos, 1);

    assert_eq!(next(&bytes, 0), 1);
    assert_eq!(decode(&bytes, &mut pos, Advance::OnSuccess), Ok(0x28));
}

#[test]
fn e_acute_decomposes_to_e_and_acute() {
    let d = lookup(0xe9).unwrap();
    assert_eq!((d.base, d.mark), (0x65, 0x301));
}

#[test]
fn cafe_fills_six_columns_with_seven_bytes() {
    let out: Vec<u8> = align(Span::from("café"), AlignOptions::left(6));
    assert_eq!(out, b"caf\xc3\xa9  ");
    assert_eq!(length(Span::from(&out[..])), 6);

    let mut scratch = Scratch::new();
    assert_eq!(scratch.align(Span::from("café"), AlignOptions::right(6)), "  café".as_bytes());
}
