use alloc::string::String;

use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;

use super::{arbitrary::MixedBytes, quickcheck_tests};
use crate::{
    checks::{check_all, check_valid_text, forward_boundaries},
    codec::{
        Advance, MAX_UTF8_4, decode, decode_bounded, decode_lenient, encode, encoded_len,
        from_tagged, scalars, to_tagged,
    },
    measure::length,
    span::Span,
};

#[test]
fn encode_decode_roundtrip_every_code() {
    #[cfg(not(any(miri, feature = "test-fast")))]
    let stride = 1;
    #[cfg(any(miri, feature = "test-fast"))]
    let stride = 4099;

    for code in (0..=MAX_UTF8_4).step_by(stride) {
        let encoded = encode(code);
        let bytes = encoded.as_bytes();
        assert_eq!(bytes.len(), encoded_len(code));

        let mut pos = 0;
        assert_eq!(decode_bounded(bytes, &mut pos, bytes.len(), Advance::OnSuccess), Ok(code));
        assert_eq!(pos, bytes.len(), "{code:#x}");

        let mut pos = 0;
        assert_eq!(decode(bytes, &mut pos, Advance::Always), Ok(code));
        assert_eq!(decode_lenient(bytes, 0), code);
    }
}

#[test]
fn invariants_hold_on_damaged_text() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: MixedBytes, width: u8) -> bool {
        check_all(&bytes.0, width);
        true
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(MixedBytes, u8) -> bool);
}

#[test]
fn invariants_hold_on_raw_bytes() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: alloc::vec::Vec<u8>, width: u8) -> bool {
        check_all(&bytes, width);
        true
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(alloc::vec::Vec<u8>, u8) -> bool);
}

#[test]
fn length_adds_up_at_boundaries() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: MixedBytes, pick: usize) -> bool {
        let bytes = &bytes.0;
        let boundaries = forward_boundaries(bytes);
        let split = boundaries.get(pick % (boundaries.len() + 1)).copied().unwrap_or(bytes.len());
        let (head, tail) = bytes.split_at(split);
        length(Span::Bounded(head)) + length(Span::Bounded(tail)) == length(Span::Bounded(bytes))
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(MixedBytes, usize) -> bool);
}

#[test]
fn tagged_form_roundtrips() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: MixedBytes) -> bool {
        scalars(&bytes.0).all(|decoded| from_tagged(to_tagged(decoded)) == decoded)
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(MixedBytes) -> bool);
}

#[test]
fn lenient_agrees_with_strict_on_complete_sequences() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: MixedBytes) -> bool {
        let bytes = &bytes.0;
        (0..bytes.len()).all(|start| {
            let mut pos = start;
            match decode_bounded(bytes, &mut pos, bytes.len(), Advance::OnSuccess) {
                Ok(code) => decode_lenient(bytes, start) == code,
                Err(_) => true,
            }
        })
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(MixedBytes) -> bool);
}

#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn well_formed_text_matches_str(text: String) -> bool {
    check_valid_text(&text);
    true
}
