//! UTF-8 scanning for byte strings that may not be valid UTF-8.
//!
//! The crate works on `&[u8]` plus byte offsets instead of `&str`: decoding,
//! boundary stepping and measurement all tolerate malformed input and keep
//! making progress through it. On top of that sit scalar-counting alignment
//! for fixed-width output, optionally ignoring terminal escape sequences, and
//! a single-level canonical decomposition table.
//!
//! ```rust
//! use utf8scan::{AlignOptions, Span, align, decode, nav, Advance};
//!
//! let text = "café".as_bytes();
//! assert_eq!(nav::next(text, 3), 5);
//! assert_eq!(nav::prev(text, 5), 3);
//!
//! let mut pos = 3;
//! assert_eq!(decode(text, &mut pos, Advance::OnSuccess), Ok(0xe9));
//! assert_eq!(pos, 5);
//!
//! assert_eq!(align(Span::from(text), AlignOptions::right(6)), "  café".as_bytes());
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod class;
pub mod codec;
pub mod escape;
pub mod nav;

mod align;
mod decompose;
mod error;
mod measure;
mod scratch;
mod span;

#[cfg(any(test, feature = "fuzzing"))]
pub mod checks;

#[cfg(test)]
mod tests;

pub use align::{AlignOptions, align, align_escaped_into, align_into};
pub use class::{ByteClass, classify};
pub use codec::{
    Advance, Decoded, Encoded, Scalars, decode, decode_bounded, decode_fast, decode_lenient,
    encode, encode_into, from_tagged, scalars, to_tagged, try_encode,
};
pub use decompose::{Decomposition, lookup, table as decomposition_table};
pub use error::{EncodeError, Malformed};
pub use escape::{AnsiEscapes, EscapeSkipper, NoEscapes};
pub use measure::{length, length_escaped, printable_field_width};
pub use scratch::Scratch;
pub use span::Span;
