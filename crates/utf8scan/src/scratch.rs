//! Reusable output buffer for short-lived formatted text.
//!
//! Formatting helpers often produce a small string that is printed and then
//! forgotten. [`Scratch`] keeps one growable buffer for that: each call hands
//! out a slice of it, and the borrow checker makes sure the slice is gone
//! before the next call reuses the memory. Each thread (or each formatter)
//! owns its own `Scratch`, so there is no shared slot to race on.

use alloc::vec::Vec;
use core::fmt;

use bstr::BStr;

use crate::{
    align::{AlignOptions, Layout},
    codec::encode,
    escape::EscapeSkipper,
    span::Span,
};

/// A caller-owned buffer that hands out temporary byte slices.
#[derive(Default, Clone)]
pub struct Scratch {
    buf: Vec<u8>,
}

impl Scratch {
    /// Creates an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scratch buffer that can serve `capacity` bytes without
    /// reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes the buffer can serve without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Hands out exactly `len` bytes. Their content is unspecified.
    pub fn borrow(&mut self, len: usize) -> &mut [u8] {
        if len > self.buf.capacity() {
            tracing::trace!(
                requested = len,
                previous = self.buf.capacity(),
                "growing scratch buffer"
            );
        }
        self.buf.clear();
        self.buf.resize(len, 0);
        &mut self.buf
    }

    /// The UTF-8 encoding of `code`, see [`crate::encode`].
    pub fn encode(&mut self, code: u32) -> &[u8] {
        let encoded = encode(code);
        let out = self.borrow(encoded.len());
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// `span` truncated and padded per `opts`, see [`crate::align_into`].
    pub fn align(&mut self, span: Span<'_>, opts: AlignOptions) -> &[u8] {
        let layout = Layout::plain(span, opts);
        let out = self.borrow(layout.total());
        layout.write(span.as_bytes(), out);
        out
    }

    /// Escape-aware [`Scratch::align`], see [`crate::align_escaped_into`].
    pub fn align_escaped(
        &mut self,
        span: Span<'_>,
        opts: AlignOptions,
        escapes: &impl EscapeSkipper,
    ) -> &[u8] {
        let layout = Layout::escaped(span, opts, escapes);
        let out = self.borrow(layout.total());
        layout.write(span.as_bytes(), out);
        out
    }
}

impl fmt::Debug for Scratch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scratch")
            .field("last", &BStr::new(&self.buf))
            .field("capacity", &self.buf.capacity())
            .finish()
    }
}
