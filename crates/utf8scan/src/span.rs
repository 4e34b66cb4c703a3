use core::fmt;

use bstr::BStr;

/// A run of UTF-8 text, tagged with how its end is found.
///
/// Both flavours describe the same logical content when the bounded slice
/// stops where the terminated one has its NUL; every measurement gives the
/// same answer for either.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    /// Text ending at the first NUL byte, or at the end of the slice if it has
    /// none.
    Terminated(&'a [u8]),
    /// Text ending at the end of the slice; NUL is an ordinary byte.
    Bounded(&'a [u8]),
}

impl<'a> Span<'a> {
    /// A NUL-terminated span.
    #[must_use]
    pub fn terminated(bytes: &'a [u8]) -> Self {
        Span::Terminated(bytes)
    }

    /// A span bounded by the slice end.
    #[must_use]
    pub fn bounded(bytes: &'a [u8]) -> Self {
        Span::Bounded(bytes)
    }

    /// The bytes of the text proper, without terminator or anything after it.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        match *self {
            Span::Terminated(bytes) => {
                let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
                &bytes[..end]
            }
            Span::Bounded(bytes) => bytes,
        }
    }

    /// Length of the text in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the text has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.byte_len() == 0
    }
}

impl<'a> From<&'a [u8]> for Span<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Span::Bounded(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Span<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Span::Bounded(bytes)
    }
}

impl<'a> From<&'a str> for Span<'a> {
    fn from(text: &'a str) -> Self {
        Span::Bounded(text.as_bytes())
    }
}

impl fmt::Debug for Span<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, bytes) = match *self {
            Span::Terminated(bytes) => ("Terminated", bytes),
            Span::Bounded(bytes) => ("Bounded", bytes),
        };
        f.debug_tuple(name).field(&BStr::new(bytes)).finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn terminated_stops_at_nul() {
        let span = Span::terminated(b"ab\0cd");
        assert_eq!(span.as_bytes(), b"ab");
        assert_eq!(span.byte_len(), 2);
        assert_eq!(Span::bounded(b"ab\0cd").byte_len(), 5);
        assert!(Span::terminated(b"\0x").is_empty());
    }

    #[test]
    fn debug_renders_as_text() {
        assert_eq!(format!("{:?}", Span::from("café")), "Bounded(\"café\")");
        assert_eq!(
            format!("{:?}", Span::terminated(b"a\xff")),
            "Terminated(\"a\\xff\")"
        );
    }
}
