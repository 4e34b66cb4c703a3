use thiserror::Error;

/// A UTF-8 sequence that could not be decoded completely.
///
/// `partial` holds whatever payload bits were accumulated before the
/// sequence broke off. It is never garbage: a renderer can still show it, and
/// a scanner can keep going from the position the decoder reported.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("malformed UTF-8 sequence (partial scalar {partial:#x})")]
pub struct Malformed {
    /// Best-effort partial decode of the broken sequence.
    pub partial: u32,
}

impl Malformed {
    pub(crate) const fn new(partial: u32) -> Self {
        Self { partial }
    }
}

/// Errors raised when turning a scalar into UTF-8.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The scalar needs more than the 21 bits a four-byte sequence holds.
    #[error("scalar {0:#x} has no UTF-8 encoding")]
    OutOfRange(u32),
}
