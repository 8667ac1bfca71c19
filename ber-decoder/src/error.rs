//! Hand-rolled error type, in the style of `der::Error`/`der::ErrorKind`:
//! no `thiserror`/`displaydoc`, since this crate (like `der`, `cms`,
//! `spki`, `const-oid`) is meant to stay usable in `no_std` + `alloc`
//! contexts.

use core::fmt;

/// The taxonomy of things that can go wrong, independent of where in the
/// stream they happened. See [`Error::at`] for attaching a byte position.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Null or out-of-range argument to a public operation.
    InvalidValue,
    /// A one-shot setter (`set_module`, `set_reader`) was called twice.
    Conflict,
    /// The reader reported an I/O failure.
    ReadError,
    /// The stream ended in the middle of a TLV header.
    PrematureEof,
    /// A malformed BER encoding. See [`BerErrorKind`] for which.
    Ber(BerErrorKind),
    /// Allocation failure.
    OutOfCore,
    /// A boundary case this decoder explicitly refuses to handle.
    NotImplemented,
    /// An invariant violation internal to the decoder.
    Bug,
}

/// The specific malformed-encoding conditions grouped under
/// `ErrorKind::Ber` (spec.md's `BERError`).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BerErrorKind {
    /// Length octet `0xFF`.
    ForbiddenLength,
    /// A TLV header exceeded the fixed 10-byte cap.
    HeaderTooLarge,
    /// High-tag-number form overflowed the tag's numeric type.
    TagOverflow,
    /// A multi-byte length overflowed its numeric type.
    LengthOverflow,
    /// The image buffer could not grow to hold another TLV.
    ImageBufferOverflow,
    /// The frame stack exceeded its bounded depth.
    StackOverflow,
}

/// An error, optionally annotated with the byte offset (as reported by the
/// [`crate::Reader`]) at which it was detected.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Error {
    pub kind: ErrorKind,
    pub position: Option<u64>,
}

impl ErrorKind {
    /// Attach a byte position to this error kind, producing an [`Error`].
    pub fn at(self, position: Option<u64>) -> Error {
        Error {
            kind: self,
            position,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error {
            kind,
            position: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(f, "{:?} at offset {}", self.kind, pos),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
