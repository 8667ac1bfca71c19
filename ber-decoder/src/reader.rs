//! The reader contract (spec.md §6) plus two reference implementations.
//!
//! Scoped down from `der::Reader` (which exposes slice-peeking, nested
//! sub-readers and EOC handling baked into the trait) to exactly what
//! [`crate::header::read_tl`] needs: short, byte-at-a-time reads from a
//! possibly-blocking source, with an explicit end-of-stream sentinel.

use crate::error::{Error, ErrorKind};

/// A byte source the decoder reads from exactly once, front-to-back.
///
/// `read` may return a short read, including zero bytes, without that being
/// an error (`Ok(Some(0))`): the caller retries. A clean end of stream is
/// `Ok(None)`, returned only at a point where no partial TLV has been
/// started.
pub trait Reader {
    fn read(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Error>;

    /// Monotonically increasing count of bytes actually consumed so far.
    fn tell(&self) -> u64;

    /// True once this reader has latched a non-recoverable I/O failure.
    fn is_error(&self) -> bool;
}

/// Reads from an in-memory byte slice. Never short-reads and never errors;
/// runs out cleanly at the end of the slice.
pub struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        SliceReader { data, pos: 0 }
    }
}

impl Reader for SliceReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Error> {
        if self.pos >= self.data.len() {
            return Ok(None);
        }
        let n = buf.len().min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(Some(n))
    }

    fn tell(&self) -> u64 {
        self.pos as u64
    }

    fn is_error(&self) -> bool {
        false
    }
}

/// Adapts any [`std::io::Read`] into a [`Reader`].
#[cfg(feature = "std")]
pub struct IoReader<R> {
    inner: R,
    pos: u64,
    errored: bool,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> IoReader<R> {
    pub fn new(inner: R) -> Self {
        IoReader {
            inner,
            pos: 0,
            errored: false,
        }
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> Reader for IoReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Error> {
        match self.inner.read(buf) {
            Ok(0) => Ok(None),
            Ok(n) => {
                self.pos += n as u64;
                Ok(Some(n))
            }
            Err(_) => {
                self.errored = true;
                Err(ErrorKind::ReadError.at(Some(self.pos)))
            }
        }
    }

    fn tell(&self) -> u64 {
        self.pos
    }

    fn is_error(&self) -> bool {
        self.errored
    }
}
