//! The TLV reader (spec.md §4.1): `read_tl` and the [`TagInfo`] it produces.

use crate::error::{BerErrorKind, Error, ErrorKind};
use crate::reader::Reader;
use asn1_schema::TagClass;

/// Fixed cap on header bytes, matching the source's `struct tag_info.buf[10]`.
const MAX_HEADER_LEN: usize = 10;

/// The exact bytes consumed for one TLV header, up to [`MAX_HEADER_LEN`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct HeaderBytes {
    buf: [u8; MAX_HEADER_LEN],
    len: u8,
}

impl HeaderBytes {
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// One decoded BER tag-length header.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TagInfo {
    pub class: TagClass,
    pub is_constructed: bool,
    pub tag: u32,
    /// Declared value length; `0` (forced) when `ndef` is set, per the
    /// universal-zero kludge below.
    pub length: u64,
    /// Indefinite-length marker (length octet was `0x80`).
    pub ndef: bool,
    pub header: HeaderBytes,
}

fn read_byte<R: Reader>(reader: &mut R) -> Result<Option<u8>, Error> {
    loop {
        let mut byte = [0u8; 1];
        match reader.read(&mut byte)? {
            None => return Ok(None),
            Some(0) => continue,
            Some(_) => return Ok(Some(byte[0])),
        }
    }
}

fn push(buf: &mut [u8; MAX_HEADER_LEN], len: &mut usize, byte: u8, pos: u64) -> Result<(), Error> {
    if *len >= MAX_HEADER_LEN {
        return Err(ErrorKind::Ber(BerErrorKind::HeaderTooLarge).at(Some(pos)));
    }
    buf[*len] = byte;
    *len += 1;
    Ok(())
}

/// Read one BER identifier-plus-length header.
///
/// Returns `Ok(None)` only for a clean end of stream encountered before any
/// header byte was read. Once at least one byte has been consumed, a
/// further end of stream is `PrematureEof`.
pub fn read_tl<R: Reader>(reader: &mut R) -> Result<Option<TagInfo>, Error> {
    let start = reader.tell();
    let mut buf = [0u8; MAX_HEADER_LEN];
    let mut len = 0usize;

    let first = match read_byte(reader)? {
        None => return Ok(None),
        Some(b) => b,
    };
    push(&mut buf, &mut len, first, start)?;

    let class = TagClass::from_bits((first & 0xc0) >> 6);
    let is_constructed = first & 0x20 != 0;
    let mut tag = (first & 0x1f) as u32;

    if tag == 0x1f {
        tag = 0;
        loop {
            let byte = read_byte(reader)?
                .ok_or_else(|| ErrorKind::PrematureEof.at(Some(reader.tell())))?;
            push(&mut buf, &mut len, byte, reader.tell())?;
            if tag & (0x7fu32 << 25) != 0 {
                return Err(ErrorKind::Ber(BerErrorKind::TagOverflow).at(Some(reader.tell())));
            }
            tag = (tag << 7) | (byte & 0x7f) as u32;
            if byte & 0x80 == 0 {
                break;
            }
        }
    }

    let length_byte =
        read_byte(reader)?.ok_or_else(|| ErrorKind::PrematureEof.at(Some(reader.tell())))?;
    push(&mut buf, &mut len, length_byte, reader.tell())?;

    let mut length: u64 = 0;
    let mut ndef = false;
    if length_byte & 0x80 == 0 {
        length = length_byte as u64;
    } else if length_byte == 0x80 {
        ndef = true;
    } else if length_byte == 0xff {
        return Err(ErrorKind::Ber(BerErrorKind::ForbiddenLength).at(Some(reader.tell())));
    } else {
        let count = (length_byte & 0x7f) as usize;
        for _ in 0..count {
            let byte = read_byte(reader)?
                .ok_or_else(|| ErrorKind::PrematureEof.at(Some(reader.tell())))?;
            push(&mut buf, &mut len, byte, reader.tell())?;
            if length & (0xffu64 << 56) != 0 {
                return Err(ErrorKind::Ber(BerErrorKind::LengthOverflow).at(Some(reader.tell())));
            }
            length = (length << 8) | byte as u64;
        }
    }

    // Kludge (spec.md §4.1): UNIVERSAL tag 0 always has length 0, covering
    // end-of-contents and broken universal-zero encodings alike.
    if matches!(class, TagClass::Universal) && tag == 0 {
        length = 0;
    }

    Ok(Some(TagInfo {
        class,
        is_constructed,
        tag,
        length,
        ndef,
        header: HeaderBytes { buf, len: len as u8 },
    }))
}
