//! Property-based coverage for the TLV reader: header round-trip (Testable
//! Property 1) and the two numeric-overflow error paths.

use ber_decoder::{read_tl, BerErrorKind, ErrorKind, SliceReader};
use proptest::prelude::*;

/// Build a short-form definite-length header for a low tag number, which
/// `read_tl` must always accept and echo back byte-for-byte.
fn short_form_header(class_bits: u8, constructed: bool, tag: u8, len: u8) -> Vec<u8> {
    let mut first = (class_bits & 0b11) << 6;
    if constructed {
        first |= 0x20;
    }
    first |= tag & 0x1f;
    vec![first, len & 0x7f]
}

proptest! {
    #[test]
    fn header_round_trip(
        class_bits in 0u8..4,
        constructed in any::<bool>(),
        tag in 0u8..31,
        len in 0u8..127,
    ) {
        let header = short_form_header(class_bits, constructed, tag, len);
        let mut bytes = header.clone();
        bytes.extend(core::iter::repeat(0u8).take(len as usize));

        let mut reader = SliceReader::new(&bytes);
        let ti = read_tl(&mut reader).unwrap().unwrap();
        prop_assert_eq!(ti.header.as_slice(), header.as_slice());
        prop_assert_eq!(ti.tag as u8, tag);
        prop_assert_eq!(ti.is_constructed, constructed);
        prop_assert_eq!(ti.length, len as u64);
    }

    #[test]
    fn long_form_length_matches_declared_value(len in 128u32..65536) {
        let len_bytes = len.to_be_bytes();
        let significant = &len_bytes[len_bytes.iter().position(|&b| b != 0).unwrap_or(3)..];
        let mut bytes = vec![0x04, 0x80 | significant.len() as u8];
        bytes.extend_from_slice(significant);
        bytes.extend(core::iter::repeat(0u8).take(len as usize));

        let mut reader = SliceReader::new(&bytes);
        let ti = read_tl(&mut reader).unwrap().unwrap();
        prop_assert_eq!(ti.length, len as u64);
        prop_assert!(!ti.ndef);
    }

    #[test]
    fn high_tag_number_form_round_trips(tag in 31u32..(1 << 20)) {
        let mut septets = Vec::new();
        let mut t = tag;
        septets.push((t & 0x7f) as u8);
        t >>= 7;
        while t > 0 {
            septets.push((t & 0x7f) as u8 | 0x80);
            t >>= 7;
        }
        septets.reverse();

        let mut bytes = vec![0x1f];
        bytes.extend_from_slice(&septets);
        bytes.push(0x00);

        let mut reader = SliceReader::new(&bytes);
        let ti = read_tl(&mut reader).unwrap().unwrap();
        prop_assert_eq!(ti.tag, tag);
    }
}

#[test]
fn length_octet_0xff_is_forbidden() {
    let bytes = [0x04u8, 0xff];
    let mut reader = SliceReader::new(&bytes);
    let err = read_tl(&mut reader).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Ber(BerErrorKind::ForbiddenLength));
}

#[test]
fn header_longer_than_ten_bytes_is_rejected() {
    // High-tag-number form with far too many continuation bytes.
    let mut bytes = vec![0x1f];
    bytes.extend(core::iter::repeat(0x80u8).take(15));
    bytes.push(0x00);
    bytes.push(0x00); // length

    let mut reader = SliceReader::new(&bytes);
    let err = read_tl(&mut reader).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Ber(BerErrorKind::HeaderTooLarge));
}
