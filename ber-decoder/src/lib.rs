//! Schema-driven BER/DER decoder.
//!
//! Given a schema tree (see the `asn1-schema` crate) describing a top-level
//! ASN.1 type and a byte stream believed to hold an encoding of that type,
//! [`Decoder`] walks both in lock-step, annotating matched leaf nodes with
//! their on-wire position and accumulating an image buffer of every TLV's
//! bytes. A [`Decoder::dump`] mode traces the same walk as human-readable
//! text instead of building the annotated tree.
//!
//! Four pieces cooperate: [`header::read_tl`] (the TLV reader), the
//! `asn1_schema` navigator (schema tree walking), [`matcher`] (the per-TLV
//! outcome decision) and [`driver`] (the outer loop and frame stack).
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod driver;
pub mod error;
pub mod header;
pub mod matcher;
pub mod reader;
pub mod state;

#[cfg(feature = "alloc")]
mod decoder;

pub use error::{BerErrorKind, Error, ErrorKind, Result};
pub use header::{read_tl, HeaderBytes, TagInfo};
pub use matcher::{match_tlv, MatchOutcome};
pub use reader::{Reader, SliceReader};
pub use state::{Cursor, Frame};

#[cfg(feature = "std")]
pub use reader::IoReader;

#[cfg(feature = "alloc")]
pub use decoder::{DecodeOutput, Decoder};

#[cfg(test)]
mod tests {
    use super::*;
    use asn1_schema::{Kind, NodeSpec, TagClass, Tree};

    #[test]
    fn read_tl_reports_exact_header_bytes() {
        let bytes = [0x02u8, 0x01, 0x2a];
        let mut r = SliceReader::new(&bytes);
        let ti = read_tl(&mut r).unwrap().unwrap();
        assert_eq!(ti.header.as_slice(), &bytes[..2]);
        assert_eq!(ti.tag, 2);
        assert_eq!(ti.length, 1);
        assert!(!ti.is_constructed);
    }

    #[test]
    fn read_tl_rejects_forbidden_length() {
        let bytes = [0x02u8, 0xff];
        let mut r = SliceReader::new(&bytes);
        let err = read_tl(&mut r).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Ber(BerErrorKind::ForbiddenLength));
    }

    #[test]
    fn read_tl_returns_none_at_clean_eof() {
        let bytes: [u8; 0] = [];
        let mut r = SliceReader::new(&bytes);
        assert!(read_tl(&mut r).unwrap().is_none());
    }

    #[test]
    fn matcher_matches_null_anchor() {
        let tree = Tree::from_spec(NodeSpec::new("n", Kind::Null));
        let mut ds = asn1_schema::DecodeState::new(&tree);
        let mut cursor = Cursor::default();
        let frame = Frame::default();
        let outcome = match_tlv(&tree, &mut ds, &mut cursor, &frame, TagClass::Universal, 5);
        assert_eq!(outcome, MatchOutcome::Match(tree.root()));
    }

    #[test]
    fn matcher_reports_end_of_description_on_empty_cursor_miss() {
        let tree = Tree::from_spec(NodeSpec::new("n", Kind::Null));
        let mut ds = asn1_schema::DecodeState::new(&tree);
        let mut cursor = Cursor::default();
        let frame = Frame::default();
        let outcome = match_tlv(&tree, &mut ds, &mut cursor, &frame, TagClass::Universal, 2);
        assert_eq!(outcome, MatchOutcome::EndOfDescription);
    }
}
