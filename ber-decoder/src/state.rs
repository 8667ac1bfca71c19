//! Decoder state shared between the matcher and the driver (spec.md §3).

use asn1_schema::NodeId;

/// One open constructed TLV context (spec.md's "frame").
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Frame {
    /// Declared length in bytes of the value, meaningless when `ndef_length`.
    pub length: u64,
    /// True when this context is indefinite-length.
    pub ndef_length: bool,
    /// Bytes of this frame's value consumed so far (headers plus children).
    pub nread: u64,
}

impl Default for Frame {
    /// The ever-present initial frame: unbounded, nothing read yet.
    fn default() -> Self {
        Frame {
            length: 0,
            ndef_length: true,
            nread: 0,
        }
    }
}

/// The schema cursor and its auxiliary bits.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Cursor {
    pub node: Option<NodeId>,
    /// Re-test the current cursor position without re-running advancement.
    ///
    /// Mirrors the source's `ds->cur.again`, which is read in exactly one
    /// place but never written anywhere in `ber-decoder.c` — the branch that
    /// consumes it is therefore dead in the source too. Kept for data-model
    /// completeness and because `match_tlv` still honors it if some future
    /// caller sets it; see [`Cursor::in_seq_of`] for the analogous case.
    pub again: bool,
    /// The previous match consumed a `TAG` pseudo-node; the next inner TLV
    /// belongs to the tagged element.
    pub next_tag: bool,
    /// At least one frame was popped since the previous match.
    pub went_up: bool,
    /// Cursor is inside a repeating container.
    ///
    /// Mirrors the source's `ds->cur.in_seq_of`, which that implementation
    /// only ever clears and never sets (presumably consumed by the
    /// ASN.1-module side of the original library, not `ber-decoder.c`
    /// itself). Kept for data-model completeness; inert here too.
    pub in_seq_of: bool,
}
