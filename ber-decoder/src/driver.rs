//! The driver (spec.md §4.4): the outer loop that turns a stream of TLV
//! headers into matched-or-bypassed schema nodes, tracking the frame stack.

use asn1_schema::{DecodeState, NodeId, TagClass, Tree};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::error::{BerErrorKind, Error, ErrorKind};
use crate::header::TagInfo;
use crate::matcher::{match_tlv, MatchOutcome};
use crate::state::{Cursor, Frame};

/// Bound on nested constructed contexts. 100 is generous for real-world
/// CMS/X.509 while still catching adversarial nesting deterministically.
const MAX_STACK_DEPTH: usize = 100;

/// Frame stack, schema cursor, and the two decode-wide flags (`bypass`,
/// `non_der`) the driver maintains across the whole stream.
pub struct Driver {
    cursor: Cursor,
    frame: Frame,
    /// Each entry pairs an enclosing `Frame` with the schema cursor that was
    /// current when it was pushed, mirroring the source's
    /// `decoder_state_item_s` bundling both into one struct: popping a frame
    /// must restore the cursor to where it stood before the matching
    /// constructed element was descended into, not just the byte counters.
    stack: Vec<(Frame, Option<NodeId>)>,
    bypass: bool,
    non_der: bool,
    defaulted: Vec<NodeId>,
}

impl Driver {
    pub fn new() -> Self {
        Driver {
            cursor: Cursor::default(),
            frame: Frame::default(),
            stack: Vec::new(),
            bypass: false,
            non_der: false,
            defaulted: Vec::new(),
        }
    }

    pub fn non_der(&self) -> bool {
        self.non_der
    }

    pub fn is_bypass(&self) -> bool {
        self.bypass
    }

    /// Depth of currently open constructed contexts, used by `dump` for
    /// indentation.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Nodes that matched via `UseDefault` rather than a TLV on the wire, in
    /// the order they were assigned.
    pub fn defaulted(&self) -> &[NodeId] {
        &self.defaulted
    }

    pub fn into_defaulted(self) -> Vec<NodeId> {
        self.defaulted
    }

    /// Process one TLV header: run the matcher (looping through `Skip`s and
    /// `UseDefault`s) unless already in bypass, then account the header
    /// (and, for primitive TLVs, the value) against the frame stack.
    ///
    /// Returns the matched node, or `None` if the TLV was consumed unmatched
    /// (bypass, or this call is what enters it).
    pub fn step(
        &mut self,
        tree: &Tree,
        ds: &mut DecodeState,
        ti: &TagInfo,
    ) -> Result<Option<NodeId>, Error> {
        let matched = if self.bypass {
            None
        } else {
            loop {
                match match_tlv(tree, ds, &mut self.cursor, &self.frame, ti.class, ti.tag) {
                    MatchOutcome::Match(node) => break Some(node),
                    MatchOutcome::UseDefault(node) => {
                        self.defaulted.push(node);
                    }
                    MatchOutcome::Skip => {}
                    MatchOutcome::Mismatch | MatchOutcome::EndOfDescription => {
                        self.bypass = true;
                        break None;
                    }
                }
            }
        };

        self.account_frame(ti)?;
        Ok(matched)
    }

    /// Update `nread` for the header (and, for primitives, the value) just
    /// consumed; pop any frames this closes out; push a new one if the TLV
    /// was constructed.
    ///
    /// An indefinite-length frame only closes on its matching end-of-contents
    /// TLV (universal tag 0, per the §4.1 kludge); a definite-length frame
    /// closes as soon as its `nread` reaches `length`, which may cascade
    /// into popping several enclosing frames that complete at the same byte.
    fn account_frame(&mut self, ti: &TagInfo) -> Result<(), Error> {
        self.frame.nread += ti.header.len() as u64;
        if !ti.is_constructed {
            self.frame.nread += ti.length;
        }
        self.cursor.went_up = false;

        let is_eoc = matches!(ti.class, TagClass::Universal) && ti.tag == 0 && !ti.is_constructed;
        let mut eoc_available = is_eoc;

        loop {
            let should_pop = if self.frame.ndef_length {
                let pop = eoc_available && !self.stack.is_empty();
                eoc_available = false;
                pop
            } else {
                if self.frame.nread > self.frame.length {
                    // Over-length (Open Question 1): clamp and flag rather
                    // than fail outright, matching what real-world BER
                    // producers get away with.
                    self.non_der = true;
                    self.frame.nread = self.frame.length;
                }
                self.frame.nread >= self.frame.length
            };
            if !should_pop {
                break;
            }
            let (mut enclosing, node) = match self.stack.pop() {
                Some(pair) => pair,
                None => break,
            };
            enclosing.nread += self.frame.nread;
            self.frame = enclosing;
            self.cursor.node = node;
            self.cursor.went_up = true;
        }

        if ti.is_constructed {
            if self.stack.len() >= MAX_STACK_DEPTH {
                return Err(ErrorKind::Ber(BerErrorKind::StackOverflow).into());
            }
            self.stack.push((self.frame, self.cursor.node));
            self.frame = Frame {
                length: ti.length,
                ndef_length: ti.ndef,
                nread: 0,
            };
        }
        Ok(())
    }
}

impl Default for Driver {
    fn default() -> Self {
        Driver::new()
    }
}
