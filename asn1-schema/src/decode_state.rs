//! Per-decode mutable state kept off the shared [`Tree`].
//!
//! The source keeps `tag_seen`/`skip_this` on the schema node itself and
//! resets them with a tree walk (`clear_help_flags`) at the start of every
//! decode. Per the Design Notes this implementation moves both bits into a
//! side table indexed by [`NodeId`], allocated fresh for each decode: a
//! `Tree` can then be shared (even across threads) by decoders that never
//! touch each other's helper flags, and "reset at the start of a decode"
//! becomes "allocate a new `DecodeState`" rather than a traversal.

use crate::node::{DecodeFlag, DecodeFlags, NodeId};
use crate::tree::Tree;

#[cfg(feature = "alloc")]
use alloc::vec;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Fresh, all-clear helper flags for one decode run.
#[derive(Clone, Debug)]
pub struct DecodeState {
    flags: Vec<DecodeFlags>,
}

impl DecodeState {
    /// Allocate helper-flag storage sized to `tree`, all bits clear.
    pub fn new(tree: &Tree) -> Self {
        DecodeState {
            flags: vec![DecodeFlags::default(); tree.len()],
        }
    }

    pub fn is_set(&self, node: NodeId, flag: DecodeFlag) -> bool {
        self.flags[node.index()].contains(flag)
    }

    pub fn set(&mut self, node: NodeId, flag: DecodeFlag) {
        self.flags[node.index()] |= flag;
    }

    pub fn clear(&mut self, node: NodeId, flag: DecodeFlag) {
        self.flags[node.index()] -= flag;
    }
}
