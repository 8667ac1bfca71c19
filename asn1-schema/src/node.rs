//! Schema node and value types.

use crate::kind::{Kind, TagClass};
use flagset::{flags, FlagSet};

#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

flags! {
    /// Static, tree-shape flags set once when the schema is built.
    ///
    /// These never change after `Tree::from_spec` returns — mutable,
    /// per-decode bits (`tag_seen`, `skip_this`) live in [`crate::DecodeState`]
    /// instead, see DESIGN.md.
    pub enum StaticFlag: u16 {
        Explicit,
        Implicit,
        HasTag,
        IsOptional,
        HasDefault,
        InChoice,
        InArray,
    }

    /// Per-decode helper bits, stored out-of-line in a [`crate::DecodeState`]
    /// keyed by [`crate::NodeId`].
    pub enum DecodeFlag: u8 {
        /// Set once a `TAG` pseudo-node's wrapped element has been seen.
        /// Cleared at the start of every decode. Not read by the matcher in
        /// this implementation (nor by the source's `ber-decoder.c`, which
        /// only ever clears it) — kept for data-model completeness, see
        /// DESIGN.md.
        TagSeen,
        /// Set on a `CHOICE` alternative once it has been ruled out for the
        /// current element instance.
        SkipThis,
    }
}

pub type StaticFlags = FlagSet<StaticFlag>;
pub type DecodeFlags = FlagSet<DecodeFlag>;

/// A schema node's literal value, when it carries one (`TAG`, `DEFAULT`,
/// `CONSTANT` nodes, mostly).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Str(String),
    Bytes(Vec<u8>),
    Long(i64),
    ULong(u64),
}

impl Default for Value {
    fn default() -> Self {
        Value::None
    }
}

/// Where a matched leaf node's bytes live in the decoder's image buffer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Annotation {
    pub offset: u64,
    pub header_length: u32,
    pub value_length: u64,
}

/// Opaque index into a [`crate::Tree`]'s arena.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single schema tree node.
#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub kind: Kind,
    pub class: TagClass,
    pub flags: StaticFlags,
    pub value: Value,
    pub annotation: Option<Annotation>,

    pub(crate) parent: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
}
