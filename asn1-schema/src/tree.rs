//! The schema tree arena.

use crate::node::{Node, NodeId};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// An ASN.1 schema tree, addressed by [`NodeId`] rather than pointers.
///
/// Replaces the source's single `left` link (meaning either "previous
/// sibling" or "parent", disambiguated by `x.left.right == x`) with explicit
/// `parent`/`prev_sibling`/`next_sibling`/`first_child` fields on each
/// [`Node`], per the Design Notes. `Tree` itself never changes after
/// construction — it is the read-only half of decoder state; see
/// [`crate::DecodeState`] for the per-decode mutable half.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    pub(crate) fn new(nodes: Vec<Node>, root: NodeId) -> Self {
        Tree { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev_sibling
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_sibling
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }
}
