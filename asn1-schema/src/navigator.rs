//! Pure functions over a [`Tree`]: pre-order walking, anchor search, and tag
//! comparison. None of these mutate the tree or any decode state.

use crate::decode_state::DecodeState;
use crate::kind::{Kind, TagClass};
use crate::node::{DecodeFlag, NodeId, StaticFlag};
use crate::tree::Tree;

/// Follow `parent` links until one is found whose `next_sibling` is set,
/// and return that sibling.
///
/// This replaces the source's "walk up through previous-sibling links to
/// the real parent, then take its right sibling" loop: with explicit parent
/// pointers the whole dance is just "go up until someone has a next
/// sibling". Returns `None` once the root (whose parent is `None`) is
/// reached without finding one.
pub fn ascend_and_right(tree: &Tree, node: NodeId) -> Option<NodeId> {
    let mut n = node;
    loop {
        let parent = tree.parent(n)?;
        if let Some(sibling) = tree.next_sibling(parent) {
            return Some(sibling);
        }
        n = parent;
    }
}

/// Climb to `node`'s parent and take its next sibling, stopping after one
/// hop — unlike [`ascend_and_right`], does not keep climbing if the parent
/// itself has no next sibling.
///
/// This is the `CHOICE`-exit disambiguation step: once a `CHOICE`
/// alternative is exhausted, the schema resumes at whatever follows the
/// `CHOICE` itself, never further out. Reusing the multi-hop climb here
/// would let a `CHOICE` nested as the last child of a `SEQUENCE` wrongly
/// match that `SEQUENCE`'s own next sibling instead of reporting no match.
pub fn ascend_and_right_once(tree: &Tree, node: NodeId) -> Option<NodeId> {
    let parent = tree.parent(node)?;
    tree.next_sibling(parent)
}

/// Pre-order "next node" from `node`, bounded by `root`: descend to the
/// first child; else take the next sibling; else ascend-and-right, never
/// stepping above `root`.
pub fn walk_tree(tree: &Tree, root: NodeId, node: NodeId) -> Option<NodeId> {
    if let Some(child) = tree.first_child(node) {
        return Some(child);
    }
    if node == root {
        return None;
    }
    if let Some(sibling) = tree.next_sibling(node) {
        return Some(sibling);
    }
    let mut n = node;
    loop {
        let parent = tree.parent(n)?;
        if parent == root {
            return None;
        }
        if let Some(sibling) = tree.next_sibling(parent) {
            return Some(sibling);
        }
        n = parent;
    }
}

/// Pre-order search from `root` for the first node whose tag comparison
/// against `(class, tag)` is true. Used only when the decode cursor is
/// null, i.e. at the very start of a decode.
pub fn find_anchor(tree: &Tree, root: NodeId, class: TagClass, tag: u32) -> Option<NodeId> {
    let mut node = root;
    loop {
        if cmp_tag(tree, node, class, tag) {
            return Some(node);
        }
        if let Some(child) = tree.first_child(node) {
            node = child;
        } else if node == root {
            return None;
        } else if let Some(sibling) = tree.next_sibling(node) {
            node = sibling;
        } else {
            node = ascend_and_right(tree, node)?;
        }
    }
}

/// Compare a schema node to an incoming TLV's class/tag.
pub fn cmp_tag(tree: &Tree, node: NodeId, class: TagClass, tag: u32) -> bool {
    let n = tree.node(node);
    if n.class != class {
        return false;
    }
    if n.kind == Kind::Tag {
        return matches!(&n.value, crate::node::Value::ULong(v) if *v as u32 == tag);
    }
    if n.kind.universal_tag() == Some(tag) {
        return true;
    }
    if class == TagClass::Universal {
        if n.kind == Kind::SequenceOf && Some(tag) == Kind::Sequence.universal_tag() {
            return true;
        }
        if n.kind == Kind::SetOf && Some(tag) == Kind::Set.universal_tag() {
            return true;
        }
        if n.kind == Kind::Any && Kind::from_universal_tag(tag).map(Kind::is_primitive) == Some(true)
        {
            return true;
        }
    }
    false
}

/// Clear `skip_this` across `node`'s entire subtree (`node` included).
///
/// Used by the matcher when reiterating a `SEQUENCE OF`/`SET OF` element so
/// that a `CHOICE` nested inside the repeated element gets a clean set of
/// alternatives on every repetition — see DESIGN.md, Open Question 2.
pub fn clear_skip_this_subtree(tree: &Tree, ds: &mut DecodeState, node: NodeId) {
    let mut cur = node;
    loop {
        ds.clear(cur, DecodeFlag::SkipThis);
        match walk_tree(tree, node, cur) {
            Some(next) => cur = next,
            None => break,
        }
    }
}

/// Whether `node` carries the static `InChoice` flag (a `CHOICE`
/// alternative).
pub fn is_in_choice(tree: &Tree, node: NodeId) -> bool {
    tree.node(node).flags.contains(StaticFlag::InChoice)
}

/// Whether `node` carries the static `InArray` flag (a `SEQUENCE
/// OF`/`SET OF` element).
pub fn is_in_array(tree: &Tree, node: NodeId) -> bool {
    tree.node(node).flags.contains(StaticFlag::InArray)
}
