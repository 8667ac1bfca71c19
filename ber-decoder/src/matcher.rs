//! The matcher (spec.md §4.3): decides what a schema cursor does with one
//! incoming TLV header.

use asn1_schema::{
    ascend_and_right, ascend_and_right_once, clear_skip_this_subtree, cmp_tag, find_anchor,
    is_in_array, is_in_choice, DecodeFlag, DecodeState, Kind, NodeId, StaticFlag, TagClass, Tree,
};

use crate::state::{Cursor, Frame};

/// The five outcomes the matcher can report for one TLV.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MatchOutcome {
    Mismatch,
    EndOfDescription,
    /// Advance schema, do not consume the TLV; driver re-enters the matcher.
    Skip,
    /// Like `Skip`, but the node records a default value for the field.
    UseDefault(NodeId),
    Match(NodeId),
}

/// Advance `cursor` against one TLV (`class`, `tag`) and report the outcome.
///
/// `frame` is the currently open container (the one whose bytes the
/// incoming TLV would be counted against) — needed only to decide whether a
/// `SEQUENCE OF`/`SET OF` repetition should continue.
pub fn match_tlv(
    tree: &Tree,
    ds: &mut DecodeState,
    cursor: &mut Cursor,
    frame: &Frame,
    class: TagClass,
    tag: u32,
) -> MatchOutcome {
    let root = tree.root();

    let advanced = match cursor.node {
        None => find_anchor(tree, root, class, tag),
        Some(node) if cursor.again => {
            cursor.again = false;
            Some(node)
        }
        Some(node) => advance(tree, ds, cursor, frame, node),
    };

    let node = match advanced {
        Some(n) => n,
        None => {
            return if cursor.node.is_none() {
                MatchOutcome::EndOfDescription
            } else {
                MatchOutcome::Mismatch
            };
        }
    };

    cursor.node = Some(node);
    cursor.went_up = false;
    cursor.next_tag = false;

    if ds.is_set(node, DecodeFlag::SkipThis) {
        return MatchOutcome::Skip;
    }
    let kind = tree.node(node).kind;
    if matches!(kind, Kind::Size | Kind::Default) {
        return MatchOutcome::Skip;
    }
    if cmp_tag(tree, node, class, tag) {
        return MatchOutcome::Match(node);
    }
    if kind == Kind::Choice {
        if let Some(chosen) = resolve_choice(tree, ds, node, class, tag) {
            return MatchOutcome::Match(chosen);
        }
        // No alternative matched: every child is now marked skip_this.
        // Fall through using `node` (the CHOICE node itself).
    }
    if is_in_choice(tree, node) {
        return MatchOutcome::Skip;
    }
    if tree.node(node).flags.contains(StaticFlag::IsOptional) {
        if kind == Kind::Tag {
            cursor.next_tag = true;
        }
        return MatchOutcome::Skip;
    }
    if tree.node(node).flags.contains(StaticFlag::HasDefault) {
        if kind == Kind::Tag {
            cursor.next_tag = true;
        }
        return MatchOutcome::UseDefault(node);
    }
    MatchOutcome::Mismatch
}

/// Test each not-yet-`skip_this` alternative of a `CHOICE` against the
/// incoming tag. On a hit, mark every remaining sibling `skip_this` (a
/// `CHOICE` is consumed once) and return the chosen alternative. On a full
/// miss, mark every alternative `skip_this` and return `None`.
fn resolve_choice(
    tree: &Tree,
    ds: &mut DecodeState,
    choice: NodeId,
    class: TagClass,
    tag: u32,
) -> Option<NodeId> {
    let mut alt = tree.first_child(choice);
    while let Some(a) = alt {
        if !ds.is_set(a, DecodeFlag::SkipThis) && cmp_tag(tree, a, class, tag) {
            let mut rest = tree.next_sibling(a);
            while let Some(r) = rest {
                ds.set(r, DecodeFlag::SkipThis);
                rest = tree.next_sibling(r);
            }
            return Some(a);
        }
        ds.set(a, DecodeFlag::SkipThis);
        alt = tree.next_sibling(a);
    }
    None
}

/// Cursor advancement rules (spec.md §4.3), computed before comparing the
/// advanced node against the incoming tag.
fn advance(
    tree: &Tree,
    ds: &mut DecodeState,
    cursor: &mut Cursor,
    frame: &Frame,
    node: NodeId,
) -> Option<NodeId> {
    let kind = tree.node(node).kind;

    if kind.is_primitive() || matches!(kind, Kind::Any | Kind::Size | Kind::Default) {
        if let Some(sibling) = tree.next_sibling(node) {
            return Some(sibling);
        }
        // A primitive element with no next sibling but the sole,
        // shared repeated-element node of a SEQUENCE OF/SET OF: reiterate
        // on the same node until the enclosing frame is exhausted, then
        // resume past the whole repetition.
        if is_in_array(tree, node) {
            let exhausted = !frame.ndef_length && frame.nread >= frame.length;
            return if exhausted {
                ascend_and_right(tree, node)
            } else {
                Some(node)
            };
        }
        if is_in_choice(tree, node) {
            return ascend_and_right_once(tree, node);
        }
        return None;
    }

    if matches!(kind, Kind::SequenceOf | Kind::SetOf) {
        let in_array = is_in_array(tree, node);
        let exhausted = !frame.ndef_length && frame.nread >= frame.length;
        return if (cursor.went_up && !in_array) || exhausted {
            match tree.next_sibling(node) {
                Some(sibling) => Some(sibling),
                None => ascend_and_right(tree, node),
            }
        } else if in_array && cursor.went_up {
            clear_skip_this_subtree(tree, ds, node);
            Some(node)
        } else {
            tree.first_child(node)
        };
    }

    // Constructed, not a repetition head.
    cursor.in_seq_of = false;
    let in_array = is_in_array(tree, node);
    if in_array && cursor.went_up {
        clear_skip_this_subtree(tree, ds, node);
        Some(node)
    } else if cursor.went_up || cursor.next_tag {
        match tree.next_sibling(node) {
            Some(sibling) => Some(sibling),
            None => ascend_and_right(tree, node),
        }
    } else {
        tree.first_child(node)
    }
}
