//! Schema tree data model for a previously parsed ASN.1 module.
//!
//! This crate owns the *shape* a BER/DER decoder walks: nodes, their kinds,
//! their static flags, and the pure navigator functions
//! ([`walk_tree`], [`find_anchor`], [`cmp_tag`]) that move a cursor through
//! the tree. It does not read bytes and does not know about TLVs; see the
//! `ber-decoder` crate for that.
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod builder;
mod decode_state;
mod kind;
mod navigator;
mod node;
mod tree;

pub use builder::NodeSpec;
pub use decode_state::DecodeState;
pub use kind::{Kind, TagClass};
pub use navigator::{
    ascend_and_right, ascend_and_right_once, clear_skip_this_subtree, cmp_tag, find_anchor,
    is_in_array, is_in_choice, walk_tree,
};
pub use node::{Annotation, DecodeFlag, DecodeFlags, Node, NodeId, StaticFlag, StaticFlags, Value};
pub use tree::Tree;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Tree {
        Tree::from_spec(NodeSpec::sequence(
            "Point",
            vec![
                NodeSpec::new("x", Kind::Integer),
                NodeSpec::new("y", Kind::Integer),
            ],
        ))
    }

    #[test]
    fn walk_tree_visits_preorder() {
        let tree = sample_tree();
        let root = tree.root();
        let x = tree.first_child(root).unwrap();
        let y = tree.next_sibling(x).unwrap();

        assert_eq!(walk_tree(&tree, root, root), Some(x));
        assert_eq!(walk_tree(&tree, root, x), Some(y));
        assert_eq!(walk_tree(&tree, root, y), None);
    }

    #[test]
    fn find_anchor_locates_first_integer() {
        let tree = sample_tree();
        let root = tree.root();
        let x = tree.first_child(root).unwrap();
        assert_eq!(find_anchor(&tree, root, TagClass::Universal, 2), Some(x));
        assert_eq!(find_anchor(&tree, root, TagClass::Universal, 5), None);
    }

    #[test]
    fn cmp_tag_sequence_of_matches_sequence() {
        let tree = Tree::from_spec(NodeSpec::sequence_of(
            "items",
            NodeSpec::new("item", Kind::Integer),
        ));
        assert!(cmp_tag(&tree, tree.root(), TagClass::Universal, 16));
        assert!(!cmp_tag(&tree, tree.root(), TagClass::Universal, 17));
    }

    #[test]
    fn cmp_tag_any_matches_any_primitive() {
        let tree = Tree::from_spec(NodeSpec::new("v", Kind::Any));
        assert!(cmp_tag(&tree, tree.root(), TagClass::Universal, 2));
        assert!(cmp_tag(&tree, tree.root(), TagClass::Universal, 4));
        assert!(!cmp_tag(&tree, tree.root(), TagClass::Universal, 16));
    }

    #[test]
    fn decode_state_is_fresh_per_instance() {
        let tree = sample_tree();
        let root = tree.root();
        let mut ds = DecodeState::new(&tree);
        ds.set(root, DecodeFlag::SkipThis);
        assert!(ds.is_set(root, DecodeFlag::SkipThis));

        let ds2 = DecodeState::new(&tree);
        assert!(!ds2.is_set(root, DecodeFlag::SkipThis));
    }

    #[test]
    fn clear_skip_this_subtree_clears_descendants() {
        let tree = Tree::from_spec(NodeSpec::sequence(
            "S",
            vec![NodeSpec::choice(
                "c",
                vec![
                    NodeSpec::new("a", Kind::Integer),
                    NodeSpec::new("b", Kind::OctetString),
                ],
            )],
        ));
        let root = tree.root();
        let choice = tree.first_child(root).unwrap();
        let a = tree.first_child(choice).unwrap();
        let b = tree.next_sibling(a).unwrap();

        let mut ds = DecodeState::new(&tree);
        ds.set(a, DecodeFlag::SkipThis);
        ds.set(b, DecodeFlag::SkipThis);

        clear_skip_this_subtree(&tree, &mut ds, choice);

        assert!(!ds.is_set(a, DecodeFlag::SkipThis));
        assert!(!ds.is_set(b, DecodeFlag::SkipThis));
    }
}
