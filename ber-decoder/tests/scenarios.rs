//! End-to-end decode scenarios against hand-built schema trees.

use ber_decoder::{Decoder, SliceReader};
use asn1_schema::{Kind, NodeSpec, Tree};
use hex_literal::hex;

fn decode(schema: NodeSpec, bytes: &[u8]) -> ber_decoder::DecodeOutput {
    let tree = Tree::from_spec(schema);
    let mut decoder: Decoder<SliceReader> = Decoder::new();
    decoder.set_module(tree).unwrap();
    decoder.set_reader(SliceReader::new(bytes)).unwrap();
    decoder.decode().unwrap()
}

#[test]
fn s1_null_value() {
    let out = decode(NodeSpec::new("n", Kind::Null), &hex!("05 00"));
    let ann = out.tree.node(out.tree.root()).annotation.unwrap();
    assert_eq!(ann.header_length, 2);
    assert_eq!(ann.value_length, 0);
    assert_eq!(out.image.len(), 2);
    assert!(!out.non_der);
}

#[test]
fn s2_integer() {
    let out = decode(NodeSpec::new("n", Kind::Integer), &hex!("02 01 2A"));
    let root = out.tree.root();
    let ann = out.tree.node(root).annotation.unwrap();
    assert_eq!(ann.header_length, 2);
    assert_eq!(ann.value_length, 1);
    match &out.tree.node(root).value {
        asn1_schema::Value::Bytes(b) => assert_eq!(b.as_slice(), &[0x2a]),
        other => panic!("unexpected value {other:?}"),
    }
}

#[test]
fn s3_sequence_of_two_integers() {
    let schema = NodeSpec::sequence(
        "S",
        vec![
            NodeSpec::new("a", Kind::Integer),
            NodeSpec::new("b", Kind::Integer),
        ],
    );
    let out = decode(schema, &hex!("30 06 02 01 01 02 01 02"));
    let root = out.tree.root();
    let a = out.tree.first_child(root).unwrap();
    let b = out.tree.next_sibling(a).unwrap();

    assert!(out.tree.node(root).annotation.is_some());
    assert!(out.tree.node(a).annotation.is_some());
    assert!(out.tree.node(b).annotation.is_some());
    assert_eq!(out.image.len(), 8);
    assert!(!out.non_der);
}

/// A genuine `SEQUENCE OF INTEGER` repetition, not the `s3` plain-`SEQUENCE`
/// test of two distinctly-named fields: the repeated element is one shared
/// schema node matched three times in a row with no constructed frame
/// closing in between.
#[test]
fn sequence_of_primitive_repeats_three_times() {
    let schema = NodeSpec::sequence_of("nums", NodeSpec::new("n", Kind::Integer));
    let out = decode(schema, &hex!("30 09 02 01 01 02 01 02 02 01 03"));
    assert!(!out.non_der);
    assert_eq!(out.image.len(), 11);

    let root = out.tree.root();
    assert!(out.tree.node(root).annotation.is_some());

    let elem = out.tree.first_child(root).unwrap();
    let ann = out.tree.node(elem).annotation.unwrap();
    // The shared element node's one `Annotation` reflects whichever
    // repetition matched last; here, the third integer.
    assert_eq!(ann.offset, 8);
    assert_eq!(ann.header_length, 2);
    assert_eq!(ann.value_length, 1);
    match &out.tree.node(elem).value {
        asn1_schema::Value::Bytes(b) => assert_eq!(b.as_slice(), &[0x03]),
        other => panic!("unexpected value {other:?}"),
    }
}

/// A `SEQUENCE OF SEQUENCE { x: INTEGER }` repetition: the repeated element
/// is itself constructed, so each repetition opens and closes its own
/// frame, exercising the frame-stack/cursor restoration on pop.
#[test]
fn sequence_of_constructed_repeats_twice() {
    let item = NodeSpec::sequence("item", vec![NodeSpec::new("x", Kind::Integer)]);
    let schema = NodeSpec::sequence_of("items", item);
    let out = decode(
        schema,
        &hex!("30 0A 30 03 02 01 05 30 03 02 01 06"),
    );
    assert!(!out.non_der);
    assert_eq!(out.image.len(), 12);

    let root = out.tree.root();
    let root_ann = out.tree.node(root).annotation.unwrap();
    assert_eq!(root_ann.header_length, 2);
    assert_eq!(root_ann.value_length, 10);

    let elem = out.tree.first_child(root).unwrap();
    let elem_ann = out.tree.node(elem).annotation.unwrap();
    // Last (second) repetition's header starts right after the first item.
    assert_eq!(elem_ann.offset, 7);
    assert_eq!(elem_ann.value_length, 3);

    let x = out.tree.first_child(elem).unwrap();
    let x_ann = out.tree.node(x).annotation.unwrap();
    assert_eq!(x_ann.offset, 9);
    match &out.tree.node(x).value {
        asn1_schema::Value::Bytes(b) => assert_eq!(b.as_slice(), &[0x06]),
        other => panic!("unexpected value {other:?}"),
    }
}

#[test]
fn s4_indefinite_length() {
    let schema = NodeSpec::sequence(
        "S",
        vec![
            NodeSpec::new("a", Kind::Integer),
            NodeSpec::new("b", Kind::Integer).optional(),
        ],
    );
    let out = decode(schema, &hex!("30 80 02 01 01 00 00"));
    assert!(out.non_der);
    let root = out.tree.root();
    let ann = out.tree.node(root).annotation.unwrap();
    assert_eq!(ann.header_length, 2);
}

#[test]
fn s5_optional_absent_then_present() {
    let schema = || {
        NodeSpec::sequence(
            "S",
            vec![
                NodeSpec::new("a", Kind::Integer).optional(),
                NodeSpec::new("b", Kind::Boolean),
            ],
        )
    };

    let out = decode(schema(), &hex!("30 03 01 01 FF"));
    let root = out.tree.root();
    let a = out.tree.first_child(root).unwrap();
    let b = out.tree.next_sibling(a).unwrap();
    assert!(out.tree.node(a).annotation.is_none());
    assert!(out.tree.node(b).annotation.is_some());

    let out = decode(schema(), &hex!("30 06 02 01 07 01 01 00"));
    let root = out.tree.root();
    let a = out.tree.first_child(root).unwrap();
    let b = out.tree.next_sibling(a).unwrap();
    assert!(out.tree.node(a).annotation.is_some());
    assert!(out.tree.node(b).annotation.is_some());
}

#[test]
fn s6_choice() {
    let schema = NodeSpec::choice(
        "c",
        vec![
            NodeSpec::new("a", Kind::Integer),
            NodeSpec::new("b", Kind::OctetString),
        ],
    );
    let out = decode(schema, &hex!("04 02 AA BB"));
    let root = out.tree.root();
    let a = out.tree.first_child(root).unwrap();
    let b = out.tree.next_sibling(a).unwrap();
    assert!(out.tree.node(a).annotation.is_none());
    assert!(out.tree.node(b).annotation.is_some());
}

#[test]
fn s7_forbidden_length_fails_without_advancing() {
    let tree = Tree::from_spec(NodeSpec::new("n", Kind::Integer));
    let mut decoder: Decoder<SliceReader> = Decoder::new();
    decoder.set_module(tree).unwrap();
    decoder.set_reader(SliceReader::new(&hex!("02 FF"))).unwrap();
    let err = decoder.decode().unwrap_err();
    assert_eq!(
        err.kind,
        ber_decoder::ErrorKind::Ber(ber_decoder::BerErrorKind::ForbiddenLength)
    );
}
