//! A plain constructor for schema trees, standing in for the out-of-scope
//! ASN.1 module parser (spec.md's "schema module contract" collaborator).
//!
//! This performs no grammar parsing: it turns an already-decided tree shape
//! (typically written out by hand, or generated by some other tool) into an
//! arena-backed [`Tree`]. It is the moral equivalent of constructing a
//! `der::Sequence`-derived struct by hand instead of via `#[derive(Sequence)]`
//! — convenient scaffolding, not the thing the derive macro replaces.

use crate::kind::{Kind, TagClass};
use crate::node::{Annotation, Node, NodeId, StaticFlag, StaticFlags, Value};
use crate::tree::Tree;

#[cfg(feature = "alloc")]
use alloc::{string::String, string::ToString, vec, vec::Vec};

/// A not-yet-arena-allocated schema node, built up with the `with_*`
/// convenience methods and then passed to [`Tree::from_spec`].
#[derive(Clone, Debug)]
pub struct NodeSpec {
    pub name: String,
    pub kind: Kind,
    pub class: TagClass,
    pub flags: StaticFlags,
    pub value: Value,
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        // SEQUENCE OF/SET OF/ANY have no single universal tag of their own
        // (SEQUENCE OF/SET OF reuse SEQUENCE/SET's; ANY matches whichever
        // primitive tag shows up, see `cmp_tag`) but are still
        // universal-class wire types, not schema-only pseudo-kinds like
        // TAG/SIZE/DEFAULT/CHOICE.
        let class = if kind.universal_tag().is_some()
            || matches!(kind, Kind::SequenceOf | Kind::SetOf | Kind::Any)
        {
            TagClass::Universal
        } else {
            TagClass::Context
        };
        NodeSpec {
            name: name.into(),
            kind,
            class,
            flags: StaticFlags::default(),
            value: Value::None,
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: TagClass) -> Self {
        self.class = class;
        self
    }

    pub fn value(mut self, value: Value) -> Self {
        self.value = value;
        self
    }

    pub fn optional(mut self) -> Self {
        self.flags |= StaticFlag::IsOptional;
        self
    }

    pub fn with_default(mut self) -> Self {
        self.flags |= StaticFlag::HasDefault;
        self
    }

    pub fn in_array(mut self) -> Self {
        self.flags |= StaticFlag::InArray;
        self
    }

    pub fn in_choice(mut self) -> Self {
        self.flags |= StaticFlag::InChoice;
        self
    }

    pub fn children(mut self, children: Vec<NodeSpec>) -> Self {
        self.children = children;
        self
    }

    /// A `SEQUENCE` node with the given fields.
    pub fn sequence(name: impl Into<String>, fields: Vec<NodeSpec>) -> Self {
        NodeSpec::new(name, Kind::Sequence).children(fields)
    }

    /// A `SEQUENCE OF elem` node: one schema child describing the repeated
    /// element type.
    pub fn sequence_of(name: impl Into<String>, elem: NodeSpec) -> Self {
        NodeSpec::new(name, Kind::SequenceOf).children(vec![elem.in_array()])
    }

    /// A `SET OF elem` node: one schema child describing the repeated
    /// element type.
    pub fn set_of(name: impl Into<String>, elem: NodeSpec) -> Self {
        NodeSpec::new(name, Kind::SetOf).children(vec![elem.in_array()])
    }

    /// A `CHOICE` node: each alternative is marked `in_choice` automatically.
    pub fn choice(name: impl Into<String>, alternatives: Vec<NodeSpec>) -> Self {
        let alternatives = alternatives.into_iter().map(|a| a.in_choice()).collect();
        NodeSpec::new(name, Kind::Choice).children(alternatives)
    }

    /// Wrap `inner` in an explicit or implicit `TAG` pseudo-node.
    pub fn tagged(inner: NodeSpec, class: TagClass, number: u64, explicit: bool) -> Self {
        let mode_flag = if explicit {
            StaticFlag::Explicit
        } else {
            StaticFlag::Implicit
        };
        NodeSpec {
            name: inner.name.to_string(),
            kind: Kind::Tag,
            class,
            flags: StaticFlags::default() | StaticFlag::HasTag | mode_flag,
            value: Value::ULong(number),
            children: vec![inner],
        }
    }
}

impl Tree {
    /// Build an arena-backed [`Tree`] from a [`NodeSpec`] literal.
    pub fn from_spec(spec: NodeSpec) -> Tree {
        let mut nodes = Vec::new();
        let root = push_spec(&mut nodes, spec, None);
        Tree::new(nodes, root)
    }
}

fn push_spec(nodes: &mut Vec<Node>, spec: NodeSpec, parent: Option<NodeId>) -> NodeId {
    let id = NodeId(nodes.len() as u32);
    nodes.push(Node {
        name: spec.name,
        kind: spec.kind,
        class: spec.class,
        flags: spec.flags,
        value: spec.value,
        annotation: None::<Annotation>,
        parent,
        prev_sibling: None,
        next_sibling: None,
        first_child: None,
    });

    let mut prev: Option<NodeId> = None;
    for (i, child) in spec.children.into_iter().enumerate() {
        let child_id = push_spec(nodes, child, Some(id));
        if i == 0 {
            nodes[id.index()].first_child = Some(child_id);
        }
        if let Some(p) = prev {
            nodes[p.index()].next_sibling = Some(child_id);
            nodes[child_id.index()].prev_sibling = Some(p);
        }
        prev = Some(child_id);
    }

    id
}
