/*!
`Node.isEqualNode`: structural equality (same kind, name, value, attributes,
children — recursively) as distinct from `Node` identity (`Rc::ptr_eq`).
*/

use crate::node::{Attribute, Element, Node, NodeData, NodeType, RefNode};

pub fn is_equal_node(a: &RefNode, b: &RefNode) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    if a.node_type() != b.node_type() || a.name() != b.name() {
        return false;
    }
    if a.node_value() != b.node_value() {
        return false;
    }
    if a.node_type() == NodeType::Element && !attributes_equal(a, b) {
        return false;
    }
    if a.node_type() == NodeType::DocumentType && !doc_type_equal(a, b) {
        return false;
    }

    let a_children = a.child_nodes();
    let b_children = b.child_nodes();
    if a_children.len() != b_children.len() {
        return false;
    }
    a_children
        .iter()
        .zip(b_children.iter())
        .all(|(x, y)| is_equal_node(x, y))
}

fn attributes_equal(a: &RefNode, b: &RefNode) -> bool {
    let a_attrs = Element::attributes(a);
    let b_attrs = Element::attributes(b);
    if a_attrs.len() != b_attrs.len() {
        return false;
    }
    a_attrs.iter().all(|attr| {
        b_attrs
            .iter()
            .any(|other| attr.name() == other.name() && Attribute::value(attr) == Attribute::value(other))
    })
}

fn doc_type_equal(a: &RefNode, b: &RefNode) -> bool {
    match (&a.borrow().data, &b.borrow().data) {
        (
            NodeData::DocumentType {
                public_id: pa,
                system_id: sa,
                internal_subset: ia,
                ..
            },
            NodeData::DocumentType {
                public_id: pb,
                system_id: sb,
                internal_subset: ib,
                ..
            },
        ) => pa == pb && sa == sb && ia == ib,
        _ => true,
    }
}
