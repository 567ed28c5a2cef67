/*!
`getElementsByTagName[NS]`: a depth-first element search. The DOM defines
this as a live `NodeList`; this crate instead snapshots a `Vec<RefNode>` at
call time (stamped with the subtree's current [`Node::sequence`]) rather than
returning a handle that mutates itself, matching the "live-ness through
re-query, not a live handle" design note.
*/

use crate::node::{Node, NodeType, RefNode};

const WILDCARD: &str = "*";

/// `tag_name_or_local` is a plain tag name for the non-namespace form, or a
/// local name (possibly `"*"`) for the namespace-aware form; `namespace_uri`
/// is `None` for the non-namespace form, or `Some("*")`/`Some(uri)` for the
/// namespace-aware one.
pub fn by_tag_name(root: &RefNode, namespace_uri: Option<&str>, tag_name_or_local: &str) -> Vec<RefNode> {
    let mut out = Vec::new();
    walk(root, namespace_uri, tag_name_or_local, &mut out);
    out
}

fn walk(node: &RefNode, namespace_uri: Option<&str>, name: &str, out: &mut Vec<RefNode>) {
    for child in node.borrow().children.clone() {
        if child.node_type() == NodeType::Element && matches(&child, namespace_uri, name) {
            out.push(child.clone());
        }
        walk(&child, namespace_uri, name, out);
    }
}

fn matches(element: &RefNode, namespace_uri: Option<&str>, name: &str) -> bool {
    match namespace_uri {
        None => name == WILDCARD || element.name().qualified_name() == name,
        Some(uri) => {
            let namespace_matches = uri == WILDCARD || element.name().namespace_uri().as_deref() == Some(uri);
            let local_matches = name == WILDCARD || element.name().local_name() == name;
            namespace_matches && local_matches
        }
    }
}
