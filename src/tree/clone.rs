/*!
`Node.cloneNode`, `Document.importNode`, and `Document.adoptNode` — three
variations on copying or re-homing a subtree, sharing one recursive walker
parameterized by what happens to `ownerDocument` and the source tree.
*/

use crate::config::Configuration;
use crate::error::{DOMResult, Error};
use crate::node::mutate::set_readonly_deep;
use crate::node::{AttributeMap, Element, Node, NodeData, NodeImpl, NodeType, RefNode};

/// `cloneNode(deep)`: always produces a detached copy owned by the same
/// document as the source, per DOM Level 1's original (non-adopting)
/// semantics that Level 3 keeps for this operation specifically.
pub fn clone_node(source: &RefNode, deep: bool) -> RefNode {
    let owner = source.owner_document();
    copy_subtree(source, deep, &owner)
}

/// `importNode(imported, deep)`: copies `imported` (from any document) into
/// `self`, rejecting Document/DocumentType sources per the recommendation.
pub fn import_node(into: &RefNode, imported: &RefNode, deep: bool) -> DOMResult<RefNode> {
    if matches!(imported.node_type(), NodeType::Document) {
        return Err(Error::NotSupported {
            reason: "Document nodes cannot be imported".to_string(),
        });
    }
    Ok(copy_subtree(imported, deep, &Some(into.clone())))
}

/// `adoptNode(source)`: re-homes `source` in place (no copy), detaching it
/// from any current parent.
pub fn adopt_node(into: &RefNode, source: &RefNode) -> DOMResult<RefNode> {
    if matches!(source.node_type(), NodeType::Document) {
        return Err(Error::NotSupported {
            reason: "Document nodes cannot be adopted".to_string(),
        });
    }
    if let Some(parent) = source.parent_node() {
        let mut parent = parent;
        let _ = parent.remove_child(source);
    }
    rehome_owner(source, into);
    Ok(source.clone())
}

fn rehome_owner(node: &RefNode, owner: &RefNode) {
    node.borrow_mut().owner_document = Some(owner.downgrade());
    for child in node.borrow().children.clone() {
        rehome_owner(&child, owner);
    }
    if let NodeData::Element { attributes } = &node.borrow().data {
        for (_, attr) in attributes.iter() {
            rehome_owner(attr, owner);
        }
    }
}

fn copy_subtree(source: &RefNode, deep: bool, owner: &Option<RefNode>) -> RefNode {
    let data = copy_data(&source.borrow().data);
    let copy = RefNode::new(NodeImpl::new(source.node_type(), source.name(), data));
    copy.borrow_mut().owner_document = owner.as_ref().map(|o| o.downgrade());

    // Cloning a Document produces a fresh document that owns its own
    // subtree; every other kind keeps the original's owner unchanged.
    let child_owner = if source.node_type() == NodeType::Document {
        Some(copy.clone())
    } else {
        owner.clone()
    };

    if source.node_type() == NodeType::Element {
        let attrs = Element::attributes(source);
        let mut map = AttributeMap::new();
        for attr in attrs {
            // Attribute clones are always deep: their value is part of the
            // attribute's identity, not optional descendant content.
            let attr_copy = copy_subtree(&attr, true, &child_owner);
            attr_copy.borrow_mut().container = Some(copy.downgrade());
            map.set(attr.name(), attr_copy);
        }
        copy.borrow_mut().data = NodeData::Element { attributes: map };
    }

    if deep || matches!(source.node_type(), NodeType::Attribute) {
        for child in source.borrow().children.clone() {
            let child_copy = copy_subtree(&child, deep, &child_owner);
            child_copy.borrow_mut().parent = Some(copy.downgrade());
            copy.borrow_mut().children.push(child_copy);
        }
    }

    copy
}

/// `Document` carries a live `Configuration`/error-handler pair that cannot
/// be meaningfully duplicated; cloning a Document node produces a fresh,
/// independently-configured document rather than an aliased one.
fn copy_data(data: &NodeData) -> NodeData {
    match data {
        NodeData::Document {
            xml_version,
            xml_encoding,
            xml_standalone,
            input_encoding,
            document_uri,
            strict_error_checking,
            ..
        } => NodeData::Document {
            config: Box::new(Configuration::default()),
            xml_version: xml_version.clone(),
            xml_encoding: xml_encoding.clone(),
            xml_standalone: *xml_standalone,
            input_encoding: input_encoding.clone(),
            document_uri: document_uri.clone(),
            strict_error_checking: *strict_error_checking,
        },
        other => other.clone(),
    }
}

/// `Node.setReadonly`-style propagation used after cloning a node that must
/// come back readonly (e.g. entity reference subtrees): re-exported for the
/// parser and the default-attribute machinery.
pub fn mark_readonly(node: &RefNode) {
    set_readonly_deep(node, true);
}
