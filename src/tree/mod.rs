/*!
Whole-tree algorithms that don't belong to any one node kind: cloning,
import/adopt, namespace lookup and fixup, document-position comparison,
`normalizeDocument`, node equality, and the `Text.wholeText` family.

Each of these walks more than the node it is called on, which is why they
live apart from [`crate::node::trait_impls`] rather than inline in a trait
method — the trait methods there are thin dispatchers onto these functions.
*/

pub mod attr_default;
pub mod clone;
pub mod equality;
pub mod live_list;
pub mod namespace;
pub mod namespaced;
pub mod normalize;
pub mod position;
pub mod whole_text;

use crate::error::DOMResult;
use crate::node::{Document, Node, NodeData, NodeType, RefNode};

/// `Node.textContent`: the concatenation of every Text/CDATA descendant's
/// data for container kinds; the node's own value for Text/CDATA/Comment/PI;
/// `None` for Document and DocumentType, which do not have one.
pub fn text_content(node: &RefNode) -> Option<String> {
    match node.node_type() {
        NodeType::Document | NodeType::DocumentType => None,
        NodeType::Text | NodeType::CData | NodeType::Comment | NodeType::ProcessingInstruction => {
            node.node_value()
        }
        _ => {
            let mut out = String::new();
            collect_text(node, &mut out);
            Some(out)
        }
    }
}

fn collect_text(node: &RefNode, out: &mut String) {
    for child in node.borrow().children.clone() {
        match child.borrow().node_type {
            NodeType::Text | NodeType::CData => {
                if let NodeData::CharacterData(s) = &child.borrow().data {
                    out.push_str(s);
                }
            }
            NodeType::Comment | NodeType::ProcessingInstruction => {}
            _ => collect_text(&child, out),
        }
    }
}

/// `Node.textContent = value`: replaces all children with a single Text node
/// carrying `value` (container kinds), or sets the node's own value
/// (Text/CDATA/Comment/PI). A no-op for Document/DocumentType.
pub fn set_text_content(node: &mut RefNode, value: &str) -> DOMResult<()> {
    match node.node_type() {
        NodeType::Document | NodeType::DocumentType => Ok(()),
        NodeType::Text | NodeType::CData | NodeType::Comment | NodeType::ProcessingInstruction => {
            node.set_node_value(value)
        }
        _ => {
            let children: Vec<RefNode> = node.borrow().children.clone();
            for child in &children {
                node.remove_child(child)?;
            }
            if !value.is_empty() {
                if let Some(owner) = node.owner_document() {
                    let text = owner.create_text_node(value);
                    node.append_child(text)?;
                }
            }
            Ok(())
        }
    }
}
