/*!
`Node.compareDocumentPosition`: the DOM Level 3 Core bitmask comparing two
nodes that may belong to different trees, the same tree on an ancestor
chain, or the same tree as unrelated siblings.
*/

use crate::node::{Node, RefNode};

pub const DOCUMENT_POSITION_DISCONNECTED: u16 = 0x01;
pub const DOCUMENT_POSITION_PRECEDING: u16 = 0x02;
pub const DOCUMENT_POSITION_FOLLOWING: u16 = 0x04;
pub const DOCUMENT_POSITION_CONTAINS: u16 = 0x08;
pub const DOCUMENT_POSITION_CONTAINED_BY: u16 = 0x10;
pub const DOCUMENT_POSITION_IMPLEMENTATION_SPECIFIC: u16 = 0x20;

pub fn compare_document_position(this: &RefNode, other: &RefNode) -> u16 {
    if this.ptr_eq(other) {
        return 0;
    }

    let this_path = path_to_root(this);
    let other_path = path_to_root(other);

    if !this_path.last().unwrap().ptr_eq(other_path.last().unwrap()) {
        // Different trees: report disconnected + an arbitrary but stable
        // ordering based on pointer identity, per the recommendation's
        // allowance for implementation-specific ordering.
        let ordering = if (this.as_inner().as_ptr() as usize) < (other.as_inner().as_ptr() as usize) {
            DOCUMENT_POSITION_FOLLOWING
        } else {
            DOCUMENT_POSITION_PRECEDING
        };
        return DOCUMENT_POSITION_DISCONNECTED | DOCUMENT_POSITION_IMPLEMENTATION_SPECIFIC | ordering;
    }

    if let Some(pos) = other_path.iter().position(|n| n.ptr_eq(this)) {
        let _ = pos;
        return DOCUMENT_POSITION_CONTAINED_BY | DOCUMENT_POSITION_FOLLOWING;
    }
    if let Some(pos) = this_path.iter().position(|n| n.ptr_eq(other)) {
        let _ = pos;
        return DOCUMENT_POSITION_CONTAINS | DOCUMENT_POSITION_PRECEDING;
    }

    let common_depth = this_path.len().min(other_path.len());
    let this_rev: Vec<&RefNode> = this_path.iter().rev().collect();
    let other_rev: Vec<&RefNode> = other_path.iter().rev().collect();
    let mut divergence = 0;
    for i in 0..common_depth {
        if !this_rev[i].ptr_eq(other_rev[i]) {
            break;
        }
        divergence = i;
    }
    let parent = this_rev[divergence].clone();
    let siblings = parent.child_nodes();
    let this_anchor = this_rev.get(divergence + 1).cloned();
    let other_anchor = other_rev.get(divergence + 1).cloned();
    match (this_anchor, other_anchor) {
        (Some(t), Some(o)) => {
            let t_idx = siblings.iter().position(|c| c.ptr_eq(t));
            let o_idx = siblings.iter().position(|c| c.ptr_eq(o));
            match (t_idx, o_idx) {
                (Some(ti), Some(oi)) if ti < oi => DOCUMENT_POSITION_FOLLOWING,
                (Some(_), Some(_)) => DOCUMENT_POSITION_PRECEDING,
                _ => DOCUMENT_POSITION_DISCONNECTED | DOCUMENT_POSITION_IMPLEMENTATION_SPECIFIC,
            }
        }
        _ => DOCUMENT_POSITION_DISCONNECTED | DOCUMENT_POSITION_IMPLEMENTATION_SPECIFIC,
    }
}

fn path_to_root(node: &RefNode) -> Vec<RefNode> {
    let mut path = vec![node.clone()];
    let mut current = node.parent_node();
    while let Some(p) = current {
        path.push(p.clone());
        current = p.parent_node();
    }
    path
}
