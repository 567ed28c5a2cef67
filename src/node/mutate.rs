/*!
The single internal routine behind `appendChild`/`insertBefore`/
`replaceChild`/`removeChild`. `Node::splice_child` in
[`super::trait_impls`] is a thin dispatcher onto [`splice`].
*/

use crate::error::Error;
use crate::node::{NodeType, RefNode};

type DOMResult<T> = Result<T, Error>;

fn admissible_child(parent_type: NodeType, child_type: NodeType) -> bool {
    use NodeType::*;
    match parent_type {
        Document => matches!(child_type, Element | DocumentType | Comment | ProcessingInstruction),
        DocumentFragment | Element | EntityReference | Entity => matches!(
            child_type,
            Element | Text | CData | Comment | ProcessingInstruction | EntityReference
        ),
        Attribute => matches!(child_type, Text | EntityReference),
        _ => false,
    }
}

fn is_ancestor_of(candidate: &RefNode, node: &RefNode) -> bool {
    let mut cur = node.borrow().parent.clone();
    while let Some(weak) = cur {
        match weak.upgrade() {
            Some(p) if p.ptr_eq(candidate) => return true,
            Some(p) => cur = p.borrow().parent.clone(),
            None => break,
        }
    }
    false
}

/// Walks from `node` to the root, incrementing the sequence counter on each
/// ancestor — this is what invalidates a cached live tag-name list.
pub(crate) fn bump_sequence(node: &RefNode) {
    let mut cur = Some(node.clone());
    while let Some(n) = cur {
        n.borrow_mut().sequence += 1;
        cur = n.borrow().parent.clone().and_then(|w| w.upgrade());
    }
}

/// Propagates a readonly flag change down an entire subtree, including into
/// an Element's attribute map — used when cloning an EntityReference's
/// expansion and by the default-attribute machinery.
pub(crate) fn set_readonly_deep(node: &RefNode, readonly: bool) {
    node.borrow_mut().readonly = readonly;
    for child in node.borrow().children.clone() {
        set_readonly_deep(&child, readonly);
    }
    if let crate::node::NodeData::Element { attributes } = &node.borrow().data {
        for (_, attr) in attributes.iter() {
            set_readonly_deep(attr, readonly);
        }
    }
}

fn detach(child: &RefNode) {
    if let Some(parent) = child.borrow().parent.clone().and_then(|w| w.upgrade()) {
        let mut p = parent.borrow_mut();
        if let Some(pos) = p.children.iter().position(|c| c.ptr_eq(child)) {
            p.children.remove(pos);
        }
    }
    child.borrow_mut().parent = None;
}

fn rehome(node: &RefNode, owner: &Option<crate::node::WeakRefNode>) {
    node.borrow_mut().owner_document = owner.clone();
    let children: Vec<RefNode> = node.borrow().children.clone();
    for child in &children {
        rehome(child, owner);
    }
    if let crate::node::NodeData::Element { attributes } = &node.borrow().data {
        for (_, attr) in attributes.iter() {
            rehome(attr, owner);
        }
    }
}

/// Inserts `new_child` into `parent`, before `before` (or at the end if
/// `before` is `None`). `before`'s position is looked up fresh, after
/// `new_child` has been detached from wherever it previously lived, so a
/// `before` computed from a snapshot taken earlier (e.g. the sibling that
/// used to follow a node being replaced) still lands correctly even if
/// `new_child`'s own detachment shifted indices around it.
fn insert_one(parent: &RefNode, new_child: RefNode, before: Option<&RefNode>) -> DOMResult<()> {
    if is_ancestor_of(&new_child, parent) || new_child.ptr_eq(parent) {
        return Err(Error::HierarchyRequest);
    }
    let parent_type = parent.borrow().node_type;
    let child_type = new_child.borrow().node_type;
    if !admissible_child(parent_type, child_type) {
        return Err(Error::HierarchyRequest);
    }
    if parent_type == NodeType::Document
        && matches!(child_type, NodeType::Element | NodeType::DocumentType)
        && parent.borrow().children.iter().any(|c| c.borrow().node_type == child_type)
    {
        return Err(Error::HierarchyRequest);
    }

    let parent_owner = parent.borrow().owner_document.clone();
    let child_owner = new_child.borrow().owner_document.clone();
    match (&parent_owner, &child_owner) {
        (Some(p), Some(c)) if !ptr_eq_weak(p, c) => return Err(Error::WrongDocument),
        (None, Some(_)) => return Err(Error::WrongDocument),
        _ => {}
    }
    if child_owner.is_none() {
        rehome(&new_child, &parent_owner);
    }

    detach(&new_child);

    let mut p = parent.borrow_mut();
    match before {
        Some(b) => {
            let idx = p.children.iter().position(|c| c.ptr_eq(b)).unwrap_or(p.children.len());
            p.children.insert(idx, new_child.clone());
        }
        None => p.children.push(new_child.clone()),
    }
    drop(p);
    new_child.borrow_mut().parent = Some(parent.downgrade());
    Ok(())
}

fn ptr_eq_weak(a: &crate::node::WeakRefNode, b: &crate::node::WeakRefNode) -> bool {
    match (a.upgrade(), b.upgrade()) {
        (Some(x), Some(y)) => x.ptr_eq(&y),
        _ => false,
    }
}

/// `new_child = None` + `old_child = Some` removes; `ref_child = None`
/// appends; otherwise inserts before `ref_child`, or (with `old_child`
/// non-null and no `ref_child`) replaces `old_child`.
pub(crate) fn splice(
    parent: &RefNode,
    new_child: Option<RefNode>,
    old_child: Option<&RefNode>,
    ref_child: Option<&RefNode>,
) -> DOMResult<Option<RefNode>> {
    if parent.borrow().readonly {
        return Err(Error::NoModificationAllowed);
    }

    let old_index = match old_child {
        Some(oc) => Some(
            parent
                .borrow()
                .children
                .iter()
                .position(|c| c.ptr_eq(oc))
                .ok_or(Error::NotFound)?,
        ),
        None => None,
    };
    if let Some(rc) = ref_child {
        if !parent.borrow().children.iter().any(|c| c.ptr_eq(rc)) {
            return Err(Error::NotFound);
        }
    }

    match (new_child, old_child) {
        (None, Some(oc)) => {
            detach(oc);
            bump_sequence(parent);
            Ok(Some(oc.clone()))
        }
        (Some(nc), Some(oc)) => {
            let idx = old_index.unwrap();
            // Captured before detaching `oc`: the sibling that should end up
            // immediately after `nc` once it takes `oc`'s place.
            let next_sibling = parent.borrow().children.get(idx + 1).cloned();
            detach(oc);
            let already_in_place = next_sibling.as_ref().map(|ns| ns.ptr_eq(&nc)).unwrap_or(false);
            if !already_in_place {
                insert_one(parent, nc, next_sibling.as_ref())?;
            }
            bump_sequence(parent);
            Ok(Some(oc.clone()))
        }
        (Some(nc), None) => {
            if nc.borrow().node_type == NodeType::DocumentFragment {
                let frag_children: Vec<RefNode> = nc.borrow().children.clone();
                for child in frag_children {
                    insert_one(parent, child, ref_child)?;
                }
                bump_sequence(parent);
                Ok(Some(nc))
            } else {
                insert_one(parent, nc.clone(), ref_child)?;
                bump_sequence(parent);
                Ok(Some(nc))
            }
        }
        (None, None) => Ok(None),
    }
}
