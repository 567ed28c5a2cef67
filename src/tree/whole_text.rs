/*!
`Text.isElementContentWhitespace`, `Text.wholeText`, and
`Text.replaceWholeText` — the "logical adjacent text run" family, which
treats a run of sibling Text nodes (uninterrupted by anything but
EntityReference) as one conceptual string.
*/

use crate::error::DOMResult;
use crate::node::{CharacterData, Document, Element, Node, NodeType, RefNode};

/// True when every character is XML whitespace AND the node sits inside an
/// ancestor element whose DTD content model is declared `Children`-only
/// (element content, no `#PCDATA`) — ignorable whitespace per the
/// recommendation's definition.
pub fn is_element_content_whitespace(text: &RefNode) -> bool {
    let data = CharacterData::data(text);
    if !data.chars().all(|c| matches!(c, ' ' | '\t' | '\n' | '\r')) {
        return false;
    }
    let parent = match text.parent_node() {
        Some(p) if p.node_type() == NodeType::Element => p,
        _ => return false,
    };
    matches!(
        Element::declared_content_model(&parent),
        Some(crate::node::ContentModelKind::Children(_))
    )
}

fn run_bounds(text: &RefNode) -> Vec<RefNode> {
    let parent = match text.parent_node() {
        Some(p) => p,
        None => return vec![text.clone()],
    };
    let siblings = parent.child_nodes();
    let idx = match siblings.iter().position(|c| c.ptr_eq(text)) {
        Some(i) => i,
        None => return vec![text.clone()],
    };

    let mut start = idx;
    while start > 0 && is_text_run_member(&siblings[start - 1]) {
        start -= 1;
    }
    let mut end = idx;
    while end + 1 < siblings.len() && is_text_run_member(&siblings[end + 1]) {
        end += 1;
    }
    siblings[start..=end]
        .iter()
        .filter(|n| n.node_type() == NodeType::Text)
        .cloned()
        .collect()
}

fn is_text_run_member(node: &RefNode) -> bool {
    matches!(node.node_type(), NodeType::Text | NodeType::EntityReference)
}

pub fn whole_text(text: &RefNode) -> String {
    run_bounds(text)
        .iter()
        .map(CharacterData::data)
        .collect::<Vec<_>>()
        .join("")
}

/// Replaces the entire logical text run containing `text` with a single Text
/// node carrying `content` (or removes the run entirely when `content` is
/// empty), returning the new node.
pub fn replace_whole_text(text: &RefNode, content: &str) -> DOMResult<Option<RefNode>> {
    let run = run_bounds(text);
    let parent = match text.parent_node() {
        Some(p) => p,
        None => return Ok(None),
    };
    let siblings = parent.child_nodes();
    let start_index = run
        .first()
        .and_then(|first| siblings.iter().position(|c| c.ptr_eq(first)));

    for node in &run {
        let mut parent = parent.clone();
        let _ = parent.remove_child(node);
    }
    if content.is_empty() {
        return Ok(None);
    }
    let owner = text.owner_document().ok_or(crate::error::Error::NotSupported {
        reason: "text node has no owner document".to_string(),
    })?;
    let new_node = owner.create_text_node(content);
    let mut parent = parent;
    let remaining = parent.child_nodes();
    match start_index.and_then(|i| remaining.get(i).cloned()) {
        Some(ref_child) => {
            parent.insert_before(new_node.clone(), Some(&ref_child))?;
        }
        None => {
            parent.append_child(new_node.clone())?;
        }
    }
    Ok(Some(new_node))
}
