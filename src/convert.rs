/*!
Kind-checked conversions from a bare [`RefNode`] to one of the capability
traits in [`crate::node`]. Every trait in this crate is implemented
unconditionally on `RefNode` (the tagged-union design means there is no
separate concrete type per kind to downcast to); these functions are the
guard that call sites use instead of matching on `NodeType` by hand
everywhere a `Document`/`Element`/... is expected.
*/

use crate::node::{Node, NodeType, RefNode};

macro_rules! kind_guard {
    ($(#[$meta:meta])* $fn_name:ident, $($kind:pat)|+) => {
        $(#[$meta])*
        pub fn $fn_name(node: &RefNode) -> Option<RefNode> {
            match node.node_type() {
                $($kind)|+ => Some(node.clone()),
                _ => None,
            }
        }
    };
}

kind_guard!(
    /// `node` if it is a `Document`, else `None`.
    as_document,
    NodeType::Document
);
kind_guard!(
    /// `node` if it is a `DocumentFragment`, else `None`.
    as_document_fragment,
    NodeType::DocumentFragment
);
kind_guard!(
    /// `node` if it is a `DocumentType`, else `None`.
    as_document_type,
    NodeType::DocumentType
);
kind_guard!(
    /// `node` if it is an `Element`, else `None`.
    as_element,
    NodeType::Element
);
kind_guard!(
    /// `node` if it is an `Attr`, else `None`.
    as_attribute,
    NodeType::Attribute
);
kind_guard!(
    /// `node` if it is `Text`, `CDATASection`, or `Comment`, else `None` —
    /// the three kinds implementing `CharacterData`.
    as_character_data,
    NodeType::Text | NodeType::CData | NodeType::Comment
);
kind_guard!(
    /// `node` if it is `Text` (not `CDATASection`), else `None`.
    as_text,
    NodeType::Text
);
kind_guard!(
    /// `node` if it is a `CDATASection`, else `None`.
    as_cdata_section,
    NodeType::CData
);
kind_guard!(
    /// `node` if it is a `Comment`, else `None`.
    as_comment,
    NodeType::Comment
);
kind_guard!(
    /// `node` if it is a `ProcessingInstruction`, else `None`.
    as_processing_instruction,
    NodeType::ProcessingInstruction
);
kind_guard!(
    /// `node` if it is an `EntityReference`, else `None`.
    as_entity_reference,
    NodeType::EntityReference
);
kind_guard!(
    /// `node` if it is an `Entity`, else `None`.
    as_entity,
    NodeType::Entity
);
kind_guard!(
    /// `node` if it is a `Notation`, else `None`.
    as_notation,
    NodeType::Notation
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom_impl::get_implementation;

    #[test]
    fn guards_match_only_their_kind() {
        let doc = get_implementation()
            .create_document(None, Some("root"), None)
            .unwrap();
        assert!(as_document(&doc).is_some());
        assert!(as_element(&doc).is_none());

        let element = crate::node::Document::document_element(&doc).unwrap();
        assert!(as_element(&element).is_some());
        assert!(as_document(&element).is_none());
    }
}
