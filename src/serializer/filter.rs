/*!
The `LSSerializerFilter` contract: a caller-supplied object consulted
as the serializer is about to emit a node, able to accept, discard, or
splice it out — the output-side mirror of [`crate::parser::filter`].
*/

use crate::node::{NodeType, RefNode};

pub use crate::parser::filter::what_to_show;

fn show_bit(node_type: NodeType) -> u32 {
    use what_to_show::*;
    match node_type {
        NodeType::Element => ELEMENT,
        NodeType::Attribute => ATTRIBUTE,
        NodeType::Text => TEXT,
        NodeType::CData => CDATA_SECTION,
        NodeType::EntityReference => ENTITY_REFERENCE,
        NodeType::Entity => ENTITY,
        NodeType::ProcessingInstruction => PROCESSING_INSTRUCTION,
        NodeType::Comment => COMMENT,
        NodeType::Document => DOCUMENT,
        NodeType::DocumentType => DOCUMENT_TYPE,
        NodeType::DocumentFragment => DOCUMENT_FRAGMENT,
        NodeType::Notation => NOTATION,
        NodeType::ElementDeclaration | NodeType::AttributeListDeclaration => 0,
    }
}

/// Result of consulting a filter about one node on the way out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterAction {
    /// Emit the node as usual.
    Accept,
    /// Drop the node and everything under it.
    Reject,
    /// Drop the node's own tags but still emit its children in its place
    /// (only meaningful for container kinds; a leaf node behaves like
    /// `Reject`).
    Skip,
    /// Stop serializing now; whatever has already been written is still
    /// returned.
    Interrupt,
}

/// A serializer-supplied filter, consulted once per node (including
/// non-`xmlns` attributes) before it is written.
pub trait SerializerFilter {
    /// `0` (the default) asks to see every node kind; any other value is a
    /// `what_to_show` bitmask.
    fn what_to_show(&self) -> u32 {
        0
    }

    fn accept_node(&self, node: &RefNode) -> FilterAction {
        let _ = node;
        FilterAction::Accept
    }

    /// Whether this filter wants to be consulted at all for `node_type`,
    /// honoring `what_to_show`.
    fn interested_in(&self, node_type: NodeType) -> bool {
        let mask = self.what_to_show();
        mask == 0 || mask & show_bit(node_type) != 0
    }
}

/// The no-op filter used when a caller supplies none: every node is kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAllFilter;

impl SerializerFilter for AcceptAllFilter {}

#[cfg(test)]
mod tests {
    use super::*;

    struct RejectComments;
    impl SerializerFilter for RejectComments {
        fn what_to_show(&self) -> u32 {
            what_to_show::COMMENT
        }
        fn accept_node(&self, _node: &RefNode) -> FilterAction {
            FilterAction::Reject
        }
    }

    #[test]
    fn interested_in_honors_mask() {
        let filter = RejectComments;
        assert!(filter.interested_in(NodeType::Comment));
        assert!(!filter.interested_in(NodeType::Element));
    }

    #[test]
    fn accept_all_never_rejects() {
        let filter = AcceptAllFilter;
        assert!(filter.interested_in(NodeType::Element));
        assert!(filter.interested_in(NodeType::Comment));
    }
}
