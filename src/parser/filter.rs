/*!
The `LSParserFilter` contract: a caller-supplied object consulted
as each element starts and as every other node kind is about to be
attached, able to accept, discard, splice out, or abort construction.
*/

use crate::node::{NodeType, RefNode};

/// Bitmask of node kinds a filter wants to see, mirroring `whatToShow`.
/// A filter that returns `0` from [`ParserFilter::what_to_show`] is
/// consulted for every node kind (the LS default).
pub mod what_to_show {
    pub const ELEMENT: u32 = 0x1;
    pub const ATTRIBUTE: u32 = 0x2;
    pub const TEXT: u32 = 0x4;
    pub const CDATA_SECTION: u32 = 0x8;
    pub const ENTITY_REFERENCE: u32 = 0x10;
    pub const ENTITY: u32 = 0x20;
    pub const PROCESSING_INSTRUCTION: u32 = 0x40;
    pub const COMMENT: u32 = 0x80;
    pub const DOCUMENT: u32 = 0x100;
    pub const DOCUMENT_TYPE: u32 = 0x200;
    pub const DOCUMENT_FRAGMENT: u32 = 0x400;
    pub const NOTATION: u32 = 0x800;
    pub const ALL: u32 = 0xFFFF_FFFF;
}

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

/// Result of consulting a filter about one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterAction {
    /// Keep the node as constructed.
    Accept,
    /// Discard the node and everything under it.
    Reject,
    /// Discard the node itself but splice its already-built children into
    /// its place (only meaningful for `start_element`; an already-leaf node
    /// behaves like `Reject`).
    Skip,
    /// Stop parsing now; the partial tree built so far is still returned.
    Interrupt,
}

/// A parser-supplied filter. `start_element` is consulted as soon
/// as an element's attributes are attached, before its children are parsed;
/// `accept_node` is consulted for every other node kind (and, after the
/// fact, for elements whose children have all been parsed) once it is fully
/// built but before it is attached to its parent.
pub trait ParserFilter {
    /// `0` (the default) asks to see every node kind; any other value is a
    /// `what_to_show` bitmask.
    fn what_to_show(&self) -> u32 {
        0
    }

    fn start_element(&self, element: &RefNode) -> FilterAction {
        let _ = element;
        FilterAction::Accept
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

impl ParserFilter for AcceptAllFilter {}
