/*!
Default-attribute maintenance: removing an
attribute that has a `#FIXED` or default value declared in the DTD puts the
default value back, with `specified = false`, rather than leaving the
attribute absent.
*/

use crate::node::{AttributeDefault, Document, Element, Node, NodeData, RefNode};

/// Called after an attribute named `local_name` (unqualified) is removed
/// from `element`; re-creates it from the owner document's DTD declaration
/// when one exists and specifies a default.
pub fn remateralize_default(element: &RefNode, name: &str) {
    let owner = match element.owner_document() {
        Some(o) => o,
        None => return,
    };
    let doc_type = match Document::doc_type(&owner) {
        Some(dt) => dt,
        None => return,
    };
    let decls = crate::node::DocumentType::get_attribute_declarations(&doc_type, &element.tag_name());
    let decl = match decls.iter().find(|d| d.name.qualified_name() == name) {
        Some(d) => d,
        None => return,
    };

    let default_text = match &decl.default {
        AttributeDefault::Fixed(v) | AttributeDefault::Value(v) => v.clone(),
        AttributeDefault::Required | AttributeDefault::Implied => return,
    };

    let mut element = element.clone();
    if Element::has_attribute(&element, name) {
        return;
    }
    if Element::set_attribute(&mut element, name, &default_text).is_ok() {
        if let Some(attr) = Element::get_attribute_node(&element, name) {
            attr.borrow_mut().data = NodeData::Attribute { specified: false };
        }
    }
}
