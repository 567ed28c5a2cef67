/*!
`Namespaced`: a convenience trait over [`Element`] that exposes the
`lookupNamespaceURI`/`lookupPrefix`/`isDefaultNamespace` algorithms in
[`crate::tree::namespace`] as ordinary methods, so a caller walking a tree
doesn't have to reach for the free functions directly.
*/

use crate::node::{Element, Node, RefNode};
use crate::tree::namespace;

/// Namespace-lookup convenience methods for any node that can appear in an
/// element/attribute position. Implemented for [`RefNode`] directly rather
/// than bounded on [`Element`], since an `Attr` needs the same lookups
/// started from its owner element.
pub trait Namespaced {
    /// The namespace URI bound to `prefix` in scope at this node, walking up
    /// through ancestor `xmlns`/`xmlns:*` declarations. `prefix = None` looks
    /// up the default namespace.
    fn lookup_namespace_uri(&self, prefix: Option<&str>) -> Option<String>;

    /// The first prefix in scope (if any) bound to `namespace_uri`, the
    /// reverse of [`lookup_namespace_uri`](Namespaced::lookup_namespace_uri).
    fn lookup_prefix(&self, namespace_uri: &str) -> Option<String>;

    /// Whether `namespace_uri` is this node's in-scope default namespace.
    fn is_default_namespace(&self, namespace_uri: Option<&str>) -> bool;

    /// The `xmlns:prefix`/`xmlns` declarations visible directly on this
    /// element, without walking to its ancestors. Empty for any node kind
    /// other than `Element`.
    fn own_namespace_declarations(&self) -> Vec<(Option<String>, String)>;
}

impl Namespaced for RefNode {
    fn lookup_namespace_uri(&self, prefix: Option<&str>) -> Option<String> {
        namespace::lookup_namespace_uri(self, prefix)
    }

    fn lookup_prefix(&self, namespace_uri: &str) -> Option<String> {
        namespace::lookup_prefix(self, namespace_uri)
    }

    fn is_default_namespace(&self, namespace_uri: Option<&str>) -> bool {
        namespace::is_default_namespace(self, namespace_uri)
    }

    fn own_namespace_declarations(&self) -> Vec<(Option<String>, String)> {
        if self.node_type() != crate::node::NodeType::Element {
            return Vec::new();
        }
        Element::attributes(self)
            .into_iter()
            .filter_map(|attr| {
                let name = attr.name();
                let is_default = name.prefix().is_none() && name.local_name() == crate::syntax::XMLNS_NS_ATTRIBUTE;
                let is_prefixed = name.prefix().as_deref() == Some(crate::syntax::XMLNS_NS_ATTRIBUTE);
                if is_default {
                    Some((None, crate::node::Attribute::value(&attr)))
                } else if is_prefixed {
                    Some((Some(name.local_name().clone()), crate::node::Attribute::value(&attr)))
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom_impl::get_implementation;
    use crate::node::{Document, Element, Node};

    #[test]
    fn looks_up_default_namespace_from_ancestor() {
        let doc = get_implementation()
            .create_document(Some("urn:example"), Some("root"), None)
            .unwrap();
        let mut root = Document::document_element(&doc).unwrap();
        let child = Document::create_element(&doc, "child").unwrap();
        root.append_child(child.clone()).unwrap();

        assert_eq!(child.lookup_namespace_uri(None), Some("urn:example".to_string()));
        assert!(child.is_default_namespace(Some("urn:example")));
    }

    #[test]
    fn looks_up_default_namespace_declared_on_the_node_itself() {
        let doc = get_implementation()
            .create_document(Some("urn:example"), Some("root"), None)
            .unwrap();
        let root = Document::document_element(&doc).unwrap();

        assert_eq!(root.lookup_namespace_uri(None), Some("urn:example".to_string()));
    }

    #[test]
    fn the_well_known_xml_and_xmlns_prefixes_resolve_without_a_declaration() {
        let doc = get_implementation().create_document(None, Some("root"), None).unwrap();
        let root = Document::document_element(&doc).unwrap();

        assert_eq!(
            root.lookup_namespace_uri(Some("xml")),
            Some("http://www.w3.org/XML/1998/namespace".to_string())
        );
        assert_eq!(
            root.lookup_namespace_uri(Some("xmlns")),
            Some("http://www.w3.org/2000/xmlns/".to_string())
        );
    }

    #[test]
    fn reports_prefixed_declarations_on_the_element_itself() {
        let doc = get_implementation().create_document(None, Some("root"), None).unwrap();
        let mut root = Document::document_element(&doc).unwrap();
        Element::set_attribute_ns(&mut root, "http://www.w3.org/2000/xmlns/", "xmlns:a", "urn:a").unwrap();

        let decls = root.own_namespace_declarations();
        assert_eq!(decls, vec![(Some("a".to_string()), "urn:a".to_string())]);
        assert_eq!(root.lookup_prefix("urn:a"), Some("a".to_string()));
    }
}
