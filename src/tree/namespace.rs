/*!
`lookupNamespaceURI`/`lookupPrefix`/`isDefaultNamespace`, walking up through
`xmlns`/`xmlns:*` attributes the way the DOM Level 3 Core appendix algorithm
specifies, plus the namespace-fixup pass `normalizeDocument` runs when the
`namespaces` parameter is on.
*/

use crate::node::{Attribute, Document, Element, Node, NodeData, NodeType, RefNode};
use crate::syntax::{SYNTHETIC_PREFIX, XMLNS_NS_ATTRIBUTE, XMLNS_NS_URI, XML_NS_ATTRIBUTE, XML_NS_URI};

/// `Node.lookupNamespaceURI`: the well-known `xml`/`xmlns` prefixes resolve
/// first, then each element from the starting node up to the root is asked
/// whether its own prefix/namespace-URI pair already answers the question
/// before its `xmlns` declarations are consulted. This is the public entry
/// point; [`fixup_element`] needs the declarations-only walk, since the
/// element being fixed up is exactly the one whose own namespace may still
/// be unbound, so it calls [`lookup_namespace_uri_ancestors`] directly
/// instead.
pub fn lookup_namespace_uri(node: &RefNode, prefix: Option<&str>) -> Option<String> {
    if let Some(p) = prefix {
        if let Some(uri) = well_known_prefix_uri(p) {
            return Some(uri.to_string());
        }
    }
    let start = search_start(node)?;
    let mut current = Some(start);
    while let Some(el) = current {
        let name = el.name();
        if name.namespace_uri().is_some() && name.prefix().as_deref() == prefix {
            return name.namespace_uri().clone();
        }
        if let Some(uri) = declared_on(&el, prefix) {
            return Some(uri);
        }
        current = el.parent_node();
    }
    None
}

/// Walks from `node` up through ancestor elements looking for an
/// `xmlns`/`xmlns:prefix` declaration binding `prefix`, with no self-match
/// shortcut and no well-known-prefix resolution.
fn lookup_namespace_uri_ancestors(node: &RefNode, prefix: Option<&str>) -> Option<String> {
    let mut current = Some(node.clone());
    while let Some(el) = current {
        if let Some(uri) = declared_on(&el, prefix) {
            return Some(uri);
        }
        current = el.parent_node();
    }
    None
}

/// The reverse of [`lookup_namespace_uri`]: the first prefix (including no
/// prefix) declared on an ancestor that is bound to `namespace_uri`.
pub fn lookup_prefix(node: &RefNode, namespace_uri: &str) -> Option<String> {
    if namespace_uri.is_empty() {
        return None;
    }
    let start = search_start(node)?;
    let mut current = Some(start);
    while let Some(el) = current {
        if let NodeData::Element { attributes } = &el.borrow().data {
            for (name, attr) in attributes.iter() {
                let is_default = name.local_name() == XMLNS_NS_ATTRIBUTE && name.prefix().is_none();
                let is_prefixed = name.prefix().as_deref() == Some(XMLNS_NS_ATTRIBUTE);
                if (is_default || is_prefixed) && attr.value() == namespace_uri {
                    return if is_default {
                        None
                    } else {
                        Some(name.local_name().clone())
                    };
                }
            }
        }
        current = el.parent_node();
    }
    None
}

pub fn is_default_namespace(node: &RefNode, namespace_uri: Option<&str>) -> bool {
    lookup_namespace_uri(node, None).as_deref() == namespace_uri
}

fn search_start(node: &RefNode) -> Option<RefNode> {
    match node.node_type() {
        NodeType::Attribute => node.owner_element(),
        NodeType::Document => Document::document_element(node),
        _ => Some(node.clone()),
    }
}

fn declared_on(element: &RefNode, prefix: Option<&str>) -> Option<String> {
    if let NodeData::Element { attributes } = &element.borrow().data {
        for (name, attr) in attributes.iter() {
            match prefix {
                None => {
                    if name.local_name() == XMLNS_NS_ATTRIBUTE && name.prefix().is_none() {
                        return Some(attr.value());
                    }
                }
                Some(p) => {
                    if name.prefix().as_deref() == Some(XMLNS_NS_ATTRIBUTE) && name.local_name() == p {
                        return Some(attr.value());
                    }
                }
            }
        }
    }
    None
}

/// The well-known bindings every lookup must honor before consulting
/// attributes: `xml` always binds to the XML namespace, `xmlns` always binds
/// to the XMLNS namespace.
pub fn well_known_prefix_uri(prefix: &str) -> Option<&'static str> {
    match prefix {
        XML_NS_ATTRIBUTE => Some(XML_NS_URI),
        XMLNS_NS_ATTRIBUTE => Some(XMLNS_NS_URI),
        _ => None,
    }
}

/// Namespace-fixup pass run by `normalizeDocument` when the `namespaces`
/// parameter is enabled: ensures every element and attribute with a
/// namespace URI has a prefix bound to it in scope, synthesizing
/// `NS\d+`-style prefixes and `xmlns:*` declarations where none exists.
pub fn fixup(root: &RefNode) {
    let mut counter = 0u32;
    fixup_node(root, &mut counter);
}

fn fixup_node(node: &RefNode, counter: &mut u32) {
    if node.node_type() == NodeType::Element {
        fixup_element(node, counter);
    }
    for child in node.borrow().children.clone() {
        fixup_node(&child, counter);
    }
}

fn fixup_element(element: &RefNode, counter: &mut u32) {
    let uri = element.name().namespace_uri().clone();
    if let Some(uri) = uri {
        if well_known_prefix_uri(element.name().prefix().as_deref().unwrap_or("")).is_none()
            && lookup_namespace_uri_ancestors(element, element.name().prefix().as_deref()).as_deref()
                != Some(uri.as_str())
        {
            ensure_binding(element, element.name().prefix().as_deref(), &uri, counter);
        }
    }

    let attrs = match &element.borrow().data {
        NodeData::Element { attributes } => attributes.values(),
        _ => Vec::new(),
    };
    for attr in attrs {
        let name = attr.name();
        if name.prefix().as_deref() == Some(XMLNS_NS_ATTRIBUTE) || name.local_name() == XMLNS_NS_ATTRIBUTE {
            continue;
        }
        if let Some(uri) = name.namespace_uri().clone() {
            if lookup_namespace_uri_ancestors(element, name.prefix().as_deref()).as_deref() != Some(uri.as_str()) {
                ensure_binding(element, name.prefix().as_deref(), &uri, counter);
            }
        }
    }
}

fn ensure_binding(element: &RefNode, prefix: Option<&str>, uri: &str, counter: &mut u32) {
    let owner = match element.owner_document() {
        Some(o) => o,
        None => return,
    };
    let prefix = match prefix {
        Some(p) => p.to_string(),
        None => {
            *counter += 1;
            format!("{}{}", SYNTHETIC_PREFIX, counter)
        }
    };
    let attr_name = format!("xmlns:{}", prefix);
    let mut el = element.clone();
    let _ = Element::set_attribute_ns(&mut el, XMLNS_NS_URI, &attr_name, uri);
    let _ = owner;
}
