/*!
The `DOMImplementation` bootstrap: the single entry point for creating a
detached `Document`/`DocumentType`, and the `hasFeature` feature-string table.
*/

use crate::config::Configuration;
use crate::error::{DOMResult, Error};
use crate::name::Name;
use crate::node::{NodeData, NodeImpl, NodeType, RefNode};
use std::collections::HashMap;

/// Supported `hasFeature` strings and the versions recognized for each,
/// grounded in the feature table the Core and Load/Save recommendations
/// define.
const FEATURES: &[(&str, &[&str])] = &[
    ("Core", &["1.0", "2.0", "3.0"]),
    ("XML", &["1.0", "2.0", "3.0"]),
    ("LS", &["3.0"]),
];

#[derive(Clone, Copy, Debug)]
pub struct Implementation;

impl Implementation {
    pub fn has_feature(&self, feature: &str, version: &str) -> bool {
        FEATURES.iter().any(|(name, versions)| {
            name.eq_ignore_ascii_case(feature) && (version.is_empty() || versions.contains(&version))
        })
    }

    /// Creates a detached `DocumentType` node, usable either standalone or
    /// passed to [`Self::create_document`].
    pub fn create_document_type(
        &self,
        qualified_name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> DOMResult<RefNode> {
        let name = Name::for_qualified_name(qualified_name)?;
        let data = NodeData::DocumentType {
            public_id: public_id.map(str::to_string),
            system_id: system_id.map(str::to_string),
            internal_subset: None,
            entities: HashMap::new(),
            notations: HashMap::new(),
            elements: HashMap::new(),
            attlists: HashMap::new(),
        };
        Ok(RefNode::new(NodeImpl::new(NodeType::DocumentType, name, data)))
    }

    /// Creates a new `Document`, optionally with a document element and/or a
    /// doctype (which is adopted into the new document, not copied).
    pub fn create_document(
        &self,
        namespace_uri: Option<&str>,
        qualified_name: Option<&str>,
        doc_type: Option<RefNode>,
    ) -> DOMResult<RefNode> {
        use crate::node::Node;

        let data = NodeData::Document {
            config: Box::new(Configuration::default()),
            xml_version: "1.0".to_string(),
            xml_encoding: None,
            xml_standalone: false,
            input_encoding: None,
            document_uri: None,
            strict_error_checking: true,
        };
        let document = RefNode::new(NodeImpl::new(NodeType::Document, Name::for_document(), data));

        if let Some(dt) = doc_type {
            if dt.parent_node().is_some() {
                return Err(Error::WrongDocument);
            }
            dt.borrow_mut().owner_document = Some(document.downgrade());
            dt.borrow_mut().parent = Some(document.downgrade());
            document.borrow_mut().children.push(dt);
        }

        if let Some(qname) = qualified_name {
            if !qname.is_empty() {
                use crate::node::Document;
                let element = match namespace_uri {
                    Some(uri) => document.create_element_ns(uri, qname)?,
                    None => document.create_element(qname)?,
                };
                element.borrow_mut().parent = Some(document.downgrade());
                document.borrow_mut().children.push(element);
            }
        }

        Ok(document)
    }
}

/// Returns the crate's single `DOMImplementation`. There is exactly one
/// implementation and it carries no state, so this is a zero-sized handle
/// rather than a singleton requiring synchronization.
pub fn get_implementation() -> Implementation {
    Implementation
}

pub fn get_implementation_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParamValue;
    use crate::error::{DOMError, ErrorHandler};
    use crate::node::{Document, Node};
    use std::cell::RefCell;

    #[test]
    fn a_second_document_element_is_rejected() {
        let mut doc = get_implementation().create_document(None, Some("root"), None).unwrap();
        let second = Document::create_element(&doc, "intruder").unwrap();
        assert!(matches!(doc.append_child(second), Err(Error::HierarchyRequest)));
    }

    #[test]
    fn a_second_doctype_is_rejected() {
        let dt1 = get_implementation()
            .create_document_type("root", None, None)
            .unwrap();
        let dt2 = get_implementation()
            .create_document_type("root", None, None)
            .unwrap();
        let mut doc = get_implementation()
            .create_document(None, None, Some(dt1))
            .unwrap();
        assert!(matches!(doc.append_child(dt2), Err(Error::HierarchyRequest)));
    }

    #[test]
    fn replacing_the_document_element_is_still_allowed() {
        let mut doc = get_implementation().create_document(None, Some("root"), None).unwrap();
        let old = Document::document_element(&doc).unwrap();
        let new = Document::create_element(&doc, "replacement").unwrap();
        doc.replace_child(new.clone(), &old).unwrap();
        assert!(Document::document_element(&doc).unwrap().ptr_eq(&new));
    }

    #[test]
    fn replacing_a_node_with_its_own_later_sibling_keeps_the_remaining_order() {
        let doc = get_implementation().create_document(None, Some("root"), None).unwrap();
        let mut root = Document::document_element(&doc).unwrap();
        let a = Document::create_element(&doc, "a").unwrap();
        let b = Document::create_element(&doc, "b").unwrap();
        let c = Document::create_element(&doc, "c").unwrap();
        root.append_child(a.clone()).unwrap();
        root.append_child(b.clone()).unwrap();
        root.append_child(c.clone()).unwrap();

        // b already immediately follows a; replacing a with b should just
        // collapse the two into b, c, with b left exactly where a was.
        root.replace_child(b.clone(), &a).unwrap();

        let remaining: Vec<RefNode> = root.child_nodes();
        assert_eq!(remaining.len(), 2);
        assert!(remaining[0].ptr_eq(&b));
        assert!(remaining[1].ptr_eq(&c));
    }

    #[test]
    fn replacing_with_a_non_adjacent_earlier_sibling_moves_it_into_place() {
        let doc = get_implementation().create_document(None, Some("root"), None).unwrap();
        let mut root = Document::document_element(&doc).unwrap();
        let a = Document::create_element(&doc, "a").unwrap();
        let b = Document::create_element(&doc, "b").unwrap();
        let c = Document::create_element(&doc, "c").unwrap();
        root.append_child(a.clone()).unwrap();
        root.append_child(b.clone()).unwrap();
        root.append_child(c.clone()).unwrap();

        // Replace c with a, which used to sit two positions earlier.
        root.replace_child(a.clone(), &c).unwrap();

        let remaining: Vec<RefNode> = root.child_nodes();
        assert_eq!(remaining.len(), 2);
        assert!(remaining[0].ptr_eq(&b));
        assert!(remaining[1].ptr_eq(&a));
    }

    #[derive(Debug, Default)]
    struct RecordingHandler {
        seen: RefCell<Vec<String>>,
    }

    impl ErrorHandler for RecordingHandler {
        fn handle_error(&self, error: &DOMError) -> bool {
            self.seen.borrow_mut().push(error.message.clone());
            true
        }
    }

    #[test]
    fn a_documents_configuration_can_be_read_changed_and_given_an_error_handler() {
        let mut doc = get_implementation().create_document(None, Some("root"), None).unwrap();
        let mut config = doc.dom_config();
        assert!(config.get_bool("namespaces"));

        config.set_parameter("comments", ParamValue::Bool(false));
        let handler = std::rc::Rc::new(RefCell::new(RecordingHandler::default()));
        config.set_error_handler(Some(handler.clone()));
        doc.set_dom_config(config);

        let roundtripped = doc.dom_config();
        assert!(!roundtripped.get_bool("comments"));
        assert!(roundtripped.error_handler().is_some());
    }
}
