/*!
Capability traits over [`RefNode`](super::RefNode), one per DOM interface.
Every trait is implemented once, in [`super::trait_impls`], by matching on the
node's [`NodeType`](super::NodeType) tag — this is the "small set of
trait/interface capabilities" the design notes ask for in place of deep
inheritance.
*/

use crate::config::Configuration;
use crate::error::{DOMResult, Location};
use crate::name::Name;
use crate::node::{AttributeDeclaration, ContentModelKind, NodeType, RefNode};

// ------------------------------------------------------------------------------------------------

///
/// The DOM `Node` interface: every node kind implements this.
///
pub trait Node {
    fn node_type(&self) -> NodeType;
    fn name(&self) -> Name;
    fn node_value(&self) -> Option<String>;
    fn set_node_value(&mut self, value: &str) -> DOMResult<()>;

    fn parent_node(&self) -> Option<RefNode>;
    fn child_nodes(&self) -> Vec<RefNode>;
    fn first_child(&self) -> Option<RefNode>;
    fn last_child(&self) -> Option<RefNode>;
    fn previous_sibling(&self) -> Option<RefNode>;
    fn next_sibling(&self) -> Option<RefNode>;
    fn owner_document(&self) -> Option<RefNode>;
    fn has_child_nodes(&self) -> bool {
        !self.child_nodes().is_empty()
    }

    /// The single internal operation behind `appendChild`/`insertBefore`/
    /// `replaceChild`/`removeChild`: `new_child = None` with
    /// `old_child = Some` removes; `ref_child = None` appends.
    fn splice_child(
        &mut self,
        new_child: Option<RefNode>,
        old_child: Option<&RefNode>,
        ref_child: Option<&RefNode>,
    ) -> DOMResult<Option<RefNode>>;

    fn insert_before(&mut self, new_child: RefNode, ref_child: Option<&RefNode>) -> DOMResult<RefNode> {
        self.splice_child(Some(new_child), None, ref_child)
            .map(|n| n.expect("insert always returns the inserted node"))
    }

    fn replace_child(&mut self, new_child: RefNode, old_child: &RefNode) -> DOMResult<RefNode> {
        self.splice_child(Some(new_child), Some(old_child), None)
            .map(|n| n.expect("replace always returns the displaced node"))
    }

    fn append_child(&mut self, new_child: RefNode) -> DOMResult<RefNode> {
        self.splice_child(Some(new_child), None, None)
            .map(|n| n.expect("append always returns the inserted node"))
    }

    fn remove_child(&mut self, old_child: &RefNode) -> DOMResult<RefNode> {
        self.splice_child(None, Some(old_child), None)
            .map(|n| n.expect("remove always returns the removed node"))
    }

    fn text_content(&self) -> Option<String>;
    fn set_text_content(&mut self, value: &str) -> DOMResult<()>;

    fn is_equal_node(&self, other: &RefNode) -> bool;
    fn lookup_namespace_uri(&self, prefix: Option<&str>) -> Option<String>;
    fn lookup_prefix(&self, namespace_uri: &str) -> Option<String>;
    fn is_default_namespace(&self, namespace_uri: Option<&str>) -> bool;
    fn compare_document_position(&self, other: &RefNode) -> u16;

    fn clone_node(&self, deep: bool) -> RefNode;
    fn normalize(&mut self);

    fn is_readonly(&self) -> bool;
    fn sequence(&self) -> u64;

    fn is_supported(&self, feature: &str, version: &str) -> bool {
        crate::dom_impl::get_implementation().has_feature(feature, version)
    }

    fn location(&self) -> Option<Location>;
}

///
/// The DOM `Document` interface.
///
pub trait Document: Node {
    fn create_element(&self, tag_name: &str) -> DOMResult<RefNode>;
    fn create_element_ns(&self, namespace_uri: &str, qualified_name: &str) -> DOMResult<RefNode>;
    fn create_document_fragment(&self) -> RefNode;
    fn create_text_node(&self, data: &str) -> RefNode;
    fn create_comment(&self, data: &str) -> RefNode;
    fn create_cdata_section(&self, data: &str) -> DOMResult<RefNode>;
    fn create_processing_instruction(&self, target: &str, data: &str) -> DOMResult<RefNode>;
    fn create_attribute(&self, name: &str) -> DOMResult<RefNode>;
    fn create_attribute_ns(&self, namespace_uri: &str, qualified_name: &str) -> DOMResult<RefNode>;
    fn create_entity_reference(&self, name: &str) -> DOMResult<RefNode>;

    fn document_element(&self) -> Option<RefNode>;
    fn doc_type(&self) -> Option<RefNode>;
    fn get_elements_by_tag_name(&self, tag_name: &str) -> Vec<RefNode>;
    fn get_elements_by_tag_name_ns(&self, namespace_uri: &str, local_name: &str) -> Vec<RefNode>;
    fn get_element_by_id(&self, id: &str) -> Option<RefNode>;

    fn import_node(&self, imported: &RefNode, deep: bool) -> DOMResult<RefNode>;
    fn adopt_node(&self, source: &RefNode) -> DOMResult<RefNode>;
    fn normalize_document(&mut self);
    fn rename_node(&self, node: &RefNode, namespace_uri: Option<&str>, qualified_name: &str) -> DOMResult<RefNode>;

    fn xml_version(&self) -> String;
    fn set_xml_version(&mut self, version: &str) -> DOMResult<()>;
    fn xml_standalone(&self) -> bool;
    fn set_xml_standalone(&mut self, standalone: bool);
    fn xml_encoding(&self) -> Option<String>;
    fn input_encoding(&self) -> Option<String>;
    fn document_uri(&self) -> Option<String>;
    fn set_document_uri(&mut self, uri: Option<&str>);
    fn strict_error_checking(&self) -> bool;
    fn set_strict_error_checking(&mut self, value: bool);

    /// `Document.domConfig`: the configuration consulted by
    /// `normalizeDocument` and handed to a [`crate::serializer::Serializer`]
    /// writing this document. Returns a clone; mutate it and write it back
    /// with [`Self::set_dom_config`].
    fn dom_config(&self) -> Configuration;
    fn set_dom_config(&mut self, config: Configuration);
}

///
/// The DOM `DocumentFragment` interface.
///
pub trait DocumentFragmentNode: Node {}

///
/// The DOM `Element` interface.
///
pub trait Element: Node {
    fn tag_name(&self) -> String;
    fn get_attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&mut self, name: &str, value: &str) -> DOMResult<()>;
    fn remove_attribute(&mut self, name: &str) -> DOMResult<()>;
    fn get_attribute_node(&self, name: &str) -> Option<RefNode>;
    fn set_attribute_node(&mut self, new_attribute: RefNode) -> DOMResult<Option<RefNode>>;
    fn remove_attribute_node(&mut self, old_attribute: &RefNode) -> DOMResult<RefNode>;

    fn get_attribute_ns(&self, namespace_uri: &str, local_name: &str) -> Option<String>;
    fn set_attribute_ns(&mut self, namespace_uri: &str, qualified_name: &str, value: &str) -> DOMResult<()>;
    fn remove_attribute_ns(&mut self, namespace_uri: &str, local_name: &str) -> DOMResult<()>;
    fn get_attribute_node_ns(&self, namespace_uri: &str, local_name: &str) -> Option<RefNode>;
    fn set_attribute_node_ns(&mut self, new_attribute: RefNode) -> DOMResult<Option<RefNode>>;

    fn has_attribute(&self, name: &str) -> bool;
    fn has_attribute_ns(&self, namespace_uri: &str, local_name: &str) -> bool;
    fn has_attributes(&self) -> bool;
    fn attributes(&self) -> Vec<RefNode>;

    fn get_elements_by_tag_name(&self, tag_name: &str) -> Vec<RefNode>;
    fn get_elements_by_tag_name_ns(&self, namespace_uri: &str, local_name: &str) -> Vec<RefNode>;

    /// Extension-kind lookup: the element declaration (if any) for this
    /// element's name in the owner document's doctype, used for
    /// element-content-whitespace detection and default-attribute
    /// maintenance.
    fn declared_content_model(&self) -> Option<ContentModelKind>;
}

///
/// The DOM `Attr` interface.
///
pub trait Attribute: Node {
    fn value(&self) -> String;
    fn set_value(&mut self, value: &str) -> DOMResult<()>;
    fn specified(&self) -> bool;
    fn set_specified(&mut self, specified: bool);
    fn owner_element(&self) -> Option<RefNode>;
    fn is_id(&self) -> bool;
}

///
/// The DOM `CharacterData` interface, shared by `Text`, `Comment`,
/// `CDATASection`.
///
pub trait CharacterData: Node {
    fn data(&self) -> String;
    fn set_data(&mut self, data: &str) -> DOMResult<()>;
    fn length(&self) -> usize {
        self.data().chars().count()
    }
    fn substring_data(&self, offset: usize, count: usize) -> DOMResult<String>;
    fn append_data(&mut self, data: &str) -> DOMResult<()>;
    fn insert_data(&mut self, offset: usize, data: &str) -> DOMResult<()>;
    fn delete_data(&mut self, offset: usize, count: usize) -> DOMResult<()>;
    fn replace_data(&mut self, offset: usize, count: usize, data: &str) -> DOMResult<()>;
}

///
/// The DOM `Text` interface.
///
pub trait Text: CharacterData {
    fn split_text(&mut self, offset: usize) -> DOMResult<RefNode>;
    fn is_element_content_whitespace(&self) -> bool;
    fn whole_text(&self) -> String;
    fn replace_whole_text(&mut self, content: &str) -> DOMResult<Option<RefNode>>;
}

///
/// The DOM `CDATASection` interface.
///
pub trait CDataSection: Text {}

///
/// The DOM `Comment` interface.
///
pub trait Comment: CharacterData {}

///
/// The DOM `ProcessingInstruction` interface.
///
pub trait ProcessingInstruction: Node {
    fn target(&self) -> String;
    fn data(&self) -> String;
    fn set_data(&mut self, data: &str) -> DOMResult<()>;
}

///
/// The DOM `EntityReference` interface.
///
pub trait EntityReference: Node {}

///
/// The DOM `Entity` interface.
///
pub trait Entity: Node {
    fn public_id(&self) -> Option<String>;
    fn system_id(&self) -> Option<String>;
    fn notation_name(&self) -> Option<String>;
    fn input_encoding(&self) -> Option<String>;
}

///
/// The DOM `Notation` interface.
///
pub trait Notation: Node {
    fn public_id(&self) -> Option<String>;
    fn system_id(&self) -> Option<String>;
}

///
/// The DOM `DocumentType` interface.
///
pub trait DocumentType: Node {
    fn public_id(&self) -> Option<String>;
    fn system_id(&self) -> Option<String>;
    fn internal_subset(&self) -> Option<String>;
    fn entities(&self) -> Vec<RefNode>;
    fn notations(&self) -> Vec<RefNode>;
    fn get_entity(&self, name: &str) -> Option<RefNode>;
    fn get_notation(&self, name: &str) -> Option<RefNode>;
    fn get_element_declaration(&self, element_name: &str) -> Option<ContentModelKind>;
    fn get_attribute_declarations(&self, element_name: &str) -> Vec<AttributeDeclaration>;
}
