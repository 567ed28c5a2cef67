/*!
Concrete implementations of every capability trait in [`super::traits`], all
on [`RefNode`] — dispatch between node kinds is an explicit match on
[`NodeType`], never an open-class extension.
*/

use crate::config::Configuration;
use crate::error::{DOMResult, Error, Location};
use crate::name::Name;
use crate::node::mutate::{bump_sequence, splice};
use crate::node::traits::*;
use crate::node::{
    AttributeDeclaration, AttributeMap, ContentModelKind, NodeData, NodeType, RefNode,
};
use crate::tree;

// ------------------------------------------------------------------------------------------------
// Node
// ------------------------------------------------------------------------------------------------

impl Node for RefNode {
    fn node_type(&self) -> NodeType {
        self.borrow().node_type
    }

    fn name(&self) -> Name {
        self.borrow().name.clone()
    }

    fn node_value(&self) -> Option<String> {
        match &self.borrow().data {
            NodeData::CharacterData(s) => Some(s.clone()),
            NodeData::ProcessingInstruction { data } => Some(data.clone()),
            _ => None,
        }
    }

    fn set_node_value(&mut self, value: &str) -> DOMResult<()> {
        if self.is_readonly() {
            return Err(Error::NoModificationAllowed);
        }
        match &mut self.borrow_mut().data {
            NodeData::CharacterData(s) => {
                *s = value.to_string();
                Ok(())
            }
            NodeData::ProcessingInstruction { data } => {
                *data = value.to_string();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn parent_node(&self) -> Option<RefNode> {
        match self.node_type() {
            NodeType::Attribute
            | NodeType::Entity
            | NodeType::Notation
            | NodeType::Document
            | NodeType::ElementDeclaration
            | NodeType::AttributeListDeclaration => None,
            _ => self.borrow().parent.clone().and_then(|w| w.upgrade()),
        }
    }

    fn child_nodes(&self) -> Vec<RefNode> {
        self.borrow().children.clone()
    }

    fn first_child(&self) -> Option<RefNode> {
        self.borrow().children.first().cloned()
    }

    fn last_child(&self) -> Option<RefNode> {
        self.borrow().children.last().cloned()
    }

    fn previous_sibling(&self) -> Option<RefNode> {
        let parent = self.borrow().parent.clone()?.upgrade()?;
        let siblings = parent.borrow().children.clone();
        let idx = siblings.iter().position(|c| c.ptr_eq(self))?;
        if idx == 0 {
            None
        } else {
            Some(siblings[idx - 1].clone())
        }
    }

    fn next_sibling(&self) -> Option<RefNode> {
        let parent = self.borrow().parent.clone()?.upgrade()?;
        let siblings = parent.borrow().children.clone();
        let idx = siblings.iter().position(|c| c.ptr_eq(self))?;
        siblings.get(idx + 1).cloned()
    }

    fn owner_document(&self) -> Option<RefNode> {
        self.borrow().owner_document.clone().and_then(|w| w.upgrade())
    }

    fn splice_child(
        &mut self,
        new_child: Option<RefNode>,
        old_child: Option<&RefNode>,
        ref_child: Option<&RefNode>,
    ) -> DOMResult<Option<RefNode>> {
        splice(self, new_child, old_child, ref_child)
    }

    fn text_content(&self) -> Option<String> {
        tree::text_content(self)
    }

    fn set_text_content(&mut self, value: &str) -> DOMResult<()> {
        tree::set_text_content(self, value)
    }

    fn is_equal_node(&self, other: &RefNode) -> bool {
        tree::equality::is_equal_node(self, other)
    }

    fn lookup_namespace_uri(&self, prefix: Option<&str>) -> Option<String> {
        tree::namespace::lookup_namespace_uri(self, prefix)
    }

    fn lookup_prefix(&self, namespace_uri: &str) -> Option<String> {
        tree::namespace::lookup_prefix(self, namespace_uri)
    }

    fn is_default_namespace(&self, namespace_uri: Option<&str>) -> bool {
        tree::namespace::is_default_namespace(self, namespace_uri)
    }

    fn compare_document_position(&self, other: &RefNode) -> u16 {
        tree::position::compare_document_position(self, other)
    }

    fn clone_node(&self, deep: bool) -> RefNode {
        tree::clone::clone_node(self, deep)
    }

    fn normalize(&mut self) {
        tree::normalize::normalize_node(self);
    }

    fn is_readonly(&self) -> bool {
        self.borrow().readonly
    }

    fn sequence(&self) -> u64 {
        self.borrow().sequence
    }

    fn location(&self) -> Option<Location> {
        self.borrow().location
    }
}


// ------------------------------------------------------------------------------------------------
// Document
// ------------------------------------------------------------------------------------------------

impl Document for RefNode {
    fn create_element(&self, tag_name: &str) -> DOMResult<RefNode> {
        let name = Name::for_qualified_name(tag_name)?;
        Ok(new_owned_node(
            self,
            NodeType::Element,
            name,
            NodeData::Element {
                attributes: AttributeMap::new(),
            },
        ))
    }

    fn create_element_ns(&self, namespace_uri: &str, qualified_name: &str) -> DOMResult<RefNode> {
        let name = Name::new_ns(namespace_uri, qualified_name)?;
        Ok(new_owned_node(
            self,
            NodeType::Element,
            name,
            NodeData::Element {
                attributes: AttributeMap::new(),
            },
        ))
    }

    fn create_document_fragment(&self) -> RefNode {
        new_owned_node(
            self,
            NodeType::DocumentFragment,
            Name::for_document_fragment(),
            NodeData::DocumentFragment,
        )
    }

    fn create_text_node(&self, data: &str) -> RefNode {
        new_owned_node(
            self,
            NodeType::Text,
            Name::for_text(),
            NodeData::CharacterData(data.to_string()),
        )
    }

    fn create_comment(&self, data: &str) -> RefNode {
        new_owned_node(
            self,
            NodeType::Comment,
            Name::for_comment(),
            NodeData::CharacterData(data.to_string()),
        )
    }

    fn create_cdata_section(&self, data: &str) -> DOMResult<RefNode> {
        Ok(new_owned_node(
            self,
            NodeType::CData,
            Name::for_cdata(),
            NodeData::CharacterData(data.to_string()),
        ))
    }

    fn create_processing_instruction(&self, target: &str, data: &str) -> DOMResult<RefNode> {
        let name = Name::for_qualified_name(target)?;
        Ok(new_owned_node(
            self,
            NodeType::ProcessingInstruction,
            name,
            NodeData::ProcessingInstruction {
                data: data.to_string(),
            },
        ))
    }

    fn create_attribute(&self, name: &str) -> DOMResult<RefNode> {
        let name = Name::for_qualified_name(name)?;
        Ok(new_owned_node(
            self,
            NodeType::Attribute,
            name,
            NodeData::Attribute { specified: true },
        ))
    }

    fn create_attribute_ns(&self, namespace_uri: &str, qualified_name: &str) -> DOMResult<RefNode> {
        let name = Name::new_ns(namespace_uri, qualified_name)?;
        Ok(new_owned_node(
            self,
            NodeType::Attribute,
            name,
            NodeData::Attribute { specified: true },
        ))
    }

    fn create_entity_reference(&self, name: &str) -> DOMResult<RefNode> {
        // Left mutable: the parser populates the replacement-content children
        // before marking the subtree readonly via `tree::clone::mark_readonly`.
        let name = Name::for_qualified_name(name)?;
        Ok(new_owned_node(self, NodeType::EntityReference, name, NodeData::EntityReference))
    }

    fn document_element(&self) -> Option<RefNode> {
        self.borrow()
            .children
            .iter()
            .find(|c| c.borrow().node_type == NodeType::Element)
            .cloned()
    }

    fn doc_type(&self) -> Option<RefNode> {
        self.borrow()
            .children
            .iter()
            .find(|c| c.borrow().node_type == NodeType::DocumentType)
            .cloned()
    }

    fn get_elements_by_tag_name(&self, tag_name: &str) -> Vec<RefNode> {
        tree::live_list::by_tag_name(self, None, tag_name)
    }

    fn get_elements_by_tag_name_ns(&self, namespace_uri: &str, local_name: &str) -> Vec<RefNode> {
        tree::live_list::by_tag_name(self, Some(namespace_uri), local_name)
    }

    fn get_element_by_id(&self, id: &str) -> Option<RefNode> {
        fn walk(node: &RefNode, id: &str) -> Option<RefNode> {
            if node.borrow().node_type == NodeType::Element {
                if let NodeData::Element { attributes } = &node.borrow().data {
                    if let Some(attr) = attributes.get(None, "id") {
                        if Attribute::value(&attr) == id {
                            return Some(node.clone());
                        }
                    }
                }
            }
            for child in node.borrow().children.clone() {
                if let Some(found) = walk(&child, id) {
                    return Some(found);
                }
            }
            None
        }
        walk(self, id)
    }

    fn import_node(&self, imported: &RefNode, deep: bool) -> DOMResult<RefNode> {
        tree::clone::import_node(self, imported, deep)
    }

    fn adopt_node(&self, source: &RefNode) -> DOMResult<RefNode> {
        tree::clone::adopt_node(self, source)
    }

    fn normalize_document(&mut self) {
        tree::normalize::normalize_document(self);
    }

    fn rename_node(
        &self,
        node: &RefNode,
        namespace_uri: Option<&str>,
        qualified_name: &str,
    ) -> DOMResult<RefNode> {
        let new_name = match namespace_uri {
            Some(uri) => Name::new_ns(uri, qualified_name)?,
            None => Name::for_qualified_name(qualified_name)?,
        };
        if !matches!(node.node_type(), NodeType::Element | NodeType::Attribute) {
            return Err(Error::NotSupported {
                reason: "only Element and Attr nodes can be renamed".to_string(),
            });
        }
        node.borrow_mut().name = new_name;
        Ok(node.clone())
    }

    fn xml_version(&self) -> String {
        match &self.borrow().data {
            NodeData::Document { xml_version, .. } => xml_version.clone(),
            _ => "1.0".to_string(),
        }
    }

    fn set_xml_version(&mut self, version: &str) -> DOMResult<()> {
        if version != "1.0" && version != "1.1" {
            return Err(Error::NotSupported {
                reason: format!("unknown XML version `{}`", version),
            });
        }
        if let NodeData::Document { xml_version, .. } = &mut self.borrow_mut().data {
            *xml_version = version.to_string();
        }
        Ok(())
    }

    fn xml_standalone(&self) -> bool {
        match &self.borrow().data {
            NodeData::Document { xml_standalone, .. } => *xml_standalone,
            _ => false,
        }
    }

    fn set_xml_standalone(&mut self, standalone: bool) {
        if let NodeData::Document { xml_standalone, .. } = &mut self.borrow_mut().data {
            *xml_standalone = standalone;
        }
    }

    fn xml_encoding(&self) -> Option<String> {
        match &self.borrow().data {
            NodeData::Document { xml_encoding, .. } => xml_encoding.clone(),
            _ => None,
        }
    }

    fn input_encoding(&self) -> Option<String> {
        match &self.borrow().data {
            NodeData::Document { input_encoding, .. } => input_encoding.clone(),
            _ => None,
        }
    }

    fn document_uri(&self) -> Option<String> {
        match &self.borrow().data {
            NodeData::Document { document_uri, .. } => document_uri.clone(),
            _ => None,
        }
    }

    fn set_document_uri(&mut self, uri: Option<&str>) {
        if let NodeData::Document { document_uri, .. } = &mut self.borrow_mut().data {
            *document_uri = uri.map(str::to_string);
        }
    }

    fn strict_error_checking(&self) -> bool {
        match &self.borrow().data {
            NodeData::Document {
                strict_error_checking,
                ..
            } => *strict_error_checking,
            _ => true,
        }
    }

    fn set_strict_error_checking(&mut self, value: bool) {
        if let NodeData::Document {
            strict_error_checking,
            ..
        } = &mut self.borrow_mut().data
        {
            *strict_error_checking = value;
        }
    }

    fn dom_config(&self) -> Configuration {
        match &self.borrow().data {
            NodeData::Document { config, .. } => config.as_ref().clone(),
            _ => Configuration::default(),
        }
    }

    fn set_dom_config(&mut self, config: Configuration) {
        if let NodeData::Document { config: doc_config, .. } = &mut self.borrow_mut().data {
            *doc_config = Box::new(config);
        }
    }
}

fn new_owned_node(owner: &RefNode, node_type: NodeType, name: Name, data: NodeData) -> RefNode {
    use crate::node::NodeImpl;
    let node = RefNode::new(NodeImpl::new(node_type, name, data));
    node.borrow_mut().owner_document = Some(owner.downgrade());
    node
}

// ------------------------------------------------------------------------------------------------
// DocumentFragmentNode
// ------------------------------------------------------------------------------------------------

impl DocumentFragmentNode for RefNode {}

// ------------------------------------------------------------------------------------------------
// Element
// ------------------------------------------------------------------------------------------------

impl Element for RefNode {
    fn tag_name(&self) -> String {
        self.name().qualified_name()
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.get_attribute_node(name).map(|a| Attribute::value(&a))
    }

    fn set_attribute(&mut self, name: &str, value: &str) -> DOMResult<()> {
        if self.is_readonly() {
            return Err(Error::NoModificationAllowed);
        }
        let owner = self.owner_document().ok_or(Error::NotSupported {
            reason: "element has no owner document".to_string(),
        })?;
        let attr_name = Name::for_qualified_name(name)?;
        match &mut self.borrow_mut().data {
            NodeData::Element { attributes } => {
                if let Some(existing) = attributes.get_by_qualified_name(name) {
                    existing.borrow_mut().data = NodeData::Attribute { specified: true };
                    existing.borrow_mut().children.clear();
                    let text = owner.create_text_node(value);
                    text.borrow_mut().parent = Some(existing.downgrade());
                    existing.borrow_mut().children.push(text);
                    return Ok(());
                }
                let attr = new_owned_node(&owner, NodeType::Attribute, attr_name.clone(), NodeData::Attribute { specified: true });
                attr.borrow_mut().container = Some(self.downgrade());
                let text = owner.create_text_node(value);
                text.borrow_mut().parent = Some(attr.downgrade());
                attr.borrow_mut().children.push(text);
                attributes.set(attr_name, attr);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn remove_attribute(&mut self, name: &str) -> DOMResult<()> {
        if self.is_readonly() {
            return Err(Error::NoModificationAllowed);
        }
        let removed = match &mut self.borrow_mut().data {
            NodeData::Element { attributes } => attributes
                .get_by_qualified_name(name)
                .and_then(|a| attributes.remove_node(&a)),
            _ => None,
        };
        if removed.is_some() {
            tree::attr_default::remateralize_default(self, name);
            bump_sequence(self);
        }
        Ok(())
    }

    fn get_attribute_node(&self, name: &str) -> Option<RefNode> {
        match &self.borrow().data {
            NodeData::Element { attributes } => attributes.get_by_qualified_name(name),
            _ => None,
        }
    }

    fn set_attribute_node(&mut self, new_attribute: RefNode) -> DOMResult<Option<RefNode>> {
        if self.is_readonly() {
            return Err(Error::NoModificationAllowed);
        }
        if new_attribute
            .borrow()
            .container
            .clone()
            .and_then(|w| w.upgrade())
            .is_some()
        {
            return Err(Error::InUseAttribute);
        }
        new_attribute.borrow_mut().container = Some(self.downgrade());
        let name = new_attribute.name();
        let result = match &mut self.borrow_mut().data {
            NodeData::Element { attributes } => Some(attributes.set(name, new_attribute)),
            _ => None,
        };
        bump_sequence(self);
        Ok(result.flatten())
    }

    fn remove_attribute_node(&mut self, old_attribute: &RefNode) -> DOMResult<RefNode> {
        if self.is_readonly() {
            return Err(Error::NoModificationAllowed);
        }
        let removed = match &mut self.borrow_mut().data {
            NodeData::Element { attributes } => attributes.remove_node(old_attribute),
            _ => None,
        };
        match removed {
            Some(name) => {
                old_attribute.borrow_mut().container = None;
                tree::attr_default::remateralize_default(self, &name.qualified_name());
                bump_sequence(self);
                Ok(old_attribute.clone())
            }
            None => Err(Error::NotFound),
        }
    }

    fn get_attribute_ns(&self, namespace_uri: &str, local_name: &str) -> Option<String> {
        self.get_attribute_node_ns(namespace_uri, local_name)
            .map(|a| Attribute::value(&a))
    }

    fn set_attribute_ns(&mut self, namespace_uri: &str, qualified_name: &str, value: &str) -> DOMResult<()> {
        if self.is_readonly() {
            return Err(Error::NoModificationAllowed);
        }
        let owner = self.owner_document().ok_or(Error::NotSupported {
            reason: "element has no owner document".to_string(),
        })?;
        let attr_name = Name::new_ns(namespace_uri, qualified_name)?;
        match &mut self.borrow_mut().data {
            NodeData::Element { attributes } => {
                if let Some(existing) =
                    attributes.get(Some(namespace_uri), attr_name.local_name())
                {
                    existing.borrow_mut().children.clear();
                    let text = owner.create_text_node(value);
                    text.borrow_mut().parent = Some(existing.downgrade());
                    existing.borrow_mut().children.push(text);
                    existing.borrow_mut().data = NodeData::Attribute { specified: true };
                    return Ok(());
                }
                let attr = new_owned_node(
                    &owner,
                    NodeType::Attribute,
                    attr_name.clone(),
                    NodeData::Attribute { specified: true },
                );
                attr.borrow_mut().container = Some(self.downgrade());
                let text = owner.create_text_node(value);
                text.borrow_mut().parent = Some(attr.downgrade());
                attr.borrow_mut().children.push(text);
                attributes.set(attr_name, attr);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn remove_attribute_ns(&mut self, namespace_uri: &str, local_name: &str) -> DOMResult<()> {
        if self.is_readonly() {
            return Err(Error::NoModificationAllowed);
        }
        let removed = match &mut self.borrow_mut().data {
            NodeData::Element { attributes } => attributes.remove(Some(namespace_uri), local_name),
            _ => None,
        };
        if removed.is_some() {
            bump_sequence(self);
        }
        Ok(())
    }

    fn get_attribute_node_ns(&self, namespace_uri: &str, local_name: &str) -> Option<RefNode> {
        match &self.borrow().data {
            NodeData::Element { attributes } => attributes.get(Some(namespace_uri), local_name),
            _ => None,
        }
    }

    fn set_attribute_node_ns(&mut self, new_attribute: RefNode) -> DOMResult<Option<RefNode>> {
        self.set_attribute_node(new_attribute)
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute_node(name).is_some()
    }

    fn has_attribute_ns(&self, namespace_uri: &str, local_name: &str) -> bool {
        self.get_attribute_node_ns(namespace_uri, local_name).is_some()
    }

    fn has_attributes(&self) -> bool {
        match &self.borrow().data {
            NodeData::Element { attributes } => !attributes.is_empty(),
            _ => false,
        }
    }

    fn attributes(&self) -> Vec<RefNode> {
        match &self.borrow().data {
            NodeData::Element { attributes } => attributes.values(),
            _ => Vec::new(),
        }
    }

    fn get_elements_by_tag_name(&self, tag_name: &str) -> Vec<RefNode> {
        tree::live_list::by_tag_name(self, None, tag_name)
    }

    fn get_elements_by_tag_name_ns(&self, namespace_uri: &str, local_name: &str) -> Vec<RefNode> {
        tree::live_list::by_tag_name(self, Some(namespace_uri), local_name)
    }

    fn declared_content_model(&self) -> Option<ContentModelKind> {
        let owner = self.owner_document()?;
        let doc_type = Document::doc_type(&owner)?;
        DocumentType::get_element_declaration(&doc_type, &self.tag_name())
    }
}

// ------------------------------------------------------------------------------------------------
// Attribute
// ------------------------------------------------------------------------------------------------

impl Attribute for RefNode {
    fn value(&self) -> String {
        self.text_content().unwrap_or_default()
    }

    fn set_value(&mut self, value: &str) -> DOMResult<()> {
        self.set_text_content(value)?;
        self.set_specified(true);
        Ok(())
    }

    fn specified(&self) -> bool {
        match &self.borrow().data {
            NodeData::Attribute { specified } => *specified,
            _ => true,
        }
    }

    fn set_specified(&mut self, specified: bool) {
        if let NodeData::Attribute { specified: s } = &mut self.borrow_mut().data {
            *s = specified;
        }
    }

    fn owner_element(&self) -> Option<RefNode> {
        self.borrow().container.clone().and_then(|w| w.upgrade())
    }

    fn is_id(&self) -> bool {
        self.name().local_name() == "id"
    }
}

// ------------------------------------------------------------------------------------------------
// CharacterData / Text / CDataSection / Comment
// ------------------------------------------------------------------------------------------------

impl CharacterData for RefNode {
    fn data(&self) -> String {
        self.node_value().unwrap_or_default()
    }

    fn set_data(&mut self, data: &str) -> DOMResult<()> {
        self.set_node_value(data)
    }

    fn substring_data(&self, offset: usize, count: usize) -> DOMResult<String> {
        let data = CharacterData::data(self);
        let chars: Vec<char> = data.chars().collect();
        if offset > chars.len() {
            return Err(Error::IndexSize);
        }
        let end = (offset + count).min(chars.len());
        Ok(chars[offset..end].iter().collect())
    }

    fn append_data(&mut self, data: &str) -> DOMResult<()> {
        let mut current = CharacterData::data(self);
        current.push_str(data);
        CharacterData::set_data(self, &current)
    }

    fn insert_data(&mut self, offset: usize, data: &str) -> DOMResult<()> {
        let mut chars: Vec<char> = CharacterData::data(self).chars().collect();
        if offset > chars.len() {
            return Err(Error::IndexSize);
        }
        chars.splice(offset..offset, data.chars());
        CharacterData::set_data(self, &chars.into_iter().collect::<String>())
    }

    fn delete_data(&mut self, offset: usize, count: usize) -> DOMResult<()> {
        let mut chars: Vec<char> = CharacterData::data(self).chars().collect();
        if offset > chars.len() {
            return Err(Error::IndexSize);
        }
        let end = (offset + count).min(chars.len());
        chars.splice(offset..end, std::iter::empty());
        CharacterData::set_data(self, &chars.into_iter().collect::<String>())
    }

    fn replace_data(&mut self, offset: usize, count: usize, data: &str) -> DOMResult<()> {
        let mut chars: Vec<char> = CharacterData::data(self).chars().collect();
        if offset > chars.len() {
            return Err(Error::IndexSize);
        }
        let end = (offset + count).min(chars.len());
        chars.splice(offset..end, data.chars());
        CharacterData::set_data(self, &chars.into_iter().collect::<String>())
    }
}

impl Text for RefNode {
    fn split_text(&mut self, offset: usize) -> DOMResult<RefNode> {
        let data = CharacterData::data(self);
        let chars: Vec<char> = data.chars().collect();
        if offset > chars.len() {
            return Err(Error::IndexSize);
        }
        let head: String = chars[..offset].iter().collect();
        let tail: String = chars[offset..].iter().collect();
        CharacterData::set_data(self, &head)?;
        let owner = self.owner_document().ok_or(Error::NotSupported {
            reason: "text node has no owner document".to_string(),
        })?;
        let new_node = owner.create_text_node(&tail);
        if let Some(parent) = self.parent_node() {
            let mut parent = parent;
            if let Some(next) = self.next_sibling() {
                parent.insert_before(new_node.clone(), Some(&next))?;
            } else {
                parent.append_child(new_node.clone())?;
            }
        }
        Ok(new_node)
    }

    fn is_element_content_whitespace(&self) -> bool {
        tree::whole_text::is_element_content_whitespace(self)
    }

    fn whole_text(&self) -> String {
        tree::whole_text::whole_text(self)
    }

    fn replace_whole_text(&mut self, content: &str) -> DOMResult<Option<RefNode>> {
        tree::whole_text::replace_whole_text(self, content)
    }
}

impl CDataSection for RefNode {}

impl Comment for RefNode {}

// ------------------------------------------------------------------------------------------------
// ProcessingInstruction
// ------------------------------------------------------------------------------------------------

impl ProcessingInstruction for RefNode {
    fn target(&self) -> String {
        self.name().qualified_name()
    }

    fn data(&self) -> String {
        self.node_value().unwrap_or_default()
    }

    fn set_data(&mut self, data: &str) -> DOMResult<()> {
        self.set_node_value(data)
    }
}

// ------------------------------------------------------------------------------------------------
// EntityReference / Entity / Notation
// ------------------------------------------------------------------------------------------------

impl EntityReference for RefNode {}

impl Entity for RefNode {
    fn public_id(&self) -> Option<String> {
        match &self.borrow().data {
            NodeData::Entity { public_id, .. } => public_id.clone(),
            _ => None,
        }
    }

    fn system_id(&self) -> Option<String> {
        match &self.borrow().data {
            NodeData::Entity { system_id, .. } => system_id.clone(),
            _ => None,
        }
    }

    fn notation_name(&self) -> Option<String> {
        match &self.borrow().data {
            NodeData::Entity { notation_name, .. } => notation_name.clone(),
            _ => None,
        }
    }

    fn input_encoding(&self) -> Option<String> {
        match &self.borrow().data {
            NodeData::Entity { input_encoding, .. } => input_encoding.clone(),
            _ => None,
        }
    }
}

impl Notation for RefNode {
    fn public_id(&self) -> Option<String> {
        match &self.borrow().data {
            NodeData::Notation { public_id, .. } => public_id.clone(),
            _ => None,
        }
    }

    fn system_id(&self) -> Option<String> {
        match &self.borrow().data {
            NodeData::Notation { system_id, .. } => system_id.clone(),
            _ => None,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// DocumentType
// ------------------------------------------------------------------------------------------------

impl DocumentType for RefNode {
    fn public_id(&self) -> Option<String> {
        match &self.borrow().data {
            NodeData::DocumentType { public_id, .. } => public_id.clone(),
            _ => None,
        }
    }

    fn system_id(&self) -> Option<String> {
        match &self.borrow().data {
            NodeData::DocumentType { system_id, .. } => system_id.clone(),
            _ => None,
        }
    }

    fn internal_subset(&self) -> Option<String> {
        match &self.borrow().data {
            NodeData::DocumentType { internal_subset, .. } => internal_subset.clone(),
            _ => None,
        }
    }

    fn entities(&self) -> Vec<RefNode> {
        match &self.borrow().data {
            NodeData::DocumentType { entities, .. } => entities.values().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn notations(&self) -> Vec<RefNode> {
        match &self.borrow().data {
            NodeData::DocumentType { notations, .. } => notations.values().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn get_entity(&self, name: &str) -> Option<RefNode> {
        match &self.borrow().data {
            NodeData::DocumentType { entities, .. } => entities.get(name).cloned(),
            _ => None,
        }
    }

    fn get_notation(&self, name: &str) -> Option<RefNode> {
        match &self.borrow().data {
            NodeData::DocumentType { notations, .. } => notations.get(name).cloned(),
            _ => None,
        }
    }

    fn get_element_declaration(&self, element_name: &str) -> Option<ContentModelKind> {
        match &self.borrow().data {
            NodeData::DocumentType { elements, .. } => {
                let decl = elements.get(element_name)?;
                match &decl.borrow().data {
                    NodeData::ElementDeclaration { content } => Some(content.clone()),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn get_attribute_declarations(&self, element_name: &str) -> Vec<AttributeDeclaration> {
        match &self.borrow().data {
            NodeData::DocumentType { attlists, .. } => {
                match attlists.get(element_name).map(|n| n.borrow().data.clone()) {
                    Some(NodeData::AttributeListDeclaration { declarations }) => declarations,
                    _ => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }
}
