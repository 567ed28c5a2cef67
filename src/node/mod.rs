/*!
The node model: a tagged union of node kinds sharing one concrete
representation (`NodeImpl`), wrapped in the crate's `RcRefCell` for shared
mutable ownership. Kind-specific state lives in [`NodeData`]; kind-independent
state (name, parent, owner, children, sequence counter, readonly flag,
user-data, source location) lives directly on `NodeImpl`.

Capability is expressed the way the design notes ask for: a small set of
traits (`Node`, `Document`, `Element`, ...) in [`traits`], implemented once on
[`RefNode`] in [`trait_impls`] by matching on the kind tag — no open-class
extension, no downcasting to per-kind concrete structs.
*/

mod attr_map;
pub(crate) mod mutate;
pub mod traits;
mod trait_impls;

pub use attr_map::AttributeMap;
pub use traits::*;

use crate::config::Configuration;
use crate::error::Location;
use crate::name::Name;
use crate::rc_cell::{RcRefCell, WeakRefCell};
use std::collections::HashMap;

/// Internal DOM tree node, owning reference.
pub type RefNode = RcRefCell<NodeImpl>;

/// Internal DOM tree node, non-owning (back-link) reference.
pub type WeakRefNode = WeakRefCell<NodeImpl>;

// ------------------------------------------------------------------------------------------------
// Node kind tag
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NodeType {
    Element = 1,
    Attribute,
    Text,
    CData,
    EntityReference,
    Entity,
    ProcessingInstruction,
    Comment,
    Document,
    DocumentType,
    DocumentFragment,
    Notation,
    /// Extension kind (supplemented feature): `<!ELEMENT …>` declaration.
    ElementDeclaration,
    /// Extension kind: the `<!ATTLIST …>` declarations for one element name.
    AttributeListDeclaration,
}

// ------------------------------------------------------------------------------------------------
// User data
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserDataEvent {
    Cloned,
    Imported,
    Adopted,
    Renamed,
}

pub trait UserDataHandler: std::fmt::Debug {
    fn handle(&self, event: UserDataEvent, key: &str, data: &UserData, node: &RefNode);
}

#[derive(Clone, Debug)]
pub enum UserData {
    Str(String),
    Bool(bool),
    Int(i64),
}

// ------------------------------------------------------------------------------------------------
// DTD content-model and attribute-declaration kinds
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentModelKind {
    Empty,
    Any,
    /// `(#PCDATA | a | b)*` — the bool list of names is unused when empty (pure `#PCDATA`).
    Mixed(Vec<String>),
    /// A sequence/choice group. `is_sequence = None` means "undecided", a
    /// tri-state the parser needs while it is still reading the group
    /// (preserved explicitly rather than collapsed to bool).
    Children(ContentGroup),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentGroup {
    pub is_sequence: Option<bool>,
    pub optional: bool,
    pub multiple: bool,
    pub particles: Vec<ContentParticle>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentParticle {
    Name {
        name: String,
        optional: bool,
        multiple: bool,
    },
    Group(ContentGroup),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeType {
    CData,
    Id,
    IdRef,
    IdRefs,
    Entity,
    Entities,
    NmToken,
    NmTokens,
    Notation(Vec<String>),
    Enumeration(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeDefault {
    Required,
    Implied,
    Fixed(String),
    Value(String),
}

#[derive(Clone, Debug)]
pub struct AttributeDeclaration {
    pub name: Name,
    pub attribute_type: AttributeType,
    pub default: AttributeDefault,
    /// Default-value child nodes (Text/EntityReference), materialized into an
    /// attribute by the default-attribute-maintenance rule.
    pub default_value_children: Vec<RefNode>,
}

// ------------------------------------------------------------------------------------------------
// Kind-specific payload
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub enum NodeData {
    Document {
        config: Box<Configuration>,
        xml_version: String,
        xml_encoding: Option<String>,
        xml_standalone: bool,
        input_encoding: Option<String>,
        document_uri: Option<String>,
        strict_error_checking: bool,
    },
    DocumentFragment,
    Element {
        attributes: AttributeMap,
    },
    Attribute {
        specified: bool,
    },
    CharacterData(String),
    ProcessingInstruction {
        data: String,
    },
    EntityReference,
    Entity {
        public_id: Option<String>,
        system_id: Option<String>,
        notation_name: Option<String>,
        input_encoding: Option<String>,
    },
    Notation {
        public_id: Option<String>,
        system_id: Option<String>,
    },
    DocumentType {
        public_id: Option<String>,
        system_id: Option<String>,
        internal_subset: Option<String>,
        entities: HashMap<String, RefNode>,
        notations: HashMap<String, RefNode>,
        elements: HashMap<String, RefNode>,
        attlists: HashMap<String, RefNode>,
    },
    ElementDeclaration {
        content: ContentModelKind,
    },
    AttributeListDeclaration {
        declarations: Vec<AttributeDeclaration>,
    },
}

// ------------------------------------------------------------------------------------------------
// NodeImpl
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct NodeImpl {
    pub(crate) node_type: NodeType,
    pub(crate) name: Name,
    pub(crate) parent: Option<WeakRefNode>,
    /// The map/list owner for node kinds that are not placed in a child
    /// sequence (Attr → owner Element, Entity/Notation/declarations → owner
    /// DocumentType). Distinct from `parent`, which DOM's `parentNode`
    /// exposes publicly; `container` tracks readonly propagation/removal even
    /// when `parentNode` must report `None`.
    pub(crate) container: Option<WeakRefNode>,
    pub(crate) owner_document: Option<WeakRefNode>,
    pub(crate) children: Vec<RefNode>,
    pub(crate) sequence: u64,
    pub(crate) readonly: bool,
    pub(crate) user_data: HashMap<String, (UserData, Option<std::rc::Rc<dyn UserDataHandler>>)>,
    pub(crate) location: Option<Location>,
    pub(crate) data: NodeData,
}

impl NodeImpl {
    pub(crate) fn new(node_type: NodeType, name: Name, data: NodeData) -> Self {
        Self {
            node_type,
            name,
            parent: None,
            container: None,
            owner_document: None,
            children: Vec::new(),
            sequence: 0,
            readonly: false,
            user_data: HashMap::new(),
            location: None,
            data,
        }
    }
}
