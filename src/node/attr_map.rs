/*!
The ordered, dual-keyed attribute map owned by every Element. Lookup matches
either `(namespaceURI, localName)` or the plain
`nodeName`; removal/replacement re-materializes a declared default.
*/

use crate::name::Name;
use crate::node::RefNode;

#[derive(Clone, Debug, Default)]
pub struct AttributeMap {
    /// Insertion-ordered; the map is small enough in practice (tens of
    /// attributes) that a linear scan keyed by `Name` beats a `HashMap` for
    /// preserving insertion order without a side index.
    entries: Vec<(Name, RefNode)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Name, RefNode)> {
        self.entries.iter()
    }

    pub fn values(&self) -> Vec<RefNode> {
        self.entries.iter().map(|(_, n)| n.clone()).collect()
    }

    /// Matches by `(namespaceURI, localName)` when both sides carry a
    /// namespace, falling back to the plain qualified name otherwise — the
    /// "alternate non-namespace key" lookup.
    pub fn get(&self, namespace_uri: Option<&str>, local_name: &str) -> Option<RefNode> {
        self.entries
            .iter()
            .find(|(name, _)| match namespace_uri {
                Some(uri) => name.namespace_uri().as_deref() == Some(uri) && name.local_name() == local_name,
                None => name.local_name() == local_name && name.prefix().is_none(),
            })
            .map(|(_, n)| n.clone())
    }

    pub fn get_by_qualified_name(&self, qualified_name: &str) -> Option<RefNode> {
        self.entries
            .iter()
            .find(|(name, _)| name.qualified_name() == qualified_name)
            .map(|(_, n)| n.clone())
    }

    /// Inserts or replaces by `Name` identity (namespace URI + local name),
    /// returning the attribute that was displaced, if any.
    pub fn set(&mut self, name: Name, node: RefNode) -> Option<RefNode> {
        if let Some(pos) = self.entries.iter().position(|(n, _)| *n == name) {
            let old = self.entries[pos].1.clone();
            self.entries[pos] = (name, node);
            Some(old)
        } else {
            self.entries.push((name, node));
            None
        }
    }

    pub fn remove(&mut self, namespace_uri: Option<&str>, local_name: &str) -> Option<RefNode> {
        let pos = self.entries.iter().position(|(name, _)| match namespace_uri {
            Some(uri) => {
                name.namespace_uri().as_deref() == Some(uri) && name.local_name() == local_name
            }
            None => name.local_name() == local_name && name.prefix().is_none(),
        })?;
        Some(self.entries.remove(pos).1)
    }

    pub fn remove_node(&mut self, node: &RefNode) -> Option<Name> {
        let pos = self
            .entries
            .iter()
            .position(|(_, n)| n.ptr_eq(node))?;
        Some(self.entries.remove(pos).0)
    }

    pub fn contains(&self, namespace_uri: Option<&str>, local_name: &str) -> bool {
        self.get(namespace_uri, local_name).is_some()
    }
}
