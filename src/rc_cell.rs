/*!
Shared, mutable node ownership.

The node tree is built from `Rc<RefCell<_>>` for strong (owning) links and
`Weak<RefCell<_>>` for back-links (child → parent, Attr → owner element) that
must not keep a subtree alive. `RcRefCell`/`WeakRefCell` wrap the standard
types so the rest of the crate borrows through one narrow API instead of
reaching into `Rc`/`RefCell` directly at every call site.
*/

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Debug)]
pub struct RcRefCell<T: Sized> {
    inner: Rc<RefCell<T>>,
}

#[derive(Debug)]
pub struct WeakRefCell<T: Sized> {
    inner: Weak<RefCell<T>>,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl<T> Clone for RcRefCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

// ------------------------------------------------------------------------------------------------

impl<T> RcRefCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    pub fn as_inner(&self) -> &Rc<RefCell<T>> {
        &self.inner
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    pub fn downgrade(&self) -> WeakRefCell<T> {
        WeakRefCell {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.inner.borrow_mut()
    }
}

// ------------------------------------------------------------------------------------------------

impl<T> Clone for WeakRefCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

// ------------------------------------------------------------------------------------------------

impl<T> WeakRefCell<T> {
    pub fn new() -> Self {
        Self { inner: Weak::new() }
    }

    pub fn as_inner(&self) -> &Weak<RefCell<T>> {
        &self.inner
    }

    pub fn upgrade(&self) -> Option<RcRefCell<T>> {
        self.inner.upgrade().map(|inner| RcRefCell { inner })
    }
}

impl<T> Default for WeakRefCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    pub struct Node {
        pub name: String,
        pub parent: Option<NodeRef>,
    }

    type NodeRef = RcRefCell<Node>;

    impl Node {
        pub fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                parent: None,
            }
        }
    }

    #[test]
    fn test_ref_aliasing() {
        let node = Node::new("name-1");
        let ref1: NodeRef = RcRefCell::new(node);
        {
            assert_eq!(ref1.borrow().name, "name-1");
            assert!(ref1.borrow().parent.is_none());
        }
        let ref2: NodeRef = ref1.clone();
        {
            assert_eq!(ref2.borrow().name, "name-1");
        }

        {
            let mut mut_inner = ref2.borrow_mut();
            mut_inner.parent = Some(ref2.clone());
            assert!(mut_inner.parent.is_some());
        }
        {
            assert_eq!(
                ref2.borrow().parent.as_ref().unwrap().borrow().name,
                "name-1"
            );
        }

        {
            let mut mut_inner = ref2.borrow_mut();
            mut_inner.name = "name-2".to_string();
            assert_eq!(mut_inner.name, "name-2");
        }

        assert_eq!(ref2.borrow().name, "name-2");
        assert_eq!(ref1.borrow().name, "name-2");
    }

    #[test]
    fn test_weak_upgrade_after_drop() {
        let weak: WeakRefCell<Node> = {
            let strong = RcRefCell::new(Node::new("ephemeral"));
            strong.downgrade()
        };
        assert!(weak.upgrade().is_none());
    }
}
