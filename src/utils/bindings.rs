use {
    crate::{
        client::{Client, ClientId},
        object::{Object, ObjectId},
    },
    std::{cell::RefCell, rc::Rc},
};

/// The per-client objects listening on one device.
///
/// Entries keep insertion order. A client may hold several objects for the
/// same device; `find` returns the newest one.
pub struct Bindings<P> {
    bindings: RefCell<Vec<((ClientId, ObjectId), Rc<P>)>>,
}

impl<P> Default for Bindings<P> {
    fn default() -> Self {
        Self {
            bindings: Default::default(),
        }
    }
}

impl<P: Object> Bindings<P> {
    pub fn add(&self, client: &Client, obj: &Rc<P>) {
        let key = (client.id, obj.id());
        let mut bindings = self.bindings.borrow_mut();
        bindings.retain(|(k, _)| *k != key);
        bindings.push((key, obj.clone()));
    }

    pub fn remove(&self, client: &Client, obj: &P) -> bool {
        let key = (client.id, obj.id());
        let mut bindings = self.bindings.borrow_mut();
        let len = bindings.len();
        bindings.retain(|(k, _)| *k != key);
        bindings.len() != len
    }

    pub fn remove_client(&self, client: ClientId) -> Vec<Rc<P>> {
        let mut removed = vec![];
        self.bindings.borrow_mut().retain(|((c, _), obj)| {
            if *c == client {
                removed.push(obj.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn find(&self, client: ClientId) -> Option<Rc<P>> {
        self.bindings
            .borrow()
            .iter()
            .rev()
            .find(|((c, _), _)| *c == client)
            .map(|(_, obj)| obj.clone())
    }

    pub fn all(&self) -> Vec<Rc<P>> {
        self.bindings.borrow().iter().map(|(_, o)| o.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    pub fn clear(&self) {
        self.bindings.borrow_mut().clear();
    }
}
