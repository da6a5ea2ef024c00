use {
    crate::utils::numcell::NumCell,
    std::{
        cell::RefCell,
        rc::{Rc, Weak},
    },
};

/// A typed list of observers.
///
/// Listeners are held weakly. Dispatch works on a snapshot so listeners may
/// detach themselves or others while being notified.
pub struct EventSource<T: ?Sized> {
    inner: Rc<SourceInner<T>>,
}

struct SourceInner<T: ?Sized> {
    next_id: NumCell<u64>,
    listeners: RefCell<Vec<(u64, Weak<T>)>>,
}

/// A registration of one observer with at most one source.
pub struct EventListener<T: ?Sized> {
    target: Weak<T>,
    link: RefCell<Option<(u64, Weak<SourceInner<T>>)>>,
}

impl<T: ?Sized> Default for EventSource<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(SourceInner {
                next_id: NumCell::new(1),
                listeners: Default::default(),
            }),
        }
    }
}

impl<T: ?Sized> EventSource<T> {
    pub fn iter(&self) -> impl Iterator<Item = Rc<T>> + use<T> {
        let listeners: Vec<_> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        listeners.into_iter().filter_map(|l| l.upgrade())
    }

    pub fn has_listeners(&self) -> bool {
        self.inner
            .listeners
            .borrow()
            .iter()
            .any(|(_, l)| l.strong_count() > 0)
    }

    pub fn clear(&self) {
        self.inner.listeners.borrow_mut().clear();
    }
}

impl<T: ?Sized> EventListener<T> {
    pub fn new(target: Weak<T>) -> Self {
        Self {
            target,
            link: Default::default(),
        }
    }

    pub fn attach(&self, source: &EventSource<T>) {
        self.detach();
        let id = source.inner.next_id.fetch_add(1);
        source
            .inner
            .listeners
            .borrow_mut()
            .push((id, self.target.clone()));
        *self.link.borrow_mut() = Some((id, Rc::downgrade(&source.inner)));
    }

    pub fn detach(&self) {
        let Some((id, source)) = self.link.borrow_mut().take() else {
            return;
        };
        if let Some(source) = source.upgrade() {
            source.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
        }
    }

    pub fn is_attached(&self) -> bool {
        match &*self.link.borrow() {
            Some((_, source)) => source.strong_count() > 0,
            None => false,
        }
    }
}

impl<T: ?Sized> Drop for EventListener<T> {
    fn drop(&mut self) {
        self.detach();
    }
}
