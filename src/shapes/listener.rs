use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::ObjectId;

/// Subscriber to a graphical object's notifications. Both callbacks fire after the
/// mutation has completed.
pub trait GraphicalObjectListener {
    fn graphical_object_changed(&self, id: ObjectId);
    fn graphical_object_selection_changed(&self, id: ObjectId, selected: bool);
}

pub type ListenerRef = Rc<dyn GraphicalObjectListener>;

/// Identity comparison; two handles are the same listener when they share an allocation.
pub fn same_listener(a: &ListenerRef, b: &ListenerRef) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

#[derive(Default)]
pub(crate) struct ListenerList {
    listeners: RefCell<Vec<ListenerRef>>,
}

impl ListenerList {
    pub(crate) fn add(&self, listener: ListenerRef) {
        self.listeners.borrow_mut().push(listener);
    }

    pub(crate) fn remove(&self, listener: &ListenerRef) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        match listeners.iter().position(|l| same_listener(l, listener)) {
            Some(idx) => {
                listeners.remove(idx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    // Listeners may subscribe or unsubscribe while being notified, so iterate a snapshot.
    fn snapshot(&self) -> Vec<ListenerRef> {
        self.listeners.borrow().clone()
    }

    pub(crate) fn notify_changed(&self, id: ObjectId) {
        for l in self.snapshot() {
            l.graphical_object_changed(id);
        }
    }

    pub(crate) fn notify_selection_changed(&self, id: ObjectId, selected: bool) {
        for l in self.snapshot() {
            l.graphical_object_selection_changed(id, selected);
        }
    }
}

/// Installed on every child of a composite. Geometry changes are re-announced as
/// changes of the parent; selection changes stop here.
pub(crate) struct ChildForwarder {
    pub(crate) parent: ObjectId,
    pub(crate) parent_listeners: Weak<ListenerList>,
}

impl GraphicalObjectListener for ChildForwarder {
    fn graphical_object_changed(&self, _id: ObjectId) {
        if let Some(listeners) = self.parent_listeners.upgrade() {
            listeners.notify_changed(self.parent);
        }
    }

    fn graphical_object_selection_changed(&self, _id: ObjectId, _selected: bool) {}
}
