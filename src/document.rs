//! Z-ordered collection of top-level objects with a derived selection.

use std::cell::RefCell;
use std::rc::Rc;

use crate::model::Point;
use crate::shapes::{GraphicalObject, GraphicalObjectListener, ListenerRef, ObjectId};

/// Largest `selection_distance` that still counts as a hit for document lookups.
pub const SELECTION_PROXIMITY: f64 = 10.0;

pub trait DocumentModelListener {
    fn document_change(&self);
}

pub type DocumentListenerRef = Rc<dyn DocumentModelListener>;

/// Subscribed to every top-level object. Keeps the selection current from
/// selection events and relays every event as a document change.
#[derive(Default)]
struct Tracker {
    selected: RefCell<Vec<ObjectId>>,
    listeners: RefCell<Vec<DocumentListenerRef>>,
}

impl Tracker {
    fn notify(&self) {
        let listeners = self.listeners.borrow().clone();
        for l in listeners {
            l.document_change();
        }
    }
}

impl GraphicalObjectListener for Tracker {
    fn graphical_object_changed(&self, _id: ObjectId) {
        self.notify();
    }

    fn graphical_object_selection_changed(&self, id: ObjectId, selected: bool) {
        {
            let mut set = self.selected.borrow_mut();
            let present = set.contains(&id);
            if selected && !present {
                set.push(id);
            } else if !selected && present {
                set.retain(|s| *s != id);
            }
        }
        self.notify();
    }
}

pub struct DocumentModel {
    objects: Vec<GraphicalObject>,
    tracker: Rc<Tracker>,
}

impl Default for DocumentModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentModel {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            tracker: Rc::new(Tracker::default()),
        }
    }

    fn tracker_handle(&self) -> ListenerRef {
        self.tracker.clone()
    }

    pub fn add_listener(&self, listener: DocumentListenerRef) {
        self.tracker.listeners.borrow_mut().push(listener);
    }

    pub fn remove_listener(&self, listener: &DocumentListenerRef) {
        self.tracker
            .listeners
            .borrow_mut()
            .retain(|l| !std::ptr::addr_eq(Rc::as_ptr(l), Rc::as_ptr(listener)));
    }

    /// Tells subscribers to redraw without changing anything.
    pub fn notify_listeners(&self) {
        self.tracker.notify();
    }

    /// Appends `object` on top of the paint order.
    pub fn add(&mut self, object: GraphicalObject) {
        object.add_listener(self.tracker_handle());
        if object.is_selected() {
            let mut set = self.tracker.selected.borrow_mut();
            if !set.contains(&object.id()) {
                set.push(object.id());
            }
        }
        self.objects.push(object);
        self.notify_listeners();
    }

    /// Detaches and returns the object; `None` if it is not a top-level member.
    pub fn remove(&mut self, id: ObjectId) -> Option<GraphicalObject> {
        let index = self.index_of(id)?;
        let object = self.objects.remove(index);
        object.remove_listener(&self.tracker_handle());
        self.tracker.selected.borrow_mut().retain(|s| *s != id);
        self.notify_listeners();
        Some(object)
    }

    pub fn clear(&mut self) {
        let handle = self.tracker_handle();
        for object in self.objects.drain(..) {
            object.remove_listener(&handle);
        }
        self.tracker.selected.borrow_mut().clear();
        self.notify_listeners();
    }

    /// Clears, then adds every object in order.
    pub fn replace_all(&mut self, objects: Vec<GraphicalObject>) {
        self.clear();
        for object in objects {
            self.add(object);
        }
    }

    pub fn list(&self) -> &[GraphicalObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id() == id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&GraphicalObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut GraphicalObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    /// Selected top-level objects, in the order they became selected.
    pub fn selected_objects(&self) -> Vec<ObjectId> {
        self.tracker.selected.borrow().clone()
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.tracker.selected.borrow().contains(&id)
    }

    /// Moves the object one step toward the viewer. No-op at the front.
    pub fn increase_z(&mut self, id: ObjectId) {
        if let Some(index) = self.index_of(id) {
            if index + 1 < self.objects.len() {
                self.objects.swap(index, index + 1);
                self.notify_listeners();
            }
        }
    }

    /// Moves the object one step away from the viewer. No-op at the back.
    pub fn decrease_z(&mut self, id: ObjectId) {
        if let Some(index) = self.index_of(id) {
            if index > 0 {
                self.objects.swap(index, index - 1);
                self.notify_listeners();
            }
        }
    }

    /// Object with the smallest selection distance below the proximity threshold.
    /// Ties go to the earlier (further back) object. The Select state does its own
    /// topmost-first pick with a tighter inclusive threshold instead of this lookup.
    pub fn find_selected_graphical_object(&self, point: Point) -> Option<ObjectId> {
        let mut best = None;
        let mut min_distance = SELECTION_PROXIMITY;
        for object in &self.objects {
            let distance = object.selection_distance(point);
            if distance < min_distance {
                min_distance = distance;
                best = Some(object.id());
            }
        }
        best
    }

    /// Index of the object's hot point nearest to `point`, if within the threshold.
    /// Hot-point grabs in the Select state use their own tighter first-match test.
    pub fn find_selected_hot_point(&self, object: &GraphicalObject, point: Point) -> Option<usize> {
        let mut best = None;
        let mut min_distance = SELECTION_PROXIMITY;
        for index in 0..object.hot_point_count() {
            let Ok(distance) = object.hot_point_distance(index, point) else {
                continue;
            };
            if distance < min_distance {
                min_distance = distance;
                best = Some(index);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Counter {
        hits: Cell<usize>,
    }

    impl DocumentModelListener for Counter {
        fn document_change(&self) {
            self.hits.set(self.hits.get() + 1);
        }
    }

    fn watched() -> (DocumentModel, Rc<Counter>) {
        let doc = DocumentModel::new();
        let counter = Rc::new(Counter::default());
        doc.add_listener(counter.clone());
        (doc, counter)
    }

    fn line_at(x: i32) -> GraphicalObject {
        GraphicalObject::line(Point::new(x, 0), Point::new(x, 100))
    }

    #[test]
    fn add_fires_once_and_tracks_preselected() {
        let (mut doc, counter) = watched();
        let mut obj = line_at(0);
        obj.set_selected(true);
        let id = obj.id();
        doc.add(obj);
        assert_eq!(counter.hits.get(), 1);
        assert_eq!(doc.selected_objects(), vec![id]);
        assert_eq!(doc.object(id).unwrap().listener_count(), 1);
    }

    #[test]
    fn selection_follows_object_events() {
        let (mut doc, counter) = watched();
        let a = line_at(0);
        let b = line_at(50);
        let (ida, idb) = (a.id(), b.id());
        doc.add(a);
        doc.add(b);

        doc.object_mut(idb).unwrap().set_selected(true);
        doc.object_mut(ida).unwrap().set_selected(true);
        assert_eq!(doc.selected_objects(), vec![idb, ida]);

        doc.object_mut(idb).unwrap().set_selected(false);
        assert_eq!(doc.selected_objects(), vec![ida]);
        assert_eq!(counter.hits.get(), 5);
    }

    #[test]
    fn geometry_changes_notify_document() {
        let (mut doc, counter) = watched();
        let a = line_at(0);
        let id = a.id();
        doc.add(a);
        doc.object_mut(id).unwrap().translate(Point::new(1, 1));
        assert_eq!(counter.hits.get(), 2);
    }

    #[test]
    fn remove_unsubscribes_and_deselects() {
        let (mut doc, counter) = watched();
        let mut a = line_at(0);
        a.set_selected(true);
        let id = a.id();
        doc.add(a);

        let mut removed = doc.remove(id).unwrap();
        assert!(doc.is_empty());
        assert!(doc.selected_objects().is_empty());
        assert_eq!(removed.listener_count(), 0);
        assert_eq!(counter.hits.get(), 2);

        removed.translate(Point::new(5, 5));
        assert_eq!(counter.hits.get(), 2);
        assert!(doc.remove(id).is_none());
        assert_eq!(counter.hits.get(), 2);
    }

    #[test]
    fn clear_fires_once() {
        let (mut doc, counter) = watched();
        doc.add(line_at(0));
        doc.add(line_at(10));
        doc.clear();
        assert!(doc.is_empty());
        assert_eq!(counter.hits.get(), 3);
    }

    #[test]
    fn z_order_swaps_and_boundary_noops() {
        let (mut doc, counter) = watched();
        let objs: Vec<_> = (0..3).map(|i| line_at(i * 40)).collect();
        let ids: Vec<_> = objs.iter().map(GraphicalObject::id).collect();
        for o in objs {
            doc.add(o);
        }
        let base = counter.hits.get();

        doc.increase_z(ids[2]);
        doc.decrease_z(ids[0]);
        assert_eq!(counter.hits.get(), base);

        doc.increase_z(ids[0]);
        assert_eq!(doc.index_of(ids[0]), Some(1));
        doc.decrease_z(ids[2]);
        assert_eq!(doc.index_of(ids[2]), Some(1));
        assert_eq!(doc.index_of(ids[0]), Some(2));
        assert_eq!(counter.hits.get(), base + 2);
    }

    #[test]
    fn find_on_empty_document_is_none() {
        let doc = DocumentModel::new();
        assert_eq!(doc.find_selected_graphical_object(Point::new(0, 0)), None);
        assert_eq!(doc.find_selected_graphical_object(Point::new(-50, 999)), None);
    }

    #[test]
    fn find_picks_closest_under_threshold() {
        let mut doc = DocumentModel::new();
        let a = line_at(0);
        let b = line_at(8);
        let (ida, idb) = (a.id(), b.id());
        doc.add(a);
        doc.add(b);
        assert_eq!(doc.find_selected_graphical_object(Point::new(2, 50)), Some(ida));
        assert_eq!(doc.find_selected_graphical_object(Point::new(7, 50)), Some(idb));
        assert_eq!(doc.find_selected_graphical_object(Point::new(18, 50)), None);
        assert_eq!(doc.find_selected_graphical_object(Point::new(17, 50)), Some(idb));
    }

    #[test]
    fn find_hot_point() {
        let doc = DocumentModel::new();
        let line = GraphicalObject::line(Point::new(0, 0), Point::new(30, 0));
        assert_eq!(doc.find_selected_hot_point(&line, Point::new(2, 2)), Some(0));
        assert_eq!(doc.find_selected_hot_point(&line, Point::new(28, -3)), Some(1));
        assert_eq!(doc.find_selected_hot_point(&line, Point::new(15, 0)), None);
        let group = GraphicalObject::composite(vec![line]);
        assert_eq!(doc.find_selected_hot_point(&group, Point::new(0, 0)), None);
    }

    #[test]
    fn replace_all_keeps_order() {
        let (mut doc, _counter) = watched();
        doc.add(line_at(500));
        let objs: Vec<_> = (0..3).map(|i| line_at(i * 10)).collect();
        let ids: Vec<_> = objs.iter().map(GraphicalObject::id).collect();
        doc.replace_all(objs);
        let listed: Vec<_> = doc.list().iter().map(GraphicalObject::id).collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let (mut doc, counter) = watched();
        let handle: DocumentListenerRef = counter.clone();
        doc.remove_listener(&handle);
        doc.add(line_at(0));
        assert_eq!(counter.hits.get(), 0);
    }
}
