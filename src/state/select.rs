use crate::document::DocumentModel;
use crate::geometry;
use crate::model::{Point, Rect};
use crate::render::{self, Renderer};
use crate::shapes::{GraphicalObject, ObjectId};

use super::Key;

/// Clicks this close to a shape or hot point grab it.
const CLICK_PROXIMITY: f64 = 3.0;
/// Half the side of the square marking a hot point.
const HOT_POINT_MARKER: i32 = 2;

#[derive(Clone, Copy, Debug)]
struct RubberBand {
    start: Point,
    end: Option<Point>,
}

impl RubberBand {
    fn rect(&self) -> Option<Rect> {
        self.end.map(|end| Rect::from_corners(self.start, end))
    }
}

/// Picking, dragging, rubber-band selection, nudging, z-order and grouping.
#[derive(Debug, Default)]
pub struct SelectState {
    last_mouse: Option<Point>,
    grabbed: Option<ObjectId>,
    hot_point: Option<usize>,
    band: Option<RubberBand>,
}

fn deselect_all(doc: &mut DocumentModel) {
    for id in doc.selected_objects() {
        if let Some(object) = doc.object_mut(id) {
            object.set_selected(false);
        }
    }
}

impl SelectState {
    /// Current rubber-band rectangle, once the pointer has moved.
    pub fn rubber_band(&self) -> Option<Rect> {
        self.band.as_ref().and_then(RubberBand::rect)
    }

    pub fn dragged_hot_point(&self) -> Option<(ObjectId, usize)> {
        self.grabbed.zip(self.hot_point)
    }

    fn topmost_hit(doc: &DocumentModel, point: Point) -> Option<ObjectId> {
        doc.list()
            .iter()
            .rev()
            .find(|o| o.selection_distance(point) <= CLICK_PROXIMITY)
            .map(GraphicalObject::id)
    }

    fn hot_point_under(object: &GraphicalObject, point: Point) -> Option<usize> {
        (0..object.hot_point_count()).find(|&i| {
            object
                .hot_point(i)
                .is_ok_and(|hp| geometry::distance_from_point(hp, point) <= CLICK_PROXIMITY)
        })
    }

    pub(crate) fn mouse_down(&mut self, doc: &mut DocumentModel, point: Point, shift: bool, ctrl: bool) {
        self.last_mouse = Some(point);
        self.grabbed = None;
        self.hot_point = None;
        self.band = None;

        let Some(id) = Self::topmost_hit(doc, point) else {
            if !ctrl && !shift {
                self.band = Some(RubberBand {
                    start: point,
                    end: None,
                });
                deselect_all(doc);
            }
            return;
        };

        if ctrl {
            if let Some(object) = doc.object_mut(id) {
                let selected = !object.is_selected();
                object.set_selected(selected);
                self.grabbed = selected.then_some(id);
            }
        } else if shift {
            if let Some(object) = doc.object_mut(id) {
                object.set_selected(true);
            }
            self.grabbed = Some(id);
        } else if doc.is_selected(id) {
            self.grabbed = Some(id);
            self.hot_point = doc.object(id).and_then(|o| Self::hot_point_under(o, point));
        } else {
            deselect_all(doc);
            if let Some(object) = doc.object_mut(id) {
                object.set_selected(true);
            }
            self.grabbed = Some(id);
        }
    }

    pub(crate) fn mouse_dragged(&mut self, doc: &mut DocumentModel, point: Point) {
        let Some(last) = self.last_mouse else {
            return;
        };
        let delta = point - last;

        if let Some((id, index)) = self.dragged_hot_point() {
            if let Some(object) = doc.object_mut(id) {
                let moved = object
                    .hot_point(index)
                    .and_then(|hp| object.set_hot_point(index, hp + delta));
                if let Err(e) = moved {
                    log::warn!("dragging hot point {index} of {id}: {e}");
                }
            }
        } else if self.grabbed.is_some_and(|id| doc.is_selected(id)) {
            for sid in doc.selected_objects() {
                if let Some(object) = doc.object_mut(sid) {
                    object.translate(delta);
                }
            }
        } else if let Some(band) = self.band.as_mut() {
            band.end = Some(point);
            doc.notify_listeners();
        }

        self.last_mouse = Some(point);
    }

    pub(crate) fn mouse_up(&mut self, doc: &mut DocumentModel, ctrl: bool) {
        if let Some(rect) = self.rubber_band() {
            Self::select_inside(doc, rect, ctrl);
        }
        self.last_mouse = None;
        self.grabbed = None;
        self.hot_point = None;
        self.band = None;
        doc.notify_listeners();
    }

    /// Selects every object whose bounding box lies fully inside `rect`;
    /// with `toggle` each such object flips instead.
    fn select_inside(doc: &mut DocumentModel, rect: Rect, toggle: bool) {
        let inside: Vec<ObjectId> = doc
            .list()
            .iter()
            .filter(|o| rect.contains_rect(o.bounding_box()))
            .map(GraphicalObject::id)
            .collect();
        for id in inside {
            if let Some(object) = doc.object_mut(id) {
                let selected = !toggle || !object.is_selected();
                object.set_selected(selected);
            }
        }
    }

    pub(crate) fn key_pressed(&mut self, doc: &mut DocumentModel, key: Key) {
        let delta = match key {
            Key::ArrowUp => Point::new(0, -1),
            Key::ArrowDown => Point::new(0, 1),
            Key::ArrowLeft => Point::new(-1, 0),
            Key::ArrowRight => Point::new(1, 0),
            Key::Plus | Key::Equals => {
                for id in doc.selected_objects() {
                    doc.increase_z(id);
                }
                return;
            }
            Key::Minus => {
                for id in doc.selected_objects() {
                    doc.decrease_z(id);
                }
                return;
            }
            Key::G => {
                group_selection(doc);
                return;
            }
            Key::U => {
                ungroup_selection(doc);
                return;
            }
            Key::Escape | Key::Other => return,
        };
        for id in doc.selected_objects() {
            if let Some(object) = doc.object_mut(id) {
                object.translate(delta);
            }
        }
    }

    pub(crate) fn overlay_per_object(&self, doc: &DocumentModel, r: &mut dyn Renderer, object: &GraphicalObject) {
        if !object.is_selected() {
            return;
        }
        render::draw_rect_outline(r, object.bounding_box());

        if doc.selected_objects().len() != 1 || object.is_composite() {
            return;
        }
        for i in 0..object.hot_point_count() {
            let Ok(hp) = object.hot_point(i) else {
                continue;
            };
            let d = HOT_POINT_MARKER;
            r.fill_polygon(&[
                hp + Point::new(-d, -d),
                hp + Point::new(d, -d),
                hp + Point::new(d, d),
                hp + Point::new(-d, d),
            ]);
        }
    }

    pub(crate) fn overlay_post_frame(&self, r: &mut dyn Renderer) {
        if let Some(rect) = self.rubber_band() {
            render::draw_rect_outline(r, rect);
        }
    }

    pub(crate) fn on_leaving(&mut self, doc: &mut DocumentModel) {
        deselect_all(doc);
        *self = Self::default();
    }
}

/// Replaces the selection (two or more objects) with one selected composite.
fn group_selection(doc: &mut DocumentModel) {
    let selected = doc.selected_objects();
    if selected.len() < 2 {
        return;
    }
    let mut children = Vec::with_capacity(selected.len());
    for id in selected {
        if let Some(object) = doc.object_mut(id) {
            object.set_selected(false);
        }
        if let Some(object) = doc.remove(id) {
            children.push(object);
        }
    }
    let mut composite = GraphicalObject::composite(children);
    composite.set_selected(true);
    log::debug!("grouped {}", composite.shape_name());
    doc.add(composite);
}

/// Replaces a single selected composite with its children, all selected.
fn ungroup_selection(doc: &mut DocumentModel) {
    let selected = doc.selected_objects();
    let [id] = selected.as_slice() else {
        return;
    };
    let Some(object) = doc.object_mut(*id) else {
        return;
    };
    if !object.is_composite() {
        return;
    }
    object.set_selected(false);
    let Some(composite) = doc.remove(*id) else {
        return;
    };
    match composite.into_children() {
        Ok(children) => {
            log::debug!("ungrouped {} into {} object(s)", id, children.len());
            for mut child in children {
                child.set_selected(true);
                doc.add(child);
            }
        }
        Err(leaf) => doc.add(leaf),
    }
}
