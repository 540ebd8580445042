use crate::document::DocumentModel;
use crate::geometry;
use crate::model::Point;
use crate::render::Renderer;
use crate::shapes::{GraphicalObject, ObjectId};

/// Strokes closer than this to a shape erase it.
const ERASER_PROXIMITY: f64 = 5.0;

/// Freehand stroke that deletes every object it touches when released.
#[derive(Debug, Default)]
pub struct EraserState {
    path: Vec<Point>,
}

impl EraserState {
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub(crate) fn mouse_down(&mut self, point: Point) {
        self.path.clear();
        self.path.push(point);
    }

    pub(crate) fn mouse_dragged(&mut self, doc: &mut DocumentModel, point: Point) {
        if self.path.is_empty() {
            return;
        }
        self.path.push(point);
        doc.notify_listeners();
    }

    pub(crate) fn mouse_up(&mut self, doc: &mut DocumentModel) {
        if self.path.len() > 1 {
            self.erase(doc);
        }
        self.path.clear();
        doc.notify_listeners();
    }

    fn touches(&self, object: &GraphicalObject) -> bool {
        let bbox = object.bounding_box();
        self.path
            .windows(2)
            .any(|w| geometry::segment_crosses_rect_edges(w[0], w[1], bbox))
            || self
                .path
                .iter()
                .any(|p| object.selection_distance(*p) <= ERASER_PROXIMITY)
    }

    fn erase(&self, doc: &mut DocumentModel) {
        let doomed: Vec<ObjectId> = doc
            .list()
            .iter()
            .filter(|o| self.touches(o))
            .map(GraphicalObject::id)
            .collect();
        if !doomed.is_empty() {
            log::debug!("eraser removes {} object(s)", doomed.len());
        }
        for id in doomed {
            doc.remove(id);
        }
    }

    pub(crate) fn overlay_post_frame(&self, r: &mut dyn Renderer) {
        for w in self.path.windows(2) {
            r.draw_line(w[0], w[1]);
        }
    }

    pub(crate) fn on_leaving(&mut self) {
        self.path.clear();
    }
}
