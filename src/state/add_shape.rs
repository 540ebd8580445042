use crate::document::DocumentModel;
use crate::model::Point;
use crate::shapes::GraphicalObject;

/// Places a copy of the prototype centered on every click.
#[derive(Debug)]
pub struct AddShapeState {
    prototype: GraphicalObject,
}

impl AddShapeState {
    pub fn new(prototype: GraphicalObject) -> Self {
        Self { prototype }
    }

    pub fn prototype(&self) -> &GraphicalObject {
        &self.prototype
    }

    pub(crate) fn mouse_down(&mut self, doc: &mut DocumentModel, point: Point) {
        let mut object = self.prototype.duplicate();
        let center = object.bounding_box().center();
        object.translate(point - center);
        log::debug!("placing {} {} at {:?}", object.shape_name(), object.id(), point);
        doc.add(object);
    }
}
