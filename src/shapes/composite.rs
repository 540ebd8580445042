use std::fmt;

use crate::error::PayloadError;
use crate::model::{Point, Rect};
use crate::render::Renderer;

use super::{GraphicalObject, ListenerRef, parse_fields};

/// Ordered group of exclusively owned children. Has no hot points of its own.
pub struct CompositeShape {
    children: Vec<GraphicalObject>,
    forwarder: ListenerRef,
}

impl fmt::Debug for CompositeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeShape")
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

impl CompositeShape {
    pub const TAG: &'static str = "@COMP";

    pub(crate) fn new(children: Vec<GraphicalObject>, forwarder: ListenerRef) -> Self {
        Self {
            children,
            forwarder,
        }
    }

    pub fn children(&self) -> &[GraphicalObject] {
        &self.children
    }

    pub(crate) fn into_children(self) -> Vec<GraphicalObject> {
        for child in &self.children {
            child.remove_listener(&self.forwarder);
        }
        self.children
    }

    pub(crate) fn deselect_children(&mut self) {
        for child in &mut self.children {
            child.set_selected(false);
        }
    }

    pub(crate) fn translate(&mut self, delta: Point) {
        for child in &mut self.children {
            child.translate(delta);
        }
    }

    /// Union of the children's boxes; an empty composite has a zero box at the origin.
    pub(crate) fn bounding_box(&self) -> Rect {
        self.children
            .iter()
            .map(GraphicalObject::bounding_box)
            .reduce(|acc, b| acc.union(b))
            .unwrap_or_default()
    }

    pub(crate) fn selection_distance(&self, point: Point) -> f64 {
        self.children
            .iter()
            .map(|c| c.selection_distance(point))
            .fold(f64::MAX, f64::min)
    }

    pub(crate) fn render(&self, r: &mut dyn Renderer) {
        for child in &self.children {
            child.render(r);
        }
    }

    pub(crate) fn save(&self, rows: &mut Vec<String>) {
        for child in &self.children {
            child.save(rows);
        }
        rows.push(format!("{} {}", Self::TAG, self.children.len()));
    }

    /// Pops the `count` most recently pushed objects, oldest first.
    pub(crate) fn take_children(
        stack: &mut Vec<GraphicalObject>,
        payload: &str,
    ) -> Result<Vec<GraphicalObject>, PayloadError> {
        let [wanted] = parse_fields::<1, usize>(payload)?;
        if wanted > stack.len() {
            return Err(PayloadError::StackUnderflow {
                wanted,
                available: stack.len(),
            });
        }
        Ok(stack.split_off(stack.len() - wanted))
    }
}
