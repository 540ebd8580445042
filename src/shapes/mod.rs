//! Graphical object model: leaf shapes, composites, and their notifications.

use std::fmt;
use std::num::ParseIntError;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{PayloadError, ShapeError};
use crate::geometry;
use crate::model::{Point, Rect};
use crate::render::Renderer;

mod composite;
mod line;
mod listener;
mod oval;

pub use composite::CompositeShape;
pub use line::LineSegment;
pub use listener::{GraphicalObjectListener, ListenerRef, same_listener};
pub use oval::Oval;

use listener::{ChildForwarder, ListenerList};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

impl ObjectId {
    fn allocate() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Control points of a leaf shape. The count is fixed when the shape is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HotPoints {
    points: Box<[Point]>,
    selected: Box<[bool]>,
}

impl HotPoints {
    pub(crate) fn new(points: Vec<Point>) -> Self {
        let selected = vec![false; points.len()].into_boxed_slice();
        Self {
            points: points.into_boxed_slice(),
            selected,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }

    fn check(&self, index: usize) -> Result<(), ShapeError> {
        if index < self.points.len() {
            Ok(())
        } else {
            Err(ShapeError::HotPointOutOfRange {
                index,
                count: self.points.len(),
            })
        }
    }

    pub(crate) fn get(&self, index: usize) -> Result<Point, ShapeError> {
        self.check(index)?;
        Ok(self.points[index])
    }

    pub(crate) fn set(&mut self, index: usize, point: Point) -> Result<(), ShapeError> {
        self.check(index)?;
        self.points[index] = point;
        Ok(())
    }

    pub(crate) fn is_selected(&self, index: usize) -> Result<bool, ShapeError> {
        self.check(index)?;
        Ok(self.selected[index])
    }

    pub(crate) fn set_selected(&mut self, index: usize, selected: bool) -> Result<(), ShapeError> {
        self.check(index)?;
        self.selected[index] = selected;
        Ok(())
    }

    pub(crate) fn translate(&mut self, delta: Point) {
        for p in self.points.iter_mut() {
            *p = p.translate(delta);
        }
    }

    /// Same geometry, nothing selected.
    pub(crate) fn duplicate(&self) -> Self {
        Self::new(self.points.to_vec())
    }
}

/// Parses exactly `N` whitespace-separated integers.
pub(crate) fn parse_fields<const N: usize, T>(payload: &str) -> Result<[T; N], PayloadError>
where
    T: FromStr<Err = ParseIntError> + Copy + Default,
{
    let parts: Vec<&str> = payload.split_whitespace().collect();
    if parts.len() != N {
        return Err(PayloadError::FieldCount {
            expected: N,
            found: parts.len(),
        });
    }
    let mut out = [T::default(); N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part.parse().map_err(|source| PayloadError::BadInt {
            field: part.to_string(),
            source,
        })?;
    }
    Ok(out)
}

#[derive(Debug)]
pub enum Shape {
    Line(LineSegment),
    Oval(Oval),
    Composite(CompositeShape),
}

/// A drawable object with identity, a selection flag and change subscribers.
pub struct GraphicalObject {
    id: ObjectId,
    selected: bool,
    listeners: Rc<ListenerList>,
    shape: Shape,
}

impl fmt::Debug for GraphicalObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphicalObject")
            .field("id", &self.id)
            .field("selected", &self.selected)
            .field("shape", &self.shape)
            .finish()
    }
}

impl GraphicalObject {
    fn from_shape(shape: Shape) -> Self {
        Self {
            id: ObjectId::allocate(),
            selected: false,
            listeners: Rc::new(ListenerList::default()),
            shape,
        }
    }

    pub fn line(start: Point, end: Point) -> Self {
        Self::from_shape(Shape::Line(LineSegment::new(start, end)))
    }

    pub fn oval(right: Point, bottom: Point) -> Self {
        Self::from_shape(Shape::Oval(Oval::new(right, bottom)))
    }

    /// Line prototype offered by the toolbar.
    pub fn default_line() -> Self {
        Self::line(Point::new(100, 100), Point::new(200, 150))
    }

    /// Oval prototype offered by the toolbar.
    pub fn default_oval() -> Self {
        Self::oval(Point::new(150, 100), Point::new(100, 150))
    }

    /// Wraps `children` in a new composite. The composite subscribes to every child
    /// and re-announces their geometry changes as its own.
    pub fn composite(children: Vec<GraphicalObject>) -> Self {
        let id = ObjectId::allocate();
        let listeners = Rc::new(ListenerList::default());
        let forwarder: ListenerRef = Rc::new(ChildForwarder {
            parent: id,
            parent_listeners: Rc::downgrade(&listeners),
        });
        for child in &children {
            child.add_listener(forwarder.clone());
        }
        Self {
            id,
            selected: false,
            listeners,
            shape: Shape::Composite(CompositeShape::new(children, forwarder)),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.shape, Shape::Composite(_))
    }

    pub fn as_composite(&self) -> Option<&CompositeShape> {
        match &self.shape {
            Shape::Composite(c) => Some(c),
            _ => None,
        }
    }

    /// Dissolves a composite into its children, detaching them from it.
    /// Leaf shapes are handed back unchanged.
    pub fn into_children(self) -> Result<Vec<GraphicalObject>, GraphicalObject> {
        match self.shape {
            Shape::Composite(composite) => Ok(composite.into_children()),
            shape => Err(Self { shape, ..self }),
        }
    }

    fn hot_points(&self) -> Result<&HotPoints, ShapeError> {
        match &self.shape {
            Shape::Line(l) => Ok(&l.hot),
            Shape::Oval(o) => Ok(&o.hot),
            Shape::Composite(_) => Err(ShapeError::NoHotPoints),
        }
    }

    fn hot_points_mut(&mut self) -> Result<&mut HotPoints, ShapeError> {
        match &mut self.shape {
            Shape::Line(l) => Ok(&mut l.hot),
            Shape::Oval(o) => Ok(&mut o.hot),
            Shape::Composite(_) => Err(ShapeError::NoHotPoints),
        }
    }

    pub fn hot_point_count(&self) -> usize {
        self.hot_points().map(HotPoints::len).unwrap_or(0)
    }

    pub fn hot_point(&self, index: usize) -> Result<Point, ShapeError> {
        self.hot_points()?.get(index)
    }

    pub fn set_hot_point(&mut self, index: usize, point: Point) -> Result<(), ShapeError> {
        self.hot_points_mut()?.set(index, point)?;
        self.listeners.notify_changed(self.id);
        Ok(())
    }

    pub fn hot_point_distance(&self, index: usize, point: Point) -> Result<f64, ShapeError> {
        let hot = self.hot_point(index)?;
        Ok(geometry::distance_from_point(hot, point))
    }

    pub fn is_hot_point_selected(&self, index: usize) -> Result<bool, ShapeError> {
        match self.hot_points() {
            Ok(hot) => hot.is_selected(index),
            Err(ShapeError::NoHotPoints) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn set_hot_point_selected(&mut self, index: usize, selected: bool) -> Result<(), ShapeError> {
        self.hot_points_mut()?.set_selected(index, selected)?;
        self.listeners.notify_changed(self.id);
        Ok(())
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Deselecting a composite also deselects its children; selecting one leaves
    /// the children alone.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        if !selected {
            if let Shape::Composite(c) = &mut self.shape {
                c.deselect_children();
            }
        }
        self.listeners.notify_selection_changed(self.id, selected);
    }

    pub fn translate(&mut self, delta: Point) {
        match &mut self.shape {
            Shape::Line(l) => l.hot.translate(delta),
            Shape::Oval(o) => o.hot.translate(delta),
            Shape::Composite(c) => c.translate(delta),
        }
        self.listeners.notify_changed(self.id);
    }

    pub fn bounding_box(&self) -> Rect {
        match &self.shape {
            Shape::Line(l) => l.bounding_box(),
            Shape::Oval(o) => o.bounding_box(),
            Shape::Composite(c) => c.bounding_box(),
        }
    }

    /// Hit quality: 0 on or inside the shape, growing with distance from it.
    pub fn selection_distance(&self, point: Point) -> f64 {
        match &self.shape {
            Shape::Line(l) => l.selection_distance(point),
            Shape::Oval(o) => o.selection_distance(point),
            Shape::Composite(c) => c.selection_distance(point),
        }
    }

    pub fn render(&self, r: &mut dyn Renderer) {
        match &self.shape {
            Shape::Line(l) => l.render(r),
            Shape::Oval(o) => o.render(r),
            Shape::Composite(c) => c.render(r),
        }
    }

    /// Deep copy with a fresh identity, no subscribers and no selection.
    pub fn duplicate(&self) -> GraphicalObject {
        match &self.shape {
            Shape::Line(l) => Self::from_shape(Shape::Line(l.duplicate())),
            Shape::Oval(o) => Self::from_shape(Shape::Oval(o.duplicate())),
            Shape::Composite(c) => {
                Self::composite(c.children().iter().map(GraphicalObject::duplicate).collect())
            }
        }
    }

    pub fn shape_name(&self) -> String {
        match &self.shape {
            Shape::Line(_) => "Line".to_string(),
            Shape::Oval(_) => "Oval".to_string(),
            Shape::Composite(c) => format!("Composite ({} objects)", c.children().len()),
        }
    }

    /// Tag identifying this variant in the drawing file format.
    pub fn shape_id(&self) -> &'static str {
        match &self.shape {
            Shape::Line(_) => LineSegment::TAG,
            Shape::Oval(_) => Oval::TAG,
            Shape::Composite(_) => CompositeShape::TAG,
        }
    }

    /// Appends this object's rows. Composites write their children first.
    pub fn save(&self, rows: &mut Vec<String>) {
        match &self.shape {
            Shape::Line(l) => rows.push(l.save_row()),
            Shape::Oval(o) => rows.push(o.save_row()),
            Shape::Composite(c) => c.save(rows),
        }
    }

    /// Builds an object of this prototype's variant from `payload` and pushes it.
    pub fn load(&self, stack: &mut Vec<GraphicalObject>, payload: &str) -> Result<(), PayloadError> {
        let object = match &self.shape {
            Shape::Line(_) => Self::from_shape(Shape::Line(LineSegment::parse(payload)?)),
            Shape::Oval(_) => Self::from_shape(Shape::Oval(Oval::parse(payload)?)),
            Shape::Composite(_) => Self::composite(CompositeShape::take_children(stack, payload)?),
        };
        stack.push(object);
        Ok(())
    }

    pub fn add_listener(&self, listener: ListenerRef) {
        self.listeners.add(listener);
    }

    pub fn remove_listener(&self, listener: &ListenerRef) -> bool {
        self.listeners.remove(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
