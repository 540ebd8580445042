use crate::error::PayloadError;
use crate::geometry;
use crate::model::{Point, Rect};
use crate::render::Renderer;

use super::{HotPoints, parse_fields};

/// Straight segment between two endpoint hot points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineSegment {
    pub(crate) hot: HotPoints,
}

impl LineSegment {
    pub const TAG: &'static str = "@LINE";

    pub(crate) fn new(start: Point, end: Point) -> Self {
        Self {
            hot: HotPoints::new(vec![start, end]),
        }
    }

    pub fn start(&self) -> Point {
        self.hot.points[0]
    }

    pub fn end(&self) -> Point {
        self.hot.points[1]
    }

    pub(crate) fn bounding_box(&self) -> Rect {
        Rect::from_corners(self.start(), self.end())
    }

    pub(crate) fn selection_distance(&self, point: Point) -> f64 {
        geometry::distance_from_line_segment(self.start(), self.end(), point)
    }

    pub(crate) fn render(&self, r: &mut dyn Renderer) {
        r.draw_line(self.start(), self.end());
    }

    pub(crate) fn duplicate(&self) -> Self {
        Self {
            hot: self.hot.duplicate(),
        }
    }

    pub(crate) fn save_row(&self) -> String {
        let (s, e) = (self.start(), self.end());
        format!("{} {} {} {} {}", Self::TAG, s.x, s.y, e.x, e.y)
    }

    pub(crate) fn parse(payload: &str) -> Result<Self, PayloadError> {
        let [x1, y1, x2, y2] = parse_fields::<4, i32>(payload)?;
        Ok(Self::new(Point::new(x1, y1), Point::new(x2, y2)))
    }
}
