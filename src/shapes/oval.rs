use std::f64::consts::TAU;

use crate::error::PayloadError;
use crate::model::{Point, Rect};
use crate::render::Renderer;

use super::{HotPoints, parse_fields};

const POLYGON_VERTICES: usize = 64;

/// Axis-aligned ellipse held by two hot points: `right` fixes the horizontal extent
/// and the vertical center, `bottom` fixes the vertical extent and the horizontal
/// center.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Oval {
    pub(crate) hot: HotPoints,
}

impl Oval {
    pub const TAG: &'static str = "@OVAL";

    pub(crate) fn new(right: Point, bottom: Point) -> Self {
        Self {
            hot: HotPoints::new(vec![right, bottom]),
        }
    }

    pub fn right(&self) -> Point {
        self.hot.points[0]
    }

    pub fn bottom(&self) -> Point {
        self.hot.points[1]
    }

    pub fn center(&self) -> Point {
        Point::new(self.bottom().x, self.right().y)
    }

    /// Horizontal and vertical radii.
    pub fn radii(&self) -> (i32, i32) {
        let c = self.center();
        (
            self.right().x.saturating_sub(c.x).saturating_abs(),
            self.bottom().y.saturating_sub(c.y).saturating_abs(),
        )
    }

    pub(crate) fn bounding_box(&self) -> Rect {
        let c = self.center();
        let (a, b) = self.radii();
        Rect::new(
            c.x.saturating_sub(a),
            c.y.saturating_sub(b),
            a.saturating_mul(2),
            b.saturating_mul(2),
        )
    }

    /// Zero inside the ellipse. Outside, the distance to the center minus the
    /// length of the radii diagonal, which only approximates the distance to the
    /// boundary.
    pub(crate) fn selection_distance(&self, point: Point) -> f64 {
        let c = self.center();
        let (a, b) = self.radii();
        let (a, b) = (f64::from(a), f64::from(b));
        let dx = f64::from(point.x) - f64::from(c.x);
        let dy = f64::from(point.y) - f64::from(c.y);
        let normalized = (dx * dx) / (a * a) + (dy * dy) / (b * b);
        if normalized <= 1.0 {
            0.0
        } else {
            (dx * dx + dy * dy).sqrt() - (a * a + b * b).sqrt()
        }
    }

    pub(crate) fn outline(&self) -> Vec<Point> {
        let c = self.center();
        let (a, b) = self.radii();
        (0..POLYGON_VERTICES)
            .map(|i| {
                let angle = TAU * i as f64 / POLYGON_VERTICES as f64;
                Point::new(
                    c.x.saturating_add((f64::from(a) * angle.cos()) as i32),
                    c.y.saturating_add((f64::from(b) * angle.sin()) as i32),
                )
            })
            .collect()
    }

    pub(crate) fn render(&self, r: &mut dyn Renderer) {
        r.fill_polygon(&self.outline());
    }

    pub(crate) fn duplicate(&self) -> Self {
        Self {
            hot: self.hot.duplicate(),
        }
    }

    pub(crate) fn save_row(&self) -> String {
        let (r, b) = (self.right(), self.bottom());
        format!("{} {} {} {} {}", Self::TAG, r.x, r.y, b.x, b.y)
    }

    pub(crate) fn parse(payload: &str) -> Result<Self, PayloadError> {
        let [x1, y1, x2, y2] = parse_fields::<4, i32>(payload)?;
        Ok(Self::new(Point::new(x1, y1), Point::new(x2, y2)))
    }
}
