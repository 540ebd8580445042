use crate::model::Point;

/// Drawing primitives consumed by shapes and interaction overlays.
pub trait Renderer {
    fn draw_line(&mut self, start: Point, end: Point);
    fn fill_polygon(&mut self, points: &[Point]);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    Line(Point, Point),
    Polygon(Vec<Point>),
}

/// Renderer that keeps every primitive it receives, in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line(a, b) => Some((*a, *b)),
            DrawCommand::Polygon(_) => None,
        })
    }

    pub fn polygons(&self) -> impl Iterator<Item = &[Point]> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Polygon(points) => Some(points.as_slice()),
            DrawCommand::Line(..) => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn draw_line(&mut self, start: Point, end: Point) {
        self.commands.push(DrawCommand::Line(start, end));
    }

    fn fill_polygon(&mut self, points: &[Point]) {
        self.commands.push(DrawCommand::Polygon(points.to_vec()));
    }
}

/// Outline of a rectangle as four edges.
pub fn draw_rect_outline(r: &mut dyn Renderer, rect: crate::model::Rect) {
    let [tl, tr, br, bl] = rect.corners();
    r.draw_line(tl, tr);
    r.draw_line(tr, br);
    r.draw_line(br, bl);
    r.draw_line(bl, tl);
}
