use eframe::egui;
use vectorpad::model::Point;
use vectorpad::render::Renderer;

pub(super) const CANVAS_BG: egui::Color32 = egui::Color32::WHITE;
const INK: egui::Color32 = egui::Color32::BLACK;
const FILL: egui::Color32 = egui::Color32::GRAY;

/// Renders drawing coordinates onto an egui painter, offset by the canvas origin.
pub(super) struct PainterRenderer<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
    stroke: egui::Stroke,
}

impl<'a> PainterRenderer<'a> {
    pub(super) fn new(painter: &'a egui::Painter, origin: egui::Pos2, stroke_width: f32) -> Self {
        Self {
            painter,
            origin,
            stroke: egui::Stroke::new(stroke_width, INK),
        }
    }

    fn to_screen(&self, p: Point) -> egui::Pos2 {
        self.origin + egui::vec2(p.x as f32, p.y as f32)
    }
}

impl Renderer for PainterRenderer<'_> {
    fn draw_line(&mut self, start: Point, end: Point) {
        self.painter
            .line_segment([self.to_screen(start), self.to_screen(end)], self.stroke);
    }

    fn fill_polygon(&mut self, points: &[Point]) {
        let points: Vec<egui::Pos2> = points.iter().map(|p| self.to_screen(*p)).collect();
        self.painter
            .add(egui::Shape::convex_polygon(points, FILL, self.stroke));
    }
}

/// Canvas position in drawing coordinates.
pub(super) fn to_drawing(origin: egui::Pos2, screen: egui::Pos2) -> Point {
    let v = screen - origin;
    Point::new(v.x.round() as i32, v.y.round() as i32)
}
