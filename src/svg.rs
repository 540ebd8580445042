//! Static SVG export. Shapes draw into [`SvgRenderer`] exactly as they draw on screen.

use crate::model::Point;
use crate::render::Renderer;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

fn points_attr(points: &[Point]) -> String {
    let mut out = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{},{}", p.x, p.y));
    }
    out
}

/// Accumulates one SVG element per primitive.
#[derive(Clone, Debug)]
pub struct SvgRenderer {
    out: String,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl SvgRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        let mut out = String::new();
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        out.push('\n');
        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}">"#
        ));
        out.push('\n');
        Self { out }
    }

    /// Closes the root element and returns the document text.
    pub fn finish(mut self) -> String {
        self.out.push_str("</svg>\n");
        self.out
    }
}

impl Renderer for SvgRenderer {
    fn draw_line(&mut self, start: Point, end: Point) {
        self.out.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="1" />"#,
            start.x, start.y, end.x, end.y
        ));
        self.out.push('\n');
    }

    fn fill_polygon(&mut self, points: &[Point]) {
        self.out.push_str(&format!(
            r#"<polygon points="{}" style="stroke: black; fill: gray; stroke-width: 1;" />"#,
            points_attr(points)
        ));
        self.out.push('\n');
    }
}
