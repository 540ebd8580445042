use crate::model::{Point, Rect};

pub fn distance_from_point(a: Point, b: Point) -> f64 {
    let dx = f64::from(a.x) - f64::from(b.x);
    let dy = f64::from(a.y) - f64::from(b.y);
    (dx * dx + dy * dy).sqrt()
}

/// Distance from `p` to the segment `s`-`e`. The projection parameter is clamped
/// to [0, 1], so points beyond either end measure to the nearest endpoint.
pub fn distance_from_line_segment(s: Point, e: Point, p: Point) -> f64 {
    let ex = f64::from(e.x) - f64::from(s.x);
    let ey = f64::from(e.y) - f64::from(s.y);
    let len2 = ex * ex + ey * ey;
    if len2 == 0.0 {
        return distance_from_point(p, s);
    }
    let px = f64::from(p.x) - f64::from(s.x);
    let py = f64::from(p.y) - f64::from(s.y);
    let t = ((px * ex + py * ey) / len2).clamp(0.0, 1.0);
    let cx = f64::from(s.x) + t * ex;
    let cy = f64::from(s.y) + t * ey;
    let dx = f64::from(p.x) - cx;
    let dy = f64::from(p.y) - cy;
    (dx * dx + dy * dy).sqrt()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    // i32 differences fit in i64; their products need i128
    let d = |a: i32, b: i32| i128::from(i64::from(a) - i64::from(b));
    let val = d(q.y, p.y) * d(r.x, q.x) - d(q.x, p.x) * d(r.y, q.y);
    match val {
        0 => Orientation::Collinear,
        v if v > 0 => Orientation::Clockwise,
        _ => Orientation::CounterClockwise,
    }
}

/// `q` lies inside the bounding box of `p`-`r`; only meaningful for collinear triples.
fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Whether segment `p1`-`q1` touches or crosses segment `p2`-`q2`.
pub fn segments_intersect(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

/// Whether the segment crosses any of the rectangle's four edges. A segment lying
/// strictly inside the rectangle does not count.
pub fn segment_crosses_rect_edges(a: Point, b: Point, rect: Rect) -> bool {
    let [tl, tr, br, bl] = rect.corners();
    segments_intersect(a, b, tl, tr)
        || segments_intersect(a, b, tr, br)
        || segments_intersect(a, b, br, bl)
        || segments_intersect(a, b, bl, tl)
}
