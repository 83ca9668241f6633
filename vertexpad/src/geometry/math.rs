use crate::geometry::tolerance::clamp01;
use crate::model::Vec2;

pub fn distance(p: Vec2, q: Vec2) -> f32 {
    let dx = q.x - p.x;
    let dy = q.y - p.y;
    (dx * dx + dy * dy).sqrt()
}

/// Squared distance from `(px, py)` to segment `(x1, y1)-(x2, y2)` and the
/// clamped projection parameter.
pub fn seg_distance_sq(px: f32, py: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32) {
    let vx = x2 - x1; let vy = y2 - y1;
    let wx = px - x1; let wy = py - y1;
    let vv = vx*vx + vy*vy;
    let t = if vv > 0.0 { clamp01((wx*vx + wy*vy) / vv) } else { 0.0 };
    let projx = x1 + t * vx; let projy = y1 + t * vy;
    let dx = px - projx; let dy = py - projy;
    (dx*dx + dy*dy, t)
}

pub fn point_to_segment_distance(p: Vec2, v: Vec2, w: Vec2) -> f32 {
    let (d2, _) = seg_distance_sq(p.x, p.y, v.x, v.y, w.x, w.y);
    d2.sqrt()
}

/// Twice the signed area of triangle `abc`. Positive when `c` lies to the
/// left of `a -> b` in screen coordinates (y down).
pub fn orientation(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

pub fn is_left(a: Vec2, b: Vec2, c: Vec2) -> bool {
    orientation(a, b, c) > 0.0
}

pub fn quad_point(t: f32, p0: Vec2, p1: Vec2, p2: Vec2) -> Vec2 {
    let u = 1.0 - t;
    Vec2 {
        x: u*u*p0.x + 2.0*u*t*p1.x + t*t*p2.x,
        y: u*u*p0.y + 2.0*u*t*p1.y + t*t*p2.y,
    }
}

pub fn cubic_point(t: f32, x0: f32, y0: f32, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) -> (f32, f32) {
    let u = 1.0 - t;
    let tt = t*t; let uu = u*u;
    let uuu = uu*u; let ttt = tt*t;
    let x = uuu*x0 + 3.0*uu*t*x1 + 3.0*u*tt*x2 + ttt*x3;
    let y = uuu*y0 + 3.0*uu*t*y1 + 3.0*u*tt*y2 + ttt*y3;
    (x, y)
}

pub fn dist_point_to_seg_sq(px: f32, py: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let (d2, _) = seg_distance_sq(px, py, x1, y1, x2, y2);
    d2
}

/// Minimum squared distance from `p` to an open polyline.
pub fn polyline_distance_sq(p: Vec2, points: &[Vec2]) -> f32 {
    match points {
        [] => f32::INFINITY,
        [only] => {
            let dx = p.x - only.x; let dy = p.y - only.y;
            dx*dx + dy*dy
        }
        _ => points
            .windows(2)
            .map(|w| dist_point_to_seg_sq(p.x, p.y, w[0].x, w[0].y, w[1].x, w[1].y))
            .fold(f32::INFINITY, f32::min),
    }
}
