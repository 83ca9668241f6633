use crate::geometry::math::dist_point_to_seg_sq;
use crate::geometry::tolerance::MAX_FLATTEN_DEPTH;
use crate::model::Vec2;

pub fn flatten_cubic(points: &mut Vec<Vec2>,
    x0: f32, y0: f32, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32,
    tol: f32, depth: u32)
{
    let d1 = dist_point_to_seg_sq(x1, y1, x0, y0, x3, y3);
    let d2 = dist_point_to_seg_sq(x2, y2, x0, y0, x3, y3);
    let tol2 = tol * tol;
    if d1.max(d2) <= tol2 || depth > MAX_FLATTEN_DEPTH {
        points.push(Vec2 { x: x3, y: y3 });
        return;
    }
    let x01 = 0.5*(x0 + x1); let y01 = 0.5*(y0 + y1);
    let x12 = 0.5*(x1 + x2); let y12 = 0.5*(y1 + y2);
    let x23 = 0.5*(x2 + x3); let y23 = 0.5*(y2 + y3);
    let x012 = 0.5*(x01 + x12); let y012 = 0.5*(y01 + y12);
    let x123 = 0.5*(x12 + x23); let y123 = 0.5*(y12 + y23);
    let x0123 = 0.5*(x012 + x123); let y0123 = 0.5*(y012 + y123);
    flatten_cubic(points, x0, y0, x01, y01, x012, y012, x0123, y0123, tol, depth+1);
    flatten_cubic(points, x0123, y0123, x123, y123, x23, y23, x3, y3, tol, depth+1);
}

/// Same subdivision as `flatten_cubic`, for a quadratic through control point `(x1, y1)`.
pub fn flatten_quad(points: &mut Vec<Vec2>,
    x0: f32, y0: f32, x1: f32, y1: f32, x2: f32, y2: f32,
    tol: f32, depth: u32)
{
    // A quadratic deviates from its chord by at most half the control point's offset.
    let d = dist_point_to_seg_sq(x1, y1, x0, y0, x2, y2) * 0.25;
    if d <= tol * tol || depth > MAX_FLATTEN_DEPTH {
        points.push(Vec2 { x: x2, y: y2 });
        return;
    }
    let x01 = 0.5*(x0 + x1); let y01 = 0.5*(y0 + y1);
    let x12 = 0.5*(x1 + x2); let y12 = 0.5*(y1 + y2);
    let xm = 0.5*(x01 + x12); let ym = 0.5*(y01 + y12);
    flatten_quad(points, x0, y0, x01, y01, xm, ym, tol, depth+1);
    flatten_quad(points, xm, ym, x12, y12, x2, y2, tol, depth+1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::math::quad_point;

    #[test]
    fn straight_quad_flattens_to_single_segment() {
        let mut pts = vec![Vec2::new(0.0, 0.0)];
        flatten_quad(&mut pts, 0.0, 0.0, 50.0, 0.0, 100.0, 0.0, 0.5, 0);
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[1], Vec2::new(100.0, 0.0));
    }

    #[test]
    fn bent_quad_stays_within_tolerance() {
        let (p0, p1, p2) = (Vec2::new(0.0, 0.0), Vec2::new(50.0, 80.0), Vec2::new(100.0, 0.0));
        let mut pts = vec![p0];
        flatten_quad(&mut pts, p0.x, p0.y, p1.x, p1.y, p2.x, p2.y, 0.5, 0);
        assert!(pts.len() > 4);
        for i in 0..=20 {
            let q = quad_point(i as f32 / 20.0, p0, p1, p2);
            let d2 = crate::geometry::math::polyline_distance_sq(q, &pts);
            assert!(d2.sqrt() <= 0.6, "sample {} off by {}", i, d2.sqrt());
        }
    }
}
