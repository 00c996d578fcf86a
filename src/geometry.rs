//! Stateless 2D primitives shared by extraction, solving and shadows.

use crate::types::{Point, Segment};

/// Z component of `(a - o) x (b - o)`.
#[inline]
pub fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// True if `point` is strictly on the segment's front (open) side.
/// Points on the segment's line are not facing.
pub fn facing_point(segment: &Segment, point: Point) -> bool {
    cross(segment.a, segment.b, point) > 0.0
}

/// Even-odd ray-casting point-in-polygon test.
/// The polygon is implicitly closed.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        // Equal-y edges never pass this guard, so the division is safe.
        if (pi.y > point.y) != (pj.y > point.y) {
            let intersect_x = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < intersect_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Shoelace area. Positive regardless of winding.
pub fn polygon_area(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += polygon[i].x * polygon[j].y;
        area -= polygon[j].x * polygon[i].y;
    }
    area.abs() / 2.0
}

/// Find parameter t where ray `origin + t * (dx, dy)` hits the segment.
/// Returns Some(t) if hit (t >= 0, u in [0, 1]), None if miss or parallel.
#[inline]
pub fn ray_segment_intersection(
    origin: Point,
    dx: f64,
    dy: f64,
    segment: &Segment,
    parallel_eps: f64,
) -> Option<f64> {
    let sx = segment.b.x - segment.a.x;
    let sy = segment.b.y - segment.a.y;
    let denom = dx * sy - dy * sx;
    if denom.abs() < parallel_eps {
        return None;
    }

    let ax = segment.a.x - origin.x;
    let ay = segment.a.y - origin.y;
    let t = (ax * sy - ay * sx) / denom;
    let u = (ax * dy - ay * dx) / denom;

    if t >= 0.0 && (0.0..=1.0).contains(&u) {
        Some(t)
    } else {
        None
    }
}
