//! Exact point/segment tests against the three region shapes.
//!
//! Conventions
//! - Points inside: strict (the border is outside) for rectangles and circles;
//!   even-odd parity for polygons.
//! - Segments: "intersects" includes touching the boundary.
//! - Any NaN coordinate yields `false`.
//! - Circle and polygon tests reject inputs outside the shape's bounding box
//!   first, the same test the prefilter runs, so rounding near the box edge
//!   cannot make the two disagree.
//! - Batch variants return one flag per input, in input order.

use super::types::{circle_bbox, polygon_bbox, Point2, Rect, Segment2};

/// 2D cross product `a × b`.
#[inline]
fn cross(a: Point2, b: Point2) -> f32 {
    a.x * b.y - a.y * b.x
}

#[inline]
pub fn point_inside_rect(p: Point2, r: &Rect) -> bool {
    r.xmin < p.x && p.x < r.xmax && r.ymin < p.y && p.y < r.ymax
}

#[inline]
pub fn point_inside_circle(p: Point2, center: Point2, radius: f32) -> bool {
    if !circle_bbox(center, radius).contains(p) {
        return false;
    }
    (p - center).norm_squared() < radius * radius
}

/// Even-odd rule with a ray cast towards +x.
///
/// Horizontal edges contribute no crossing. An edge counts when `y` lies
/// strictly on one side transition and its x-intercept at `y` is right of `p`.
pub fn point_inside_polygon(p: Point2, polygon: &[Point2]) -> bool {
    if polygon.len() < 3 || !polygon_bbox(polygon).is_some_and(|b| b.contains(p)) {
        return false;
    }
    let (x, y) = (p.x, p.y);
    let mut inside = false;
    let mut p1 = polygon[polygon.len() - 1];
    for &p2 in polygon {
        if p1.y != p2.y && ((p1.y > y) != (p2.y > y)) {
            let x_int = (y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
            if x < x_int {
                inside = !inside;
            }
        }
        p1 = p2;
    }
    inside
}

/// Segment vs closed rectangle: cheap side rejection, then corner half-plane test.
pub fn segment_intersects_rect((a, b): Segment2, r: &Rect) -> bool {
    if !r.bounds().may_touch_segment((a, b)) {
        return false;
    }
    // Implicit line through a,b: f(q) = (b.y-a.y) q.x + (a.x-b.x) q.y + (b.x a.y - a.x b.y).
    let ka = b.y - a.y;
    let kb = a.x - b.x;
    let kc = b.x * a.y - a.x * b.y;
    let side = |x: f32, y: f32| ka * x + kb * y + kc;
    let d = [
        side(r.xmin, r.ymin),
        side(r.xmax, r.ymin),
        side(r.xmax, r.ymax),
        side(r.xmin, r.ymax),
    ];
    let all_pos = d.iter().all(|&v| v > 0.0);
    let all_neg = d.iter().all(|&v| v < 0.0);
    !(all_pos || all_neg)
}

/// Closest point on the segment (clamped projection) strictly within `radius`.
pub fn segment_intersects_circle((a, b): Segment2, center: Point2, radius: f32) -> bool {
    if !circle_bbox(center, radius).may_touch_segment((a, b)) {
        return false;
    }
    let d = b - a;
    let len2 = d.norm_squared();
    // zero-length segment degenerates to its start point
    let t = if len2 > 0.0 {
        ((center - a).dot(&d) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closest = a + d * t;
    (closest - center).norm_squared() < radius * radius
}

/// Parametric intersection of two closed segments.
///
/// Parallel (including collinear) pairs report no intersection.
pub fn segments_intersect((p, p2): Segment2, (q, q2): Segment2) -> bool {
    let r = p2 - p;
    let s = q2 - q;
    let denom = cross(r, s);
    if denom == 0.0 || denom.is_nan() {
        return false;
    }
    let qp = q - p;
    let t = cross(qp, s) / denom;
    let u = cross(qp, r) / denom;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// True if the segment crosses any polygon edge.
///
/// A segment lying wholly inside the polygon crosses nothing; callers that
/// need containment OR this with `point_inside_polygon` on the endpoints.
pub fn segment_intersects_polygon(seg: Segment2, polygon: &[Point2]) -> bool {
    if !polygon_bbox(polygon).is_some_and(|b| b.may_touch_segment(seg)) {
        return false;
    }
    let n = polygon.len();
    (0..n).any(|i| segments_intersect(seg, (polygon[i], polygon[(i + 1) % n])))
}

pub fn points_inside_rect(points: &[Point2], r: &Rect) -> Vec<bool> {
    points.iter().map(|&p| point_inside_rect(p, r)).collect()
}

pub fn points_inside_circle(points: &[Point2], center: Point2, radius: f32) -> Vec<bool> {
    points
        .iter()
        .map(|&p| point_inside_circle(p, center, radius))
        .collect()
}

pub fn points_inside_polygon(points: &[Point2], polygon: &[Point2]) -> Vec<bool> {
    points
        .iter()
        .map(|&p| point_inside_polygon(p, polygon))
        .collect()
}

pub fn segments_intersect_rect(segs: &[Segment2], r: &Rect) -> Vec<bool> {
    segs.iter().map(|&s| segment_intersects_rect(s, r)).collect()
}

pub fn segments_intersect_circle(segs: &[Segment2], center: Point2, radius: f32) -> Vec<bool> {
    segs.iter()
        .map(|&s| segment_intersects_circle(s, center, radius))
        .collect()
}

pub fn segments_intersect_polygon(segs: &[Segment2], polygon: &[Point2]) -> Vec<bool> {
    segs.iter()
        .map(|&s| segment_intersects_polygon(s, polygon))
        .collect()
}
