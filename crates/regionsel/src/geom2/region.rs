//! `Region`: the validated selection shape and its batch tests.
//!
//! Batch tests (`contains_points`, `intersects_segments`, and the `_subset`
//! forms) go through the bounding-box prefilter; the `_exact` forms skip it and
//! exist for verification and benchmarks.

use nalgebra::Vector2;

use super::predicates::{
    point_inside_circle, point_inside_polygon, point_inside_rect, segment_intersects_circle,
    segment_intersects_polygon, segment_intersects_rect,
};
use super::prefilter::{point_in_bounds, prefiltered_subset, prefiltered_test, segment_near_bounds};
use super::types::{Bounds2, Circle, Lasso, Point2, Rect, Segment2};
use crate::error::{RegionError, RegionResult};

/// Selection region in screen space. Built fresh per gesture.
#[derive(Clone, Debug, PartialEq)]
pub enum Region {
    Rect(Rect),
    Circle(Circle),
    Polygon(Lasso),
}

/// Shape tag, used for logging and reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionKind {
    Rect,
    Circle,
    Polygon,
}

impl RegionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionKind::Rect => "rect",
            RegionKind::Circle => "circle",
            RegionKind::Polygon => "polygon",
        }
    }
}

fn check_finite(what: &'static str, vals: &[f32]) -> RegionResult<()> {
    if vals.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(RegionError::NonFiniteCoordinate { what })
    }
}

impl Region {
    /// Rectangle from already-ordered bounds; inverted bounds are rejected.
    pub fn rect(xmin: f32, xmax: f32, ymin: f32, ymax: f32) -> RegionResult<Self> {
        check_finite("rectangle", &[xmin, xmax, ymin, ymax])?;
        if xmin > xmax {
            return Err(RegionError::InvertedBounds {
                axis: 'x',
                min: xmin,
                max: xmax,
            });
        }
        if ymin > ymax {
            return Err(RegionError::InvertedBounds {
                axis: 'y',
                min: ymin,
                max: ymax,
            });
        }
        Ok(Region::Rect(Rect {
            xmin,
            xmax,
            ymin,
            ymax,
        }))
    }

    /// Rectangle spanned by two arbitrary drag corners (normalized).
    pub fn rect_from_corners(a: Point2, b: Point2) -> RegionResult<Self> {
        check_finite("rectangle corner", &[a.x, a.y, b.x, b.y])?;
        Self::rect(a.x.min(b.x), a.x.max(b.x), a.y.min(b.y), a.y.max(b.y))
    }

    pub fn circle(center: Point2, radius: f32) -> RegionResult<Self> {
        check_finite("circle center", &[center.x, center.y])?;
        if !radius.is_finite() || radius < 0.0 {
            return Err(RegionError::InvalidRadius(radius));
        }
        Ok(Region::Circle(Circle { center, radius }))
    }

    /// Lasso polygon; the first vertex is the gesture's starting point.
    pub fn polygon(vertices: Vec<Point2>) -> RegionResult<Self> {
        if vertices.len() < 3 {
            return Err(RegionError::TooFewPolygonVertices {
                count: vertices.len(),
            });
        }
        if !vertices.iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
            return Err(RegionError::NonFiniteCoordinate { what: "polygon" });
        }
        let bounds =
            Bounds2::from_points(&vertices).ok_or(RegionError::NonFiniteCoordinate { what: "polygon" })?;
        Ok(Region::Polygon(Lasso { vertices, bounds }))
    }

    pub fn kind(&self) -> RegionKind {
        match self {
            Region::Rect(_) => RegionKind::Rect,
            Region::Circle(_) => RegionKind::Circle,
            Region::Polygon(_) => RegionKind::Polygon,
        }
    }

    pub fn bounds(&self) -> Bounds2 {
        match self {
            Region::Rect(r) => r.bounds(),
            Region::Circle(c) => c.bounds(),
            Region::Polygon(l) => l.bounds(),
        }
    }

    /// Point used to find a face enclosing the whole region.
    ///
    /// Rectangle: the `(xmax, ymin)` corner; circle: its center; polygon: its
    /// first vertex.
    pub fn reference_point(&self) -> Point2 {
        match self {
            Region::Rect(r) => Vector2::new(r.xmax, r.ymin),
            Region::Circle(c) => c.center,
            Region::Polygon(l) => l.vertices[0],
        }
    }

    /// Exact point test, no prefilter.
    #[inline]
    pub fn contains_point(&self, p: Point2) -> bool {
        match self {
            Region::Rect(r) => point_inside_rect(p, r),
            Region::Circle(c) => point_inside_circle(p, c.center, c.radius),
            Region::Polygon(l) => point_inside_polygon(p, &l.vertices),
        }
    }

    /// Exact segment test, no prefilter.
    ///
    /// For polygons this only detects edge crossings; a segment strictly inside
    /// the lasso is caught by testing its endpoints.
    #[inline]
    pub fn intersects_segment(&self, s: Segment2) -> bool {
        match self {
            Region::Rect(r) => segment_intersects_rect(s, r),
            Region::Circle(c) => segment_intersects_circle(s, c.center, c.radius),
            Region::Polygon(l) => segment_intersects_polygon(s, &l.vertices),
        }
    }

    pub fn contains_points(&self, points: &[Point2]) -> Vec<bool> {
        let b = self.bounds();
        prefiltered_test(points, point_in_bounds(&b), |p| self.contains_point(*p))
    }

    pub fn contains_points_subset(&self, points: &[Point2], subset: &[bool]) -> Vec<bool> {
        let b = self.bounds();
        prefiltered_subset(points, subset, point_in_bounds(&b), |p| {
            self.contains_point(*p)
        })
    }

    pub fn contains_points_exact(&self, points: &[Point2]) -> Vec<bool> {
        points.iter().map(|&p| self.contains_point(p)).collect()
    }

    pub fn intersects_segments(&self, segs: &[Segment2]) -> Vec<bool> {
        let b = self.bounds();
        prefiltered_test(segs, segment_near_bounds(&b), |s| self.intersects_segment(*s))
    }

    pub fn intersects_segments_subset(&self, segs: &[Segment2], subset: &[bool]) -> Vec<bool> {
        let b = self.bounds();
        prefiltered_subset(segs, subset, segment_near_bounds(&b), |s| {
            self.intersects_segment(*s)
        })
    }

    pub fn intersects_segments_exact(&self, segs: &[Segment2]) -> Vec<bool> {
        segs.iter().map(|&s| self.intersects_segment(s)).collect()
    }
}
