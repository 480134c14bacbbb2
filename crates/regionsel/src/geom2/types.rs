//! Basic 2D screen-space types.
//!
//! - `Point2`: projected coordinate; NaN in either component marks an
//!   unprojectable point (behind the eye).
//! - `Segment2`: ordered endpoint pair.
//! - `Bounds2`: closed axis-aligned box used for prefiltering.
//! - `Rect`, `Circle`, `Lasso`: the three region shapes (validated by `Region`).

use nalgebra::Vector2;

/// Screen-space coordinate in pixels.
pub type Point2 = Vector2<f32>;

/// Line segment between two screen-space points.
pub type Segment2 = (Point2, Point2);

/// Sentinel for a point that could not be projected.
#[inline]
pub fn invalid_point() -> Point2 {
    Vector2::new(f32::NAN, f32::NAN)
}

/// True when both components are numbers (not the "behind the eye" sentinel).
#[inline]
pub fn is_valid(p: Point2) -> bool {
    !(p.x.is_nan() || p.y.is_nan())
}

/// Closed axis-aligned bounds `[xmin,xmax] × [ymin,ymax]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2 {
    pub xmin: f32,
    pub xmax: f32,
    pub ymin: f32,
    pub ymax: f32,
}

impl Bounds2 {
    #[inline]
    pub fn new(xmin: f32, xmax: f32, ymin: f32, ymax: f32) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// Bounds of a point set; `None` if empty or any point is invalid.
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        if !is_valid(*first) {
            return None;
        }
        let mut b = Self::new(first.x, first.x, first.y, first.y);
        for p in rest {
            if !is_valid(*p) {
                return None;
            }
            b.xmin = b.xmin.min(p.x);
            b.xmax = b.xmax.max(p.x);
            b.ymin = b.ymin.min(p.y);
            b.ymax = b.ymax.max(p.y);
        }
        Some(b)
    }

    /// Closed containment (border counts). NaN never contained.
    #[inline]
    pub fn contains(&self, p: Point2) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }

    /// False only when both endpoints lie strictly beyond the same side.
    ///
    /// NaN endpoints are rejected.
    #[inline]
    pub fn may_touch_segment(&self, (a, b): Segment2) -> bool {
        if !(is_valid(a) && is_valid(b)) {
            return false;
        }
        !((a.x < self.xmin && b.x < self.xmin)
            || (a.x > self.xmax && b.x > self.xmax)
            || (a.y < self.ymin && b.y < self.ymin)
            || (a.y > self.ymax && b.y > self.ymax))
    }

    /// Corners in counter-clockwise order starting at `(xmin, ymin)`.
    #[inline]
    pub fn corners(&self) -> [Point2; 4] {
        [
            Vector2::new(self.xmin, self.ymin),
            Vector2::new(self.xmax, self.ymin),
            Vector2::new(self.xmax, self.ymax),
            Vector2::new(self.xmin, self.ymax),
        ]
    }
}

/// Axis-aligned rectangle with `xmin <= xmax`, `ymin <= ymax`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub xmin: f32,
    pub xmax: f32,
    pub ymin: f32,
    pub ymax: f32,
}

impl Rect {
    #[inline]
    pub fn bounds(&self) -> Bounds2 {
        Bounds2::new(self.xmin, self.xmax, self.ymin, self.ymax)
    }
}

/// Circle by center and radius (`radius >= 0`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point2,
    pub radius: f32,
}

impl Circle {
    #[inline]
    pub fn bounds(&self) -> Bounds2 {
        circle_bbox(self.center, self.radius)
    }
}

/// Closed lasso polygon; edge `i` joins vertex `i` to vertex `(i+1) mod n`.
///
/// Invariant: at least 3 finite vertices (checked by `Region::polygon`).
#[derive(Clone, Debug, PartialEq)]
pub struct Lasso {
    pub(crate) vertices: Vec<Point2>,
    pub(crate) bounds: Bounds2,
}

impl Lasso {
    #[inline]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }
    #[inline]
    pub fn bounds(&self) -> Bounds2 {
        self.bounds
    }
}

/// Bounding box of a polygon given as a vertex list.
pub fn polygon_bbox(polygon: &[Point2]) -> Option<Bounds2> {
    Bounds2::from_points(polygon)
}

/// Bounding box of a circle.
#[inline]
pub fn circle_bbox(center: Point2, radius: f32) -> Bounds2 {
    Bounds2::new(
        center.x - radius,
        center.x + radius,
        center.y - radius,
        center.y + radius,
    )
}
