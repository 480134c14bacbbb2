//! Screen-space 2D geometry for region selection.
//!
//! Purpose
//! - Point-inside and segment-intersects tests for rectangle, circle and lasso
//!   regions, on single inputs and on batches.
//! - A bounding-box prefilter in front of every batch test; results are
//!   identical to the unfiltered tests.
//!
//! Conventions
//! - `f32` pixel coordinates, y up.
//! - NaN marks a point that could not be projected; it is never inside and
//!   never intersects.
//!
//! Code cross-refs: `Region`, `predicates`, `prefilter::prefiltered_test`.

pub mod predicates;
pub mod prefilter;
mod region;
mod types;

pub use prefilter::prefiltered_test;
pub use region::{Region, RegionKind};
pub use types::{
    circle_bbox, invalid_point, is_valid, polygon_bbox, Bounds2, Circle, Lasso, Point2, Rect,
    Segment2,
};
