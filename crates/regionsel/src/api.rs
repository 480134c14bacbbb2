//! Curated API surface.
//!
//! Prefer these re-exports in the CLI, benches and integration tests.

// 2D regions and predicates
pub use crate::geom2::predicates::{
    point_inside_circle, point_inside_polygon, point_inside_rect, segment_intersects_circle,
    segment_intersects_polygon, segment_intersects_rect, segments_intersect,
};
pub use crate::geom2::prefilter::{point_in_bounds, prefiltered_subset, segment_near_bounds};
pub use crate::geom2::{
    invalid_point, is_valid, prefiltered_test, Bounds2, Circle, Lasso, Point2, Rect, Region,
    RegionKind, Segment2,
};
// Masks
pub use crate::mask::{count as mask_count, SelectionMode};
// Projection
pub use crate::view::{Camera, Eye, PlanarProjector, Projector, ScreenProjection};
// Mesh pipeline
pub use crate::mesh::{
    choose_face_lookup, faces_containing_point, faces_linked_to_edges, select_in_region,
    ElementModes, FaceLookup, MeshData, MeshSource, SelectCfg, SelectionSummary,
};
// Object pipeline
pub use crate::object::{
    object_in_region, select_objects_in_region, ObjectBehavior, ObjectGeometry,
    ObjectSelectionMode, SceneObject,
};
// Errors
pub use crate::error::{RegionError, RegionResult};
