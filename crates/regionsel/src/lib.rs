//! Screen-space region selection for mesh elements and scene objects.
//!
//! Layers, bottom-up:
//! - `geom2`: 2D predicates for rectangle, circle and lasso regions, with a
//!   bounding-box prefilter in front of every batch test.
//! - `mask`: boolean masks and the set/add/subtract/xor/intersect combinator.
//! - `view`: the `Projector` seam (local 3D → screen pixels, facing test).
//! - `mesh`: vertex → edge → face pipeline over a `MeshSource`.
//! - `object`: whole-object selection by origin, containment or overlap.
//!
//! API Policy
//! - `api` is the curated surface for the CLI and integration tests; module
//!   paths may move between versions.

pub mod api;
mod cfg;
pub mod error;
pub mod geom2;
pub mod mask;
pub mod mesh;
pub mod object;
pub mod view;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{RegionError, RegionResult};
pub use geom2::{Point2, Region};
pub use mask::SelectionMode;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::{Bounds2, Point2, Region, RegionKind, Segment2};
    pub use crate::mask::SelectionMode;
    pub use crate::mesh::{select_in_region, ElementModes, MeshData, MeshSource, SelectCfg};
    pub use crate::object::{
        select_objects_in_region, ObjectBehavior, ObjectGeometry, ObjectSelectionMode,
        SceneObject,
    };
    pub use crate::view::{Camera, PlanarProjector, Projector};
    pub use nalgebra::{Matrix4 as Mat4, Vector2 as Vec2, Vector3 as Vec3};
}
